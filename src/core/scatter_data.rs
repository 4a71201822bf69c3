use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DataVisError, DataVisResult};

use super::proxy::{DataProxy, ProxyCapabilities, ProxyEvent, ProxyEventQueue};
use super::{SeriesId, SeriesType, Vec3};

/// Position payload of a single scatter point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScatterDataItem {
    pub position: Vec3,
    /// Rotation around the Y axis in degrees.
    pub rotation: f32,
}

impl ScatterDataItem {
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }

    #[must_use]
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::new(Vec3::new(x, y, z))
    }

    #[must_use]
    pub const fn with_rotation(position: Vec3, rotation: f32) -> Self {
        Self { position, rotation }
    }
}

pub type ScatterDataArray = Vec<ScatterDataItem>;

/// Owner of the flat point set of one scatter series.
#[derive(Debug, Clone, Default)]
pub struct ScatterDataProxy {
    array: ScatterDataArray,
    series: Option<SeriesId>,
    events: ProxyEventQueue,
}

impl ScatterDataProxy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_array(array: ScatterDataArray) -> Self {
        Self {
            array,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.array.len()
    }

    #[must_use]
    pub fn array(&self) -> &ScatterDataArray {
        &self.array
    }

    #[must_use]
    pub fn item_at(&self, index: usize) -> Option<&ScatterDataItem> {
        self.array.get(index)
    }

    pub fn reset_array(&mut self, array: ScatterDataArray) {
        debug!(items = array.len(), "reset scatter array");
        self.array = array;
        self.events.push(ProxyEvent::ArrayReset);
    }

    pub fn reset_array_empty(&mut self) {
        self.reset_array(Vec::new());
    }

    pub fn set_item(&mut self, index: usize, item: ScatterDataItem) -> DataVisResult<()> {
        self.set_items(index, vec![item])
    }

    pub fn set_items(&mut self, index: usize, items: ScatterDataArray) -> DataVisResult<()> {
        let count = items.len();
        DataVisError::check_range("item", index, count, self.array.len())?;
        self.array[index..index + count].copy_from_slice(&items);
        trace!(index, count, "set scatter items");
        self.events
            .push(ProxyEvent::ItemsChanged { start: index, count });
        Ok(())
    }

    /// Appends one point and returns its index.
    pub fn add_item(&mut self, item: ScatterDataItem) -> usize {
        self.add_items(vec![item])
    }

    /// Appends points and returns the index of the first one.
    pub fn add_items(&mut self, items: ScatterDataArray) -> usize {
        let start = self.array.len();
        let count = items.len();
        self.array.extend(items);
        trace!(start, count, "add scatter items");
        self.events.push(ProxyEvent::ItemsAdded { start, count });
        start
    }

    pub fn insert_item(&mut self, index: usize, item: ScatterDataItem) -> DataVisResult<()> {
        self.insert_items(index, vec![item])
    }

    /// Inserts points before `index`; `index == item_count` appends.
    pub fn insert_items(&mut self, index: usize, items: ScatterDataArray) -> DataVisResult<()> {
        DataVisError::check_range("item", index, 0, self.array.len())?;
        let count = items.len();
        self.array.splice(index..index, items);
        trace!(index, count, "insert scatter items");
        self.events
            .push(ProxyEvent::ItemsInserted { start: index, count });
        Ok(())
    }

    pub fn remove_items(&mut self, index: usize, count: usize) -> DataVisResult<()> {
        DataVisError::check_range("item", index, count, self.array.len())?;
        self.array.drain(index..index + count);
        trace!(index, count, "remove scatter items");
        self.events
            .push(ProxyEvent::ItemsRemoved { start: index, count });
        Ok(())
    }
}

impl DataProxy for ScatterDataProxy {
    fn series_type(&self) -> SeriesType {
        SeriesType::Scatter
    }

    fn capabilities(&self) -> ProxyCapabilities {
        ProxyCapabilities::FLAT
    }

    fn attached_series(&self) -> Option<SeriesId> {
        self.series
    }

    fn set_attached_series(&mut self, series: Option<SeriesId>) {
        self.series = series;
    }

    fn events(&self) -> &ProxyEventQueue {
        &self.events
    }

    fn events_mut(&mut self) -> &mut ProxyEventQueue {
        &mut self.events
    }
}
