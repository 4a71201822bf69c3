use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DataVisError, DataVisResult};

use super::height_map::HeightMapSource;
use super::limits::{Extent, surface_height_limits};
use super::proxy::{DataProxy, ProxyCapabilities, ProxyEvent, ProxyEventQueue};
use super::{SeriesId, SeriesType, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SurfaceDataItem {
    pub position: Vec3,
}

impl SurfaceDataItem {
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self { position }
    }

    #[must_use]
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::new(Vec3::new(x, y, z))
    }

    #[must_use]
    pub fn height(self) -> f32 {
        self.position.y
    }
}

pub type SurfaceDataRow = Vec<SurfaceDataItem>;
pub type SurfaceDataArray = Vec<SurfaceDataRow>;

/// Ordering of grid coordinates along X (columns) and Z (rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DataDimensions {
    #[default]
    BothAscending,
    XDescending,
    ZDescending,
    BothDescending,
}

impl DataDimensions {
    #[must_use]
    pub const fn from_flags(x_descending: bool, z_descending: bool) -> Self {
        match (x_descending, z_descending) {
            (false, false) => Self::BothAscending,
            (true, false) => Self::XDescending,
            (false, true) => Self::ZDescending,
            (true, true) => Self::BothDescending,
        }
    }

    #[must_use]
    pub const fn x_descending(self) -> bool {
        matches!(self, Self::XDescending | Self::BothDescending)
    }

    #[must_use]
    pub const fn z_descending(self) -> bool {
        matches!(self, Self::ZDescending | Self::BothDescending)
    }

    fn detect(array: &SurfaceDataArray) -> Self {
        let (Some(first_row), Some(last_row)) = (array.first(), array.last()) else {
            return Self::BothAscending;
        };
        let (Some(first), Some(last_in_row), Some(first_in_last_row)) =
            (first_row.first(), first_row.last(), last_row.first())
        else {
            return Self::BothAscending;
        };
        Self::from_flags(
            first.position.x > last_in_row.position.x,
            first.position.z > first_in_last_row.position.z,
        )
    }
}

/// Per-axis extents of a surface grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLimits {
    pub x: Extent,
    pub y: Extent,
    pub z: Extent,
}

/// Owner of the height grid of one surface series.
///
/// Unlike bar arrays every row of a surface array has the same length.
#[derive(Debug, Clone, Default)]
pub struct SurfaceDataProxy {
    array: SurfaceDataArray,
    dimensions: DataDimensions,
    pub(super) height_map: Option<HeightMapSource>,
    series: Option<SeriesId>,
    events: ProxyEventQueue,
}

impl SurfaceDataProxy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_array(array: SurfaceDataArray) -> DataVisResult<Self> {
        check_grid(&array)?;
        Ok(Self {
            dimensions: DataDimensions::detect(&array),
            array,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.array.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.array.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn array(&self) -> &SurfaceDataArray {
        &self.array
    }

    #[must_use]
    pub fn row_at(&self, row: usize) -> Option<&SurfaceDataRow> {
        self.array.get(row)
    }

    #[must_use]
    pub fn item_at(&self, row: usize, column: usize) -> Option<&SurfaceDataItem> {
        self.array.get(row).and_then(|items| items.get(column))
    }

    #[must_use]
    pub fn data_dimensions(&self) -> DataDimensions {
        self.dimensions
    }

    pub fn reset_array(&mut self, array: SurfaceDataArray) -> DataVisResult<()> {
        check_grid(&array)?;
        debug!(rows = array.len(), "reset surface array");
        self.array = array;
        self.refresh_dimensions();
        self.events.push(ProxyEvent::ArrayReset);
        Ok(())
    }

    pub fn reset_array_empty(&mut self) {
        self.array.clear();
        self.refresh_dimensions();
        self.events.push(ProxyEvent::ArrayReset);
    }

    pub fn set_row(&mut self, index: usize, row: SurfaceDataRow) -> DataVisResult<()> {
        self.set_rows(index, vec![row])
    }

    pub fn set_rows(&mut self, index: usize, rows: Vec<SurfaceDataRow>) -> DataVisResult<()> {
        let count = rows.len();
        DataVisError::check_range("row", index, count, self.array.len())?;
        self.check_row_lengths(&rows)?;
        for (offset, row) in rows.into_iter().enumerate() {
            self.array[index + offset] = row;
        }
        self.refresh_dimensions();
        trace!(index, count, "set surface rows");
        self.events
            .push(ProxyEvent::RowsChanged { start: index, count });
        Ok(())
    }

    pub fn set_item(
        &mut self,
        row: usize,
        column: usize,
        item: SurfaceDataItem,
    ) -> DataVisResult<()> {
        DataVisError::check_range("row", row, 1, self.array.len())?;
        DataVisError::check_range("column", column, 1, self.array[row].len())?;
        self.array[row][column] = item;
        self.refresh_dimensions();
        trace!(row, column, "set surface item");
        self.events.push(ProxyEvent::ItemChanged { row, column });
        Ok(())
    }

    pub fn add_row(&mut self, row: SurfaceDataRow) -> DataVisResult<usize> {
        self.add_rows(vec![row])
    }

    pub fn add_rows(&mut self, rows: Vec<SurfaceDataRow>) -> DataVisResult<usize> {
        self.check_row_lengths(&rows)?;
        let start = self.array.len();
        let count = rows.len();
        self.array.extend(rows);
        self.refresh_dimensions();
        trace!(start, count, "add surface rows");
        self.events.push(ProxyEvent::RowsAdded { start, count });
        Ok(start)
    }

    pub fn insert_row(&mut self, index: usize, row: SurfaceDataRow) -> DataVisResult<()> {
        self.insert_rows(index, vec![row])
    }

    pub fn insert_rows(&mut self, index: usize, rows: Vec<SurfaceDataRow>) -> DataVisResult<()> {
        DataVisError::check_range("row", index, 0, self.array.len())?;
        self.check_row_lengths(&rows)?;
        let count = rows.len();
        self.array.splice(index..index, rows);
        self.refresh_dimensions();
        trace!(index, count, "insert surface rows");
        self.events
            .push(ProxyEvent::RowsInserted { start: index, count });
        Ok(())
    }

    pub fn remove_rows(&mut self, index: usize, count: usize) -> DataVisResult<()> {
        DataVisError::check_range("row", index, count, self.array.len())?;
        self.array.drain(index..index + count);
        self.refresh_dimensions();
        trace!(index, count, "remove surface rows");
        self.events
            .push(ProxyEvent::RowsRemoved { start: index, count });
        Ok(())
    }

    /// Grid extents. X and Z come from the grid corners, Y from every item.
    #[must_use]
    pub fn limit_values(&self) -> Option<SurfaceLimits> {
        let first_row = self.array.first()?;
        let last_row = self.array.last()?;
        let first = first_row.first()?;
        let last_in_row = first_row.last()?;
        let first_in_last_row = last_row.first()?;
        let y = surface_height_limits(&self.array)?;

        let x = Extent::of(first.position.x).merge(Extent::of(last_in_row.position.x));
        let z = Extent::of(first.position.z).merge(Extent::of(first_in_last_row.position.z));
        Some(SurfaceLimits { x, y, z })
    }

    fn check_row_lengths(&self, rows: &[SurfaceDataRow]) -> DataVisResult<()> {
        let expected = match self.array.first() {
            Some(row) => row.len(),
            None => match rows.first() {
                Some(row) => row.len(),
                None => return Ok(()),
            },
        };
        for row in rows {
            if row.len() != expected {
                return Err(DataVisError::RowLengthMismatch {
                    expected,
                    actual: row.len(),
                });
            }
        }
        Ok(())
    }

    fn refresh_dimensions(&mut self) {
        self.dimensions = DataDimensions::detect(&self.array);
    }
}

fn check_grid(array: &SurfaceDataArray) -> DataVisResult<()> {
    let Some(expected) = array.first().map(Vec::len) else {
        return Ok(());
    };
    match array.iter().find(|row| row.len() != expected) {
        Some(row) => Err(DataVisError::RowLengthMismatch {
            expected,
            actual: row.len(),
        }),
        None => Ok(()),
    }
}

impl DataProxy for SurfaceDataProxy {
    fn series_type(&self) -> SeriesType {
        SeriesType::Surface
    }

    fn capabilities(&self) -> ProxyCapabilities {
        ProxyCapabilities::GRID
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
