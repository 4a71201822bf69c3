use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::api::{Changeset, SelectionFlags};
use crate::core::{
    Axis, AxisOrientation, BarDataArray, DataDimensions, GraphId, GridPosition,
    ScatterDataArray, Scene, ScreenPoint, SelectedItem, SeriesId, SeriesType, SeriesVisuals,
    SurfaceDataArray,
};
use crate::error::DataVisResult;

/// Read-only view of one series array, tagged by graph family.
#[derive(Debug, Clone, Copy)]
pub enum DataView<'a> {
    Bar(&'a BarDataArray),
    Scatter(&'a ScatterDataArray),
    Surface {
        array: &'a SurfaceDataArray,
        dimensions: DataDimensions,
    },
}

impl DataView<'_> {
    /// Number of addressable items across all rows.
    #[must_use]
    pub fn item_count(&self) -> usize {
        match self {
            Self::Bar(array) => array.iter().map(Vec::len).sum(),
            Self::Scatter(array) => array.len(),
            Self::Surface { array, .. } => array.iter().map(Vec::len).sum(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SeriesSnapshot<'a> {
    pub id: SeriesId,
    pub visuals: &'a SeriesVisuals,
    pub data: DataView<'a>,
    pub selection: SelectedItem,
}

/// Everything a renderer may read during one synchronize call.
///
/// Borrowed from the controller; nothing in it can change while the renderer
/// holds it.
#[derive(Debug, Clone)]
pub struct SyncFrame<'a> {
    pub graph: GraphId,
    pub graph_type: SeriesType,
    pub changeset: &'a Changeset,
    pub series: SmallVec<[SeriesSnapshot<'a>; 4]>,
    pub axes: [&'a Axis; 3],
    pub scene: &'a Scene,
    pub selection_mode: SelectionFlags,
    pub selection_query: Option<ScreenPoint>,
}

impl SyncFrame<'_> {
    #[must_use]
    pub fn axis(&self, orientation: AxisOrientation) -> Option<&Axis> {
        match orientation {
            AxisOrientation::X => Some(self.axes[0]),
            AxisOrientation::Y => Some(self.axes[1]),
            AxisOrientation::Z => Some(self.axes[2]),
            AxisOrientation::None => None,
        }
    }

    /// Checks visuals handed over by the controller.
    pub fn validate(&self) -> DataVisResult<()> {
        for snapshot in &self.series {
            snapshot.visuals.base_color.validate()?;
        }
        Ok(())
    }
}

/// Renderer answer to a pending selection query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickResult {
    Nothing,
    Bar {
        series: SeriesId,
        position: GridPosition,
    },
    ScatterItem {
        series: SeriesId,
        index: i32,
    },
    SurfacePoint {
        series: SeriesId,
        position: GridPosition,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOutcome {
    pub pick: Option<PickResult>,
}

impl SyncOutcome {
    #[must_use]
    pub const fn picked(pick: PickResult) -> Self {
        Self { pick: Some(pick) }
    }
}
