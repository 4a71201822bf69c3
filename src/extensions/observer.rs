use serde::{Deserialize, Serialize};

use crate::api::SelectionFlags;
use crate::core::{AxisOrientation, GraphId, SelectedItem, SeriesId, SeriesType};

/// Read-only state passed along with every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphContext {
    pub graph: GraphId,
    pub graph_type: SeriesType,
    pub series_count: usize,
    pub selection_mode: SelectionFlags,
}

/// Notifications a controller raises towards the application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GraphEvent {
    SeriesAdded {
        series: SeriesId,
    },
    SeriesRemoved {
        series: SeriesId,
    },
    SelectedSeriesChanged {
        series: Option<SeriesId>,
    },
    /// Raised once per series whose own selection value changed.
    SelectedItemChanged {
        series: SeriesId,
        selection: SelectedItem,
    },
    AxisRangeChanged {
        orientation: AxisOrientation,
        min: f32,
        max: f32,
    },
    SelectionModeChanged {
        mode: SelectionFlags,
    },
    Synchronized {
        reset: bool,
        records: usize,
    },
}

/// Application hook registered on a controller under a unique id.
pub trait GraphObserver: Send {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: GraphEvent, context: GraphContext);
}
