use serde::{Deserialize, Serialize};

use crate::core::{
    AxisKind, AxisOrientation, Camera, GraphId, SelectedItem, SeriesId, SeriesType, Viewport,
};
use crate::render::Renderer;

use super::{ChangeFlags, ControlledSeries, GraphController, SelectionFlags};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub id: SeriesId,
    pub name: String,
    pub visible: bool,
    pub item_count: usize,
    pub selection: SelectedItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSummary {
    pub orientation: AxisOrientation,
    pub kind: AxisKind,
    pub title: String,
    pub min: f32,
    pub max: f32,
    pub auto_adjust_range: bool,
    pub labels: Vec<String>,
}

/// Diagnostic summary of a controller, stable enough for JSON fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub graph: GraphId,
    pub graph_type: SeriesType,
    pub viewport: Viewport,
    pub camera: Camera,
    pub slicing_active: bool,
    pub selection_mode: SelectionFlags,
    pub selected_series: Option<SeriesId>,
    pub series: Vec<SeriesSummary>,
    pub axes: Vec<AxisSummary>,
    pub pending_changes: ChangeFlags,
    pub pending_records: usize,
}

impl<S: ControlledSeries, R: Renderer> GraphController<S, R> {
    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        let series = self
            .series_list()
            .map(|series| SeriesSummary {
                id: series.id(),
                name: series.visuals().name.clone(),
                visible: series.is_visible(),
                item_count: series.data_view().item_count(),
                selection: series.selected(),
            })
            .collect();
        let axes = super::graph_controller::AXIS_ORIENTATIONS
            .iter()
            .filter_map(|orientation| self.axis(*orientation))
            .map(|axis| AxisSummary {
                orientation: axis.orientation(),
                kind: axis.kind(),
                title: axis.title().to_owned(),
                min: axis.min(),
                max: axis.max(),
                auto_adjust_range: axis.is_auto_adjust_range(),
                labels: axis.labels().to_vec(),
            })
            .collect();
        let scene = self.scene();

        GraphSnapshot {
            graph: self.id(),
            graph_type: self.graph_type(),
            viewport: scene.viewport(),
            camera: *scene.camera(),
            slicing_active: scene.is_slicing_active(),
            selection_mode: self.selection_mode(),
            selected_series: self.selected_series(),
            series,
            axes,
            pending_changes: self.changeset().flags(),
            pending_records: self.changeset().records().len(),
        }
    }
}
