use crate::core::{
    Axis, AxisKind, Extent, GraphSeries, GridPosition, SelectedItem, SeriesId, SeriesType,
    SurfaceLimits, SurfaceSeries,
};
use crate::error::DataVisResult;
use crate::render::{DataView, PickResult, Renderer};

use super::graph_controller::EMPTY_DATA_RANGE;
use super::{AxisAutoValues, ControlledSeries, GraphController};

/// Controller of a surface graph: three value axes over height grids.
pub type SurfaceController<R> = GraphController<SurfaceSeries, R>;

fn merge_limits(left: SurfaceLimits, right: SurfaceLimits) -> SurfaceLimits {
    SurfaceLimits {
        x: left.x.merge(right.x),
        y: left.y.merge(right.y),
        z: left.z.merge(right.z),
    }
}

fn as_range(extent: Extent) -> Option<(f32, f32)> {
    let extent = extent.widened();
    Some((extent.min, extent.max))
}

impl ControlledSeries for SurfaceSeries {
    const GRAPH_TYPE: SeriesType = SeriesType::Surface;
    const AXIS_KINDS: [AxisKind; 3] = [AxisKind::Value; 3];
    const CLEAR_SELECTION_ON_RESET: bool = false;

    fn data_view(&self) -> DataView<'_> {
        DataView::Surface {
            array: self.proxy().array(),
            dimensions: self.proxy().data_dimensions(),
        }
    }

    fn auto_axis_values(visible: &[&Self], _axes: &[Axis; 3]) -> AxisAutoValues {
        let limits = visible
            .iter()
            .filter_map(|series| series.proxy().limit_values())
            .reduce(merge_limits);

        AxisAutoValues {
            ranges: match limits {
                Some(limits) => [as_range(limits.x), as_range(limits.y), as_range(limits.z)],
                None => [Some(EMPTY_DATA_RANGE); 3],
            },
            labels: Default::default(),
        }
    }

    fn sanitize_selection(&self, selection: SelectedItem, _axes: &[Axis; 3]) -> SelectedItem {
        let invalid = SelectedItem::Surface(GridPosition::INVALID);
        let SelectedItem::Surface(position) = selection else {
            return invalid;
        };
        match position.to_indices() {
            Some((row, column)) if self.proxy().item_at(row, column).is_some() => selection,
            _ => invalid,
        }
    }

    fn pick_selection(pick: PickResult) -> Option<(SeriesId, SelectedItem)> {
        match pick {
            PickResult::SurfacePoint { series, position } => {
                Some((series, SelectedItem::Surface(position)))
            }
            _ => None,
        }
    }

    fn store_selection(&mut self, selection: SelectedItem) -> bool {
        match selection {
            SelectedItem::Surface(position) => self.set_selected_point(position),
            _ => false,
        }
    }
}

impl<R: Renderer> GraphController<SurfaceSeries, R> {
    /// Selects a grid point; positions outside the grid clear the selection.
    pub fn set_selected_point(&mut self, series: SeriesId, position: GridPosition) -> DataVisResult<()> {
        self.select(series, SelectedItem::Surface(position))
    }

    #[must_use]
    pub fn selected_point(&self) -> Option<(SeriesId, GridPosition)> {
        let id = self.selected_series()?;
        self.series(id).map(|series| (id, series.selected_point()))
    }
}
