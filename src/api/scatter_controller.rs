use crate::core::{
    Axis, AxisKind, Extent, GraphSeries, ScatterSeries, SelectedItem, SeriesId, SeriesType,
    limits::scatter_limits,
};
use crate::error::DataVisResult;
use crate::render::{DataView, PickResult, Renderer};

use super::graph_controller::EMPTY_DATA_RANGE;
use super::{AxisAutoValues, ControlledSeries, GraphController};

/// Controller of a scatter graph: three value axes.
pub type ScatterController<R> = GraphController<ScatterSeries, R>;

impl ControlledSeries for ScatterSeries {
    const GRAPH_TYPE: SeriesType = SeriesType::Scatter;
    const AXIS_KINDS: [AxisKind; 3] = [AxisKind::Value; 3];
    const CLEAR_SELECTION_ON_RESET: bool = true;

    fn data_view(&self) -> DataView<'_> {
        DataView::Scatter(self.proxy().array())
    }

    fn auto_axis_values(visible: &[&Self], _axes: &[Axis; 3]) -> AxisAutoValues {
        let extents = visible
            .iter()
            .filter_map(|series| scatter_limits(series.proxy().array()))
            .reduce(|left, right| std::array::from_fn(|axis| left[axis].merge(right[axis])));

        AxisAutoValues {
            ranges: match extents {
                Some(extents) => extents.map(|extent: Extent| {
                    let extent = extent.widened();
                    Some((extent.min, extent.max))
                }),
                None => [Some(EMPTY_DATA_RANGE); 3],
            },
            labels: Default::default(),
        }
    }

    fn sanitize_selection(&self, selection: SelectedItem, _axes: &[Axis; 3]) -> SelectedItem {
        match selection {
            SelectedItem::Scatter(index)
                if usize::try_from(index).is_ok_and(|index| index < self.proxy().item_count()) =>
            {
                selection
            }
            _ => SelectedItem::Scatter(ScatterSeries::INVALID_SELECTION_INDEX),
        }
    }

    fn pick_selection(pick: PickResult) -> Option<(SeriesId, SelectedItem)> {
        match pick {
            PickResult::ScatterItem { series, index } => {
                Some((series, SelectedItem::Scatter(index)))
            }
            _ => None,
        }
    }

    fn store_selection(&mut self, selection: SelectedItem) -> bool {
        match selection {
            SelectedItem::Scatter(index) => self.set_selected_item(index),
            _ => false,
        }
    }
}

impl<R: Renderer> GraphController<ScatterSeries, R> {
    /// Selects an item by index; indices outside the data clear the selection.
    pub fn set_selected_item(&mut self, series: SeriesId, index: i32) -> DataVisResult<()> {
        self.select(series, SelectedItem::Scatter(index))
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<(SeriesId, i32)> {
        let id = self.selected_series()?;
        self.series(id).map(|series| (id, series.selected_item()))
    }
}
