use std::ops::RangeInclusive;

use tracing::debug;

use crate::core::{
    Axis, AxisKind, BarSeries, Extent, GraphSeries, GridPosition, SelectedItem, SeriesId,
    SeriesType, merge_category_labels,
};
use crate::error::{DataVisError, DataVisResult};
use crate::render::{DataView, PickResult, Renderer};

use super::graph_controller::EMPTY_DATA_RANGE;
use super::{AxisAutoValues, ChangeTopic, ControlledSeries, GraphController};

/// Controller of a bar graph: category X (rows) and Z (columns), value Y.
pub type BarsController<R> = GraphController<BarSeries, R>;

/// Row or column indices covered by a category axis range.
#[allow(clippy::reversed_empty_ranges)]
fn category_window((min, max): (f32, f32)) -> RangeInclusive<usize> {
    if max < 0.0 {
        return 1..=0;
    }
    (min.max(0.0) as usize)..=(max as usize)
}

impl ControlledSeries for BarSeries {
    const GRAPH_TYPE: SeriesType = SeriesType::Bar;
    const AXIS_KINDS: [AxisKind; 3] = [AxisKind::Category, AxisKind::Value, AxisKind::Category];
    const CLEAR_SELECTION_ON_RESET: bool = false;

    fn data_view(&self) -> DataView<'_> {
        DataView::Bar(self.proxy().array())
    }

    fn auto_axis_values(visible: &[&Self], axes: &[Axis; 3]) -> AxisAutoValues {
        let max_rows = visible
            .iter()
            .map(|series| series.proxy().row_count())
            .max()
            .unwrap_or(0);
        let max_columns = visible
            .iter()
            .map(|series| series.proxy().column_count())
            .max()
            .unwrap_or(0);
        let x = (0.0, max_rows.saturating_sub(1) as f32);
        let z = (0.0, max_columns.saturating_sub(1) as f32);

        // the value range only covers bars inside the effective category window
        let rows = category_window(if axes[0].is_auto_adjust_range() { x } else { axes[0].range() });
        let columns =
            category_window(if axes[2].is_auto_adjust_range() { z } else { axes[2].range() });
        let y = visible
            .iter()
            .filter_map(|series| series.proxy().limit_values(rows.clone(), columns.clone()))
            .map(|(min, max)| Extent { min, max })
            .reduce(Extent::merge)
            .map_or(EMPTY_DATA_RANGE, |extent| {
                let extent = Extent {
                    min: extent.min.min(0.0),
                    max: extent.max.max(0.0),
                }
                .widened();
                (extent.min, extent.max)
            });

        AxisAutoValues {
            ranges: [Some(x), Some(y), Some(z)],
            labels: [
                Some(merge_category_labels(
                    visible.iter().map(|series| series.proxy().row_labels()),
                )),
                None,
                Some(merge_category_labels(
                    visible.iter().map(|series| series.proxy().column_labels()),
                )),
            ],
        }
    }

    /// A bar is selectable when it exists and lies inside the category window.
    fn sanitize_selection(&self, selection: SelectedItem, axes: &[Axis; 3]) -> SelectedItem {
        let invalid = SelectedItem::Bar(GridPosition::INVALID);
        let SelectedItem::Bar(position) = selection else {
            return invalid;
        };
        let Some((row, column)) = position.to_indices() else {
            return invalid;
        };
        let (min_row, max_row) = axes[0].range();
        let (min_column, max_column) = axes[2].range();
        let in_window = position.row >= min_row as i32
            && position.row <= max_row as i32
            && position.column >= min_column as i32
            && position.column <= max_column as i32;
        if in_window && self.proxy().item_at(row, column).is_some() {
            selection
        } else {
            invalid
        }
    }

    fn pick_selection(pick: PickResult) -> Option<(SeriesId, SelectedItem)> {
        match pick {
            PickResult::Bar { series, position } => Some((series, SelectedItem::Bar(position))),
            _ => None,
        }
    }

    fn store_selection(&mut self, selection: SelectedItem) -> bool {
        match selection {
            SelectedItem::Bar(position) => self.set_selected_bar(position),
            _ => false,
        }
    }
}

impl<R: Renderer> GraphController<BarSeries, R> {
    /// Series the category axes label from: the explicit primary series, or
    /// the first attached one.
    #[must_use]
    pub fn primary_series(&self) -> Option<SeriesId> {
        self.primary_series
            .filter(|id| self.has_series(*id))
            .or_else(|| self.series_list().next().map(GraphSeries::id))
    }

    /// `None` falls back to the first attached series.
    pub fn set_primary_series(&mut self, id: Option<SeriesId>) -> DataVisResult<()> {
        if let Some(id) = id {
            if !self.has_series(id) {
                return Err(DataVisError::UnknownSeries);
            }
        }
        if self.primary_series != id {
            debug!(series = ?id.map(SeriesId::raw), "set primary bar series");
            self.primary_series = id;
            self.mark(ChangeTopic::Series);
            self.adjust_axis_ranges();
        }
        Ok(())
    }

    /// Selects a bar; positions that address no bar clear the selection.
    pub fn set_selected_bar(&mut self, series: SeriesId, position: GridPosition) -> DataVisResult<()> {
        self.select(series, SelectedItem::Bar(position))
    }

    #[must_use]
    pub fn selected_bar(&self) -> Option<(SeriesId, GridPosition)> {
        let id = self.selected_series()?;
        self.series(id).map(|series| (id, series.selected_bar()))
    }
}

#[cfg(test)]
mod tests {
    use super::category_window;

    #[test]
    fn category_window_truncates_and_clamps() {
        assert_eq!(category_window((0.0, 4.0)), 0..=4);
        assert_eq!(category_window((-2.0, 1.5)), 0..=1);
        assert!(category_window((-3.0, -1.0)).is_empty());
    }
}
