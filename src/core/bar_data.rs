use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DataVisError, DataVisResult};

use super::labels::fix_row_labels;
use super::proxy::{DataProxy, ProxyCapabilities, ProxyEvent, ProxyEventQueue};
use super::{SeriesId, SeriesType};

/// Value payload of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BarDataItem {
    pub value: f32,
    /// Rotation around the Y axis in degrees.
    pub rotation: f32,
}

impl BarDataItem {
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self {
            value,
            rotation: 0.0,
        }
    }

    #[must_use]
    pub const fn with_rotation(value: f32, rotation: f32) -> Self {
        Self { value, rotation }
    }

    #[must_use]
    pub const fn value(self) -> f32 {
        self.value
    }
}

pub type BarDataRow = Vec<BarDataItem>;
pub type BarDataArray = Vec<BarDataRow>;

/// Builds a bar row from plain values.
#[must_use]
pub fn bar_row(values: &[f32]) -> BarDataRow {
    values.iter().copied().map(BarDataItem::new).collect()
}

/// Owner of the row/column bar dataset of one series.
#[derive(Debug, Clone, Default)]
pub struct BarDataProxy {
    array: BarDataArray,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    series: Option<SeriesId>,
    events: ProxyEventQueue,
}

impl BarDataProxy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a proxy pre-filled with `array`, without queuing any event.
    #[must_use]
    pub fn with_array(array: BarDataArray) -> Self {
        Self {
            array,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.array.len()
    }

    /// Longest row length; rows may be shorter.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.array.iter().map(Vec::len).max().unwrap_or(0)
    }

    #[must_use]
    pub fn array(&self) -> &BarDataArray {
        &self.array
    }

    #[must_use]
    pub fn row_at(&self, row: usize) -> Option<&BarDataRow> {
        self.array.get(row)
    }

    #[must_use]
    pub fn item_at(&self, row: usize, column: usize) -> Option<&BarDataItem> {
        self.array.get(row).and_then(|items| items.get(column))
    }

    #[must_use]
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    #[must_use]
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// Replaces the whole array and label lists.
    ///
    /// Empty label lists are accepted as "no labels"; non-empty lists must
    /// match the row count and the longest row respectively.
    pub fn reset_array(
        &mut self,
        array: BarDataArray,
        row_labels: Vec<String>,
        column_labels: Vec<String>,
    ) -> DataVisResult<()> {
        if !row_labels.is_empty() {
            DataVisError::check_labels("row", array.len(), row_labels.len())?;
        }
        if !column_labels.is_empty() {
            let columns = array.iter().map(Vec::len).max().unwrap_or(0);
            DataVisError::check_labels("column", columns, column_labels.len())?;
        }
        debug!(rows = array.len(), "reset bar array");
        self.array = array;
        self.row_labels = row_labels;
        self.column_labels = column_labels;
        self.events.push(ProxyEvent::ArrayReset);
        Ok(())
    }

    /// Clears data and labels.
    pub fn reset_array_empty(&mut self) {
        debug!("reset bar array to empty");
        self.array.clear();
        self.row_labels.clear();
        self.column_labels.clear();
        self.events.push(ProxyEvent::ArrayReset);
    }

    /// Replaces one row; `None` leaves its label as it was.
    pub fn set_row(
        &mut self,
        index: usize,
        row: BarDataRow,
        label: Option<String>,
    ) -> DataVisResult<()> {
        self.set_rows(index, vec![row], label.into_iter().collect())
    }

    /// Replaces `rows.len()` rows starting at `index`.
    pub fn set_rows(
        &mut self,
        index: usize,
        rows: Vec<BarDataRow>,
        labels: Vec<String>,
    ) -> DataVisResult<()> {
        let count = rows.len();
        DataVisError::check_range("row", index, count, self.array.len())?;
        check_batch_labels(count, &labels)?;

        for (offset, row) in rows.into_iter().enumerate() {
            self.array[index + offset] = row;
        }
        // replacing data without labels keeps the existing labels
        if !labels.is_empty() {
            fix_row_labels(&mut self.row_labels, index, count, &labels, false);
        }
        trace!(index, count, "set bar rows");
        self.events
            .push(ProxyEvent::RowsChanged { start: index, count });
        Ok(())
    }

    pub fn set_item(&mut self, row: usize, column: usize, item: BarDataItem) -> DataVisResult<()> {
        DataVisError::check_range("row", row, 1, self.array.len())?;
        let items = &mut self.array[row];
        DataVisError::check_range("column", column, 1, items.len())?;
        items[column] = item;
        trace!(row, column, "set bar item");
        self.events.push(ProxyEvent::ItemChanged { row, column });
        Ok(())
    }

    /// Appends one row and returns its index.
    pub fn add_row(&mut self, row: BarDataRow, label: Option<String>) -> usize {
        let labels: Vec<String> = label.into_iter().collect();
        let start = self.array.len();
        self.array.push(row);
        fix_row_labels(&mut self.row_labels, start, 1, &labels, false);
        trace!(start, "add bar row");
        self.events.push(ProxyEvent::RowsAdded { start, count: 1 });
        start
    }

    /// Appends rows and returns the index of the first added row.
    pub fn add_rows(&mut self, rows: Vec<BarDataRow>, labels: Vec<String>) -> DataVisResult<usize> {
        let count = rows.len();
        check_batch_labels(count, &labels)?;
        let start = self.array.len();
        self.array.extend(rows);
        fix_row_labels(&mut self.row_labels, start, count, &labels, false);
        trace!(start, count, "add bar rows");
        self.events.push(ProxyEvent::RowsAdded { start, count });
        Ok(start)
    }

    pub fn insert_row(
        &mut self,
        index: usize,
        row: BarDataRow,
        label: Option<String>,
    ) -> DataVisResult<()> {
        self.insert_rows(index, vec![row], label.into_iter().collect())
    }

    /// Inserts rows before `index`; `index == row_count` appends.
    pub fn insert_rows(
        &mut self,
        index: usize,
        rows: Vec<BarDataRow>,
        labels: Vec<String>,
    ) -> DataVisResult<()> {
        DataVisError::check_range("row", index, 0, self.array.len())?;
        let count = rows.len();
        check_batch_labels(count, &labels)?;
        self.array.splice(index..index, rows);
        fix_row_labels(&mut self.row_labels, index, count, &labels, true);
        trace!(index, count, "insert bar rows");
        self.events
            .push(ProxyEvent::RowsInserted { start: index, count });
        Ok(())
    }

    /// Removes `count` rows starting at `index`.
    ///
    /// With `remove_labels == false` the label list is left untouched, so the
    /// remaining labels stay bound to positions rather than to rows.
    pub fn remove_rows(
        &mut self,
        index: usize,
        count: usize,
        remove_labels: bool,
    ) -> DataVisResult<()> {
        DataVisError::check_range("row", index, count, self.array.len())?;
        self.array.drain(index..index + count);
        if remove_labels && index < self.row_labels.len() {
            let end = (index + count).min(self.row_labels.len());
            self.row_labels.drain(index..end);
        }
        trace!(index, count, "remove bar rows");
        self.events
            .push(ProxyEvent::RowsRemoved { start: index, count });
        Ok(())
    }

    pub fn set_row_labels(&mut self, labels: Vec<String>) -> DataVisResult<()> {
        if !labels.is_empty() {
            DataVisError::check_labels("row", self.array.len(), labels.len())?;
        }
        if self.row_labels != labels {
            self.row_labels = labels;
            self.events.push(ProxyEvent::RowLabelsChanged);
        }
        Ok(())
    }

    pub fn set_column_labels(&mut self, labels: Vec<String>) -> DataVisResult<()> {
        if !labels.is_empty() {
            DataVisError::check_labels("column", self.column_count(), labels.len())?;
        }
        if self.column_labels != labels {
            self.column_labels = labels;
            self.events.push(ProxyEvent::ColumnLabelsChanged);
        }
        Ok(())
    }

    /// Min/max of item values inside the inclusive row/column window.
    #[must_use]
    pub fn limit_values(
        &self,
        rows: std::ops::RangeInclusive<usize>,
        columns: std::ops::RangeInclusive<usize>,
    ) -> Option<(f32, f32)> {
        super::limits::bar_value_limits(&self.array, rows, columns)
    }
}

fn check_batch_labels(count: usize, labels: &[String]) -> DataVisResult<()> {
    if labels.is_empty() {
        return Ok(());
    }
    DataVisError::check_labels("row", count, labels.len())
}

impl DataProxy for BarDataProxy {
    fn series_type(&self) -> SeriesType {
        SeriesType::Bar
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
