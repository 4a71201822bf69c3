use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{ProxyEvent, SeriesId};

/// Coarse dirty topic tracked between two synchronize calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeTopic {
    ArrayReset,
    Rows,
    Items,
    Labels,
    Series,
    SeriesVisuals,
    AxisRange,
    AxisLabels,
    AxisAssignment,
    Selection,
    SelectionMode,
    Scene,
}

impl ChangeTopic {
    const fn bit(self) -> u16 {
        match self {
            Self::ArrayReset => 1 << 0,
            Self::Rows => 1 << 1,
            Self::Items => 1 << 2,
            Self::Labels => 1 << 3,
            Self::Series => 1 << 4,
            Self::SeriesVisuals => 1 << 5,
            Self::AxisRange => 1 << 6,
            Self::AxisLabels => 1 << 7,
            Self::AxisAssignment => 1 << 8,
            Self::Selection => 1 << 9,
            Self::SelectionMode => 1 << 10,
            Self::Scene => 1 << 11,
        }
    }
}

/// Bitmask of dirty topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChangeFlags {
    bits: u16,
}

impl ChangeFlags {
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn from_topic(topic: ChangeTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn with_topic(self, topic: ChangeTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.bits & other.bits) != 0
    }

    #[must_use]
    pub const fn contains_topic(self, topic: ChangeTopic) -> bool {
        self.intersects(Self::from_topic(topic))
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Insert,
    Remove,
    Change,
}

/// Fine-grained change inside one series array.
///
/// For grid proxies `start_index`/`count` address rows; `column` is set only
/// for a single-cell change. Flat proxies address items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub start_index: usize,
    pub count: usize,
    pub series: SeriesId,
    pub column: Option<usize>,
}

impl ChangeRecord {
    fn from_event(series: SeriesId, event: ProxyEvent) -> Option<(ChangeTopic, Self)> {
        let (topic, kind, start_index, count, column) = match event {
            ProxyEvent::RowsAdded { start, count } | ProxyEvent::RowsInserted { start, count } => {
                (ChangeTopic::Rows, ChangeKind::Insert, start, count, None)
            }
            ProxyEvent::RowsChanged { start, count } => {
                (ChangeTopic::Rows, ChangeKind::Change, start, count, None)
            }
            ProxyEvent::RowsRemoved { start, count } => {
                (ChangeTopic::Rows, ChangeKind::Remove, start, count, None)
            }
            ProxyEvent::ItemChanged { row, column } => {
                (ChangeTopic::Items, ChangeKind::Change, row, 1, Some(column))
            }
            ProxyEvent::ItemsAdded { start, count }
            | ProxyEvent::ItemsInserted { start, count } => {
                (ChangeTopic::Items, ChangeKind::Insert, start, count, None)
            }
            ProxyEvent::ItemsChanged { start, count } => {
                (ChangeTopic::Items, ChangeKind::Change, start, count, None)
            }
            ProxyEvent::ItemsRemoved { start, count } => {
                (ChangeTopic::Items, ChangeKind::Remove, start, count, None)
            }
            ProxyEvent::ArrayReset
            | ProxyEvent::RowLabelsChanged
            | ProxyEvent::ColumnLabelsChanged => return None,
        };
        Some((
            topic,
            Self {
                kind,
                start_index,
                count,
                series,
                column,
            },
        ))
    }
}

/// Everything that changed since the last synchronize.
///
/// An array reset discards the pending records and suppresses new ones until
/// the changeset is cleared: the renderer re-derives everything anyway.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changeset {
    flags: ChangeFlags,
    records: SmallVec<[ChangeRecord; 8]>,
    changed_series: SmallVec<[SeriesId; 4]>,
}

impl Changeset {
    #[must_use]
    pub fn flags(&self) -> ChangeFlags {
        self.flags
    }

    #[must_use]
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    /// Series whose array changed in this window, in first-change order.
    #[must_use]
    pub fn changed_series(&self) -> &[SeriesId] {
        &self.changed_series
    }

    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.flags.contains_topic(ChangeTopic::ArrayReset)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_none()
    }

    pub(crate) fn mark(&mut self, topic: ChangeTopic) {
        self.flags = self.flags.with_topic(topic);
    }

    pub(crate) fn record_event(&mut self, series: SeriesId, event: ProxyEvent) {
        if event.affects_values() && !self.changed_series.contains(&series) {
            self.changed_series.push(series);
        }
        match event {
            ProxyEvent::ArrayReset => {
                trace!(series = series.raw(), "array reset discards pending records");
                self.mark(ChangeTopic::ArrayReset);
                self.records.clear();
            }
            ProxyEvent::RowLabelsChanged | ProxyEvent::ColumnLabelsChanged => {
                self.mark(ChangeTopic::Labels);
            }
            _ => {
                let Some((topic, record)) = ChangeRecord::from_event(series, event) else {
                    return;
                };
                self.mark(topic);
                if !self.is_reset() {
                    self.records.push(record);
                }
            }
        }
    }

    /// Drops every pending record that belongs to `series`.
    pub(crate) fn forget_series(&mut self, series: SeriesId) {
        self.records.retain(|record| record.series != series);
        self.changed_series.retain(|id| *id != series);
    }

    pub(crate) fn clear(&mut self) {
        self.flags = ChangeFlags::none();
        self.records.clear();
        self.changed_series.clear();
    }
}
