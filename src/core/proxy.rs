use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{SeriesId, SeriesType};

/// One notification per logical proxy mutation.
///
/// Grid proxies (bar, surface) raise the `Rows*`/`ItemChanged` variants, the
/// flat scatter proxy raises the `Items*` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyEvent {
    ArrayReset,
    RowsAdded { start: usize, count: usize },
    RowsChanged { start: usize, count: usize },
    RowsRemoved { start: usize, count: usize },
    RowsInserted { start: usize, count: usize },
    ItemChanged { row: usize, column: usize },
    ItemsAdded { start: usize, count: usize },
    ItemsChanged { start: usize, count: usize },
    ItemsRemoved { start: usize, count: usize },
    ItemsInserted { start: usize, count: usize },
    RowLabelsChanged,
    ColumnLabelsChanged,
}

impl ProxyEvent {
    /// Label-only events do not touch item values.
    #[must_use]
    pub const fn affects_values(self) -> bool {
        !matches!(self, Self::RowLabelsChanged | Self::ColumnLabelsChanged)
    }

    /// Events after which an existing selection may point past the data.
    #[must_use]
    pub const fn may_invalidate_selection(self) -> bool {
        matches!(
            self,
            Self::ArrayReset | Self::RowsRemoved { .. } | Self::ItemsRemoved { .. }
        )
    }
}

/// Addressing capabilities used to dispatch on proxy shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyCapabilities {
    pub row_column_addressing: bool,
    pub flat_addressing: bool,
}

impl ProxyCapabilities {
    pub const GRID: Self = Self {
        row_column_addressing: true,
        flat_addressing: false,
    };
    pub const FLAT: Self = Self {
        row_column_addressing: false,
        flat_addressing: true,
    };
}

/// Outbox of pending notifications owned by each proxy.
///
/// The owning controller drains it after every mediated mutation and again at
/// synchronize time, so nothing queued here is ever observed twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyEventQueue {
    events: SmallVec<[ProxyEvent; 4]>,
}

impl ProxyEventQueue {
    pub fn push(&mut self, event: ProxyEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn take(&mut self) -> SmallVec<[ProxyEvent; 4]> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Behaviour shared by every data proxy variant.
pub trait DataProxy {
    fn series_type(&self) -> SeriesType;

    fn capabilities(&self) -> ProxyCapabilities;

    /// Series currently owning this proxy, used only for routing events.
    fn attached_series(&self) -> Option<SeriesId>;

    fn set_attached_series(&mut self, series: Option<SeriesId>);

    fn events(&self) -> &ProxyEventQueue;

    fn events_mut(&mut self) -> &mut ProxyEventQueue;

    fn has_pending_events(&self) -> bool {
        !self.events().is_empty()
    }

    fn take_events(&mut self) -> SmallVec<[ProxyEvent; 4]> {
        self.events_mut().take()
    }
}
