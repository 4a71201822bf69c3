use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

pub use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Pointer position in viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Row/column address inside a grid-shaped data array.
///
/// Selection state uses [`GridPosition::INVALID`] instead of `Option` so the
/// value can be handed to renderers and observers unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: i32,
    pub column: i32,
}

impl GridPosition {
    pub const INVALID: Self = Self {
        row: -1,
        column: -1,
    };

    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.row >= 0 && self.column >= 0
    }

    /// Returns the position as array indices when both components are valid.
    #[must_use]
    pub fn to_indices(self) -> Option<(usize, usize)> {
        if !self.is_valid() {
            return None;
        }
        Some((self.row as usize, self.column as usize))
    }
}

impl Default for GridPosition {
    fn default() -> Self {
        Self::INVALID
    }
}

macro_rules! handle_id {
    ($name:ident, $counter:ident) => {
        static $counter: AtomicU32 = AtomicU32::new(1);

        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            #[must_use]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }

            pub(crate) fn next() -> Self {
                Self($counter.fetch_add(1, Ordering::Relaxed))
            }
        }
    };
}

handle_id!(SeriesId, NEXT_SERIES_ID);
handle_id!(GraphId, NEXT_GRAPH_ID);
handle_id!(AxisId, NEXT_AXIS_ID);

/// Graph family a series, proxy or controller belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesType {
    Bar,
    Scatter,
    Surface,
}
