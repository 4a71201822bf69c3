use serde::{Deserialize, Serialize};

use crate::core::SeriesType;
use crate::error::{DataVisError, DataVisResult};

/// Combinable selection mode bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionFlags {
    bits: u8,
}

impl SelectionFlags {
    pub const NONE: Self = Self { bits: 0 };
    pub const ITEM: Self = Self { bits: 1 << 0 };
    pub const ROW: Self = Self { bits: 1 << 1 };
    pub const COLUMN: Self = Self { bits: 1 << 2 };
    pub const SLICE: Self = Self { bits: 1 << 3 };
    pub const MULTI_SERIES: Self = Self { bits: 1 << 4 };

    pub const ITEM_AND_ROW: Self = Self::ITEM.union(Self::ROW);
    pub const ITEM_AND_COLUMN: Self = Self::ITEM.union(Self::COLUMN);
    pub const ROW_AND_COLUMN: Self = Self::ROW.union(Self::COLUMN);
    pub const ITEM_ROW_AND_COLUMN: Self = Self::ITEM_AND_ROW.union(Self::COLUMN);

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        other.bits != 0 && (self.bits & other.bits) == other.bits
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Checks the mode against what a graph of `graph_type` supports.
    ///
    /// Slicing needs exactly one of row or column. Scatter graphs only select
    /// single items; surface graphs only select rows or columns while slicing.
    pub fn validate_for(self, graph_type: SeriesType) -> DataVisResult<()> {
        let row = self.contains(Self::ROW);
        let column = self.contains(Self::COLUMN);
        let slice = self.contains(Self::SLICE);

        let valid = match graph_type {
            SeriesType::Scatter => self == Self::NONE || self == Self::ITEM,
            SeriesType::Bar => !slice || row != column,
            SeriesType::Surface => {
                if slice {
                    row != column
                } else {
                    !row && !column
                }
            }
        };
        if valid {
            Ok(())
        } else {
            Err(DataVisError::InvalidSelectionMode)
        }
    }
}

impl Default for SelectionFlags {
    fn default() -> Self {
        Self::ITEM
    }
}

impl std::ops::BitOr for SelectionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}
