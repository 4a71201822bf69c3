//! Value-extent scans used by axis auto-adjustment.
//!
//! Every scan is a full pass over the selected window. With the
//! `parallel-limits` feature the per-row scans run on the rayon pool.

use std::ops::RangeInclusive;

use super::{BarDataRow, ScatterDataItem, SurfaceDataRow, Vec3};

/// Accumulated `(min, max)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f32,
    pub max: f32,
}

impl Extent {
    #[must_use]
    pub fn of(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Widens a zero-width extent so it can back an axis range.
    ///
    /// The step is 1 unless the magnitude is so large that 1 is below the
    /// f32 resolution, in which case it scales with the value.
    #[must_use]
    pub fn widened(self) -> Self {
        if self.min != self.max {
            return self;
        }
        let step = (self.max.abs() * f32::EPSILON).max(1.0);
        let max = self.max + step;
        if max.is_finite() {
            Self { min: self.min, max }
        } else {
            Self {
                min: self.min - step,
                max: self.max,
            }
        }
    }
}

fn bar_row_extent(row: &BarDataRow, columns: &RangeInclusive<usize>) -> Option<Extent> {
    row.iter()
        .enumerate()
        .filter(|(column, item)| columns.contains(column) && item.value.is_finite())
        .map(|(_, item)| Extent::of(item.value))
        .reduce(Extent::merge)
}

/// Min/max bar value inside the inclusive row/column window.
#[must_use]
pub fn bar_value_limits(
    rows: &[BarDataRow],
    row_window: RangeInclusive<usize>,
    column_window: RangeInclusive<usize>,
) -> Option<(f32, f32)> {
    if row_window.is_empty() || *row_window.start() >= rows.len() {
        return None;
    }
    let last = (*row_window.end()).min(rows.len() - 1);
    let window = &rows[*row_window.start()..=last];

    #[cfg(feature = "parallel-limits")]
    let extent = {
        use rayon::prelude::*;
        window
            .par_iter()
            .filter_map(|row| bar_row_extent(row, &column_window))
            .reduce_with(Extent::merge)
    };
    #[cfg(not(feature = "parallel-limits"))]
    let extent = window
        .iter()
        .filter_map(|row| bar_row_extent(row, &column_window))
        .reduce(Extent::merge);

    extent.map(|extent| (extent.min, extent.max))
}

fn position_extents<I>(positions: I) -> Option<[Extent; 3]>
where
    I: Iterator<Item = Vec3>,
{
    positions
        .filter(|position| position.is_finite())
        .map(|position| {
            [
                Extent::of(position.x),
                Extent::of(position.y),
                Extent::of(position.z),
            ]
        })
        .reduce(|left, right| {
            [
                left[0].merge(right[0]),
                left[1].merge(right[1]),
                left[2].merge(right[2]),
            ]
        })
}

/// Per-axis extents of scatter points as `[x, y, z]`.
#[must_use]
pub fn scatter_limits(items: &[ScatterDataItem]) -> Option<[Extent; 3]> {
    position_extents(items.iter().map(|item| item.position))
}

/// Extent of surface heights (Y) over the whole grid.
#[must_use]
pub fn surface_height_limits(rows: &[SurfaceDataRow]) -> Option<Extent> {
    let row_extent = |row: &SurfaceDataRow| {
        row.iter()
            .filter(|item| item.position.y.is_finite())
            .map(|item| Extent::of(item.position.y))
            .reduce(Extent::merge)
    };

    #[cfg(feature = "parallel-limits")]
    {
        use rayon::prelude::*;
        rows.par_iter().filter_map(row_extent).reduce_with(Extent::merge)
    }
    #[cfg(not(feature = "parallel-limits"))]
    {
        rows.iter().filter_map(row_extent).reduce(Extent::merge)
    }
}
