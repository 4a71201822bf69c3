use thiserror::Error;

use crate::core::AxisOrientation;

pub type DataVisResult<T> = Result<T, DataVisError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataVisError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("{what} index out of range: index={index}, count={count}, len={len}")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        count: usize,
        len: usize,
    },

    #[error("{what} label count mismatch: expected {expected}, got {actual}")]
    LabelCountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("surface row length mismatch: expected {expected}, got {actual}")]
    RowLengthMismatch { expected: usize, actual: usize },

    #[error("axis is already attached to another graph")]
    AxisAlreadyAttached,

    #[error("axis slot {orientation:?} requires a {expected} axis")]
    AxisTypeMismatch {
        orientation: AxisOrientation,
        expected: &'static str,
    },

    #[error("invalid range: min={min}, max={max}")]
    InvalidRange { min: f32, max: f32 },

    #[error("selection mode is not supported by this graph")]
    InvalidSelectionMode,

    #[error("series is not attached to this graph")]
    UnknownSeries,

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl DataVisError {
    pub(crate) fn check_range(
        what: &'static str,
        index: usize,
        count: usize,
        len: usize,
    ) -> DataVisResult<()> {
        match index.checked_add(count) {
            Some(end) if end <= len => Ok(()),
            _ => Err(Self::IndexOutOfRange {
                what,
                index,
                count,
                len,
            }),
        }
    }

    pub(crate) fn check_labels(
        what: &'static str,
        expected: usize,
        actual: usize,
    ) -> DataVisResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::LabelCountMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}
