mod frame;
mod null_renderer;

pub use frame::{DataView, PickResult, SeriesSnapshot, SyncFrame, SyncOutcome};
pub use null_renderer::NullRenderer;

use crate::error::DataVisResult;

/// Contract implemented by any rendering backend.
///
/// Called once per frame with the drained changeset and a borrowed snapshot
/// of the graph. When `frame.changeset.is_reset()` the records are empty and
/// the backend must re-derive everything from the snapshot.
pub trait Renderer {
    fn synchronize(&mut self, frame: &SyncFrame<'_>) -> DataVisResult<SyncOutcome>;
}
