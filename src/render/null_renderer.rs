use crate::api::{ChangeFlags, ChangeRecord};
use crate::error::DataVisResult;
use crate::render::{PickResult, Renderer, SyncFrame, SyncOutcome};

/// No-op renderer used by tests and headless controller usage.
///
/// It still validates frame content and remembers what the last frame
/// carried. `pick_response` is answered to the next selection query.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub sync_count: usize,
    pub last_reset: bool,
    pub last_flags: ChangeFlags,
    pub last_records: Vec<ChangeRecord>,
    pub last_series_count: usize,
    pub last_item_count: usize,
    pub pick_response: Option<PickResult>,
}

impl Renderer for NullRenderer {
    fn synchronize(&mut self, frame: &SyncFrame<'_>) -> DataVisResult<SyncOutcome> {
        frame.validate()?;
        self.sync_count += 1;
        self.last_reset = frame.changeset.is_reset();
        self.last_flags = frame.changeset.flags();
        self.last_records = frame.changeset.records().to_vec();
        self.last_series_count = frame.series.len();
        self.last_item_count = frame
            .series
            .iter()
            .map(|snapshot| snapshot.data.item_count())
            .sum();

        if frame.selection_query.is_none() {
            return Ok(SyncOutcome::default());
        }
        Ok(SyncOutcome::picked(
            self.pick_response.take().unwrap_or(PickResult::Nothing),
        ))
    }
}
