use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::DataVisResult;
use crate::render::Renderer;

use super::{ControlledSeries, GraphController};

/// Shared slot a render thread synchronizes a controller through.
///
/// The owner keeps mutating the controller via [`RenderHandoff::with_controller`];
/// once [`RenderHandoff::release`] takes it out, every other clone observes `None`.
pub struct RenderHandoff<C> {
    slot: Arc<Mutex<Option<C>>>,
}

impl<C> Clone for RenderHandoff<C> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<C> RenderHandoff<C> {
    #[must_use]
    pub fn new(controller: C) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(controller))),
        }
    }

    /// Runs `f` with the controller locked, or returns `None` after release.
    pub fn with_controller<T>(&self, f: impl FnOnce(&mut C) -> T) -> Option<T> {
        self.slot.lock().as_mut().map(f)
    }

    /// Takes the controller out of the slot.
    pub fn release(&self) -> Option<C> {
        let released = self.slot.lock().take();
        if released.is_some() {
            debug!("release controller from render handoff");
        }
        released
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.slot.lock().is_none()
    }
}

impl<S: ControlledSeries, R: Renderer> RenderHandoff<GraphController<S, R>> {
    /// Synchronizes the held controller. `None` once it has been released.
    pub fn synchronize(&self) -> Option<DataVisResult<()>> {
        self.with_controller(GraphController::synchronize)
    }
}
