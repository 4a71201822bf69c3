//! Hooks for application code that reacts to graph changes.
//!
//! Observers only read; every mutation still goes through the controller.

mod observer;

pub use observer::{GraphContext, GraphEvent, GraphObserver};
