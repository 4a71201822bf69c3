//! datavis3d-rs: headless core of a 3D data-visualization toolkit.
//!
//! Data proxies own bar, scatter and surface arrays and report fine-grained
//! change events. A graph controller drains those events into a changeset,
//! keeps axes, selection and scene consistent, and hands a borrowed frame to a
//! [`render::Renderer`] once per synchronize.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{
    BarsController, GraphConfig, GraphController, RenderHandoff, ScatterController,
    SelectionFlags, SurfaceController,
};
pub use error::{DataVisError, DataVisResult};
