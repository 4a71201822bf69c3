mod bars_controller;
mod changeset;
mod graph_config;
mod graph_controller;
mod graph_snapshot;
mod json_contract;
mod observer_registry;
mod render_handoff;
mod scatter_controller;
mod selection;
mod surface_controller;

pub use bars_controller::BarsController;
pub use changeset::{ChangeFlags, ChangeKind, ChangeRecord, ChangeTopic, Changeset};
pub use graph_config::{AutoAdjustRanges, GraphConfig};
pub use graph_controller::{AxisAutoValues, ControlledSeries, GraphController};
pub use graph_snapshot::{AxisSummary, GraphSnapshot, SeriesSummary};
pub use json_contract::{
    GRAPH_CONFIG_JSON_SCHEMA_V1, GRAPH_SNAPSHOT_JSON_SCHEMA_V1, GraphConfigJsonContractV1,
    GraphSnapshotJsonContractV1,
};
pub use render_handoff::RenderHandoff;
pub use scatter_controller::ScatterController;
pub use selection::SelectionFlags;
pub use surface_controller::SurfaceController;
