use serde::{Deserialize, Serialize};

use crate::error::{DataVisError, DataVisResult};
use crate::render::Renderer;

use super::{ControlledSeries, GraphConfig, GraphController, GraphSnapshot};

pub const GRAPH_CONFIG_JSON_SCHEMA_V1: u32 = 1;
pub const GRAPH_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: GraphConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: GraphSnapshot,
}

impl GraphConfig {
    pub fn to_json_contract_v1_pretty(self) -> DataVisResult<String> {
        let payload = GraphConfigJsonContractV1 {
            schema_version: GRAPH_CONFIG_JSON_SCHEMA_V1,
            config: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DataVisError::InvalidData(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Accepts both the bare config and the versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> DataVisResult<Self> {
        if let Ok(config) = serde_json::from_str::<GraphConfig>(input) {
            return Ok(config);
        }
        let payload: GraphConfigJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DataVisError::InvalidData(format!("failed to parse config json payload: {e}"))
        })?;
        if payload.schema_version != GRAPH_CONFIG_JSON_SCHEMA_V1 {
            return Err(DataVisError::InvalidData(format!(
                "unsupported config schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.config)
    }
}

impl GraphSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> DataVisResult<String> {
        let payload = GraphSnapshotJsonContractV1 {
            schema_version: GRAPH_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DataVisError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> DataVisResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<GraphSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: GraphSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DataVisError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != GRAPH_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(DataVisError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<S: ControlledSeries, R: Renderer> GraphController<S, R> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> DataVisResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
