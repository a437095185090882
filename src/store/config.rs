//! Store configuration

use super::StoreResult;
use serde::{Deserialize, Serialize};

/// Quad store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Prefix of generated blank node labels (`_:b0`, `_:b1`, ...)
    pub blank_node_prefix: String,
    /// Number of quads to reserve room for up front
    pub quad_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            blank_node_prefix: "b".to_string(),
            quad_capacity: 0,
        }
    }
}

impl StoreConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
