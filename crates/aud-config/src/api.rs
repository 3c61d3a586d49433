//! Procedure layer settings.

use serde::{Deserialize, Serialize};

/// Page size when a list call omits `limit`.
const fn default_limit() -> u32 {
    50
}

/// Upper bound applied to any requested `limit`.
const fn default_max_limit() -> u32 {
    500
}

const fn default_validate_output() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    #[serde(default = "default_max_limit")]
    pub max_limit: u32,

    /// Check records returned by `get`/`list` against their JSON Schema.
    #[serde(default = "default_validate_output")]
    pub validate_output: bool,
}

impl ApiConfig {
    /// Effective page size for a requested `limit`.
    #[must_use]
    pub fn clamp_limit(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            validate_output: default_validate_output(),
        }
    }
}
