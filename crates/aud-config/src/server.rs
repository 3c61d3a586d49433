//! Location of the procedure endpoint as seen by client bindings.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://localhost:3000".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Base URL of the service.
    #[serde(default = "default_url")]
    pub url: String,
}

impl ServerConfig {
    /// Procedure endpoint: `{url}/rpc`.
    #[must_use]
    pub fn rpc_url(&self) -> String {
        format!("{}/rpc", self.url.trim_end_matches('/'))
    }

    pub(crate) fn has_http_scheme(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}
