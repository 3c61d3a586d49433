use anyhow::{Context, bail};
use aud_api::{AppRouter, RpcError};
use aud_config::AudConfig;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `aud call <procedure> [json]`.
///
/// A failed procedure prints its error body on stdout, then fails the
/// command so the process exits non-zero.
pub async fn handle(
    procedure: &str,
    input: Option<&str>,
    config: &AudConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let input = parse_input(input)?;
    let app = AppRouter::open(config)
        .await
        .with_context(|| format!("failed to open database '{}'", config.database.path))?;

    match invoke(&app, procedure, &input).await {
        Ok(value) => output(&value, flags.format),
        Err(error) => {
            output(&error.body(), flags.format)?;
            bail!("{procedure} failed: {error}")
        }
    }
}

pub async fn invoke(app: &AppRouter, procedure: &str, input: &Value) -> Result<Value, RpcError> {
    app.call(procedure, input).await
}

/// Missing input is `null`; anything else must be JSON.
pub fn parse_input(raw: Option<&str>) -> anyhow::Result<Value> {
    match raw {
        None => Ok(Value::Null),
        Some(text) => serde_json::from_str(text).context("procedure input is not valid JSON"),
    }
}
