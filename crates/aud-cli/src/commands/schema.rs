use anyhow::anyhow;
use aud_schema::SchemaRegistry;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `aud schema [name]`.
pub fn handle(name: Option<&str>, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    output(&lookup(&registry, name)?, flags.format)
}

/// The named schema, or the list of names when `name` is `None`.
fn lookup(registry: &SchemaRegistry, name: Option<&str>) -> anyhow::Result<Value> {
    let Some(name) = name else {
        return Ok(Value::from(registry.list()));
    };
    registry.get(name).cloned().ok_or_else(|| {
        anyhow!(
            "unknown schema '{name}' (available: {})",
            registry.list().join(", ")
        )
    })
}
