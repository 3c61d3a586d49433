//! # aud-schema
//!
//! JSON Schema generation and validation for the persisted audit records.
//!
//! Entity types are defined in `aud-core` with `#[derive(JsonSchema)]`. The
//! select schemas registered here describe the full persisted shape and are
//! used to assert what read operations return; the insert schemas are exported
//! for tooling.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
