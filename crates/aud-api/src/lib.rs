//! # aud-api
//!
//! Procedure layer for the audit service.
//!
//! [`AppRouter`] composes the `audits`, `findings`, `recommendations`,
//! `evidence` and `metrics` groups plus `healthCheck`. In-process callers use
//! the typed group methods (`app.findings().create(&new)`); transports call
//! [`AppRouter::call`] with a dotted path and a JSON input. Failures are
//! [`RpcError`]s with a stable code and a JSON body.
//!
//! ```no_run
//! # async fn demo() -> Result<(), aud_api::RpcError> {
//! use aud_api::AppRouter;
//! use aud_config::AudConfig;
//! use serde_json::json;
//!
//! let config = AudConfig::default();
//! let app = AppRouter::open(&config).await?;
//! let audit = app
//!     .call("audits.create", &json!({ "title": "Q1 Access Review", "type": "internal", "dueDate": "2025-03-31" }))
//!     .await?;
//! println!("{audit}");
//! # Ok(())
//! # }
//! ```

mod error;
pub mod input;
pub mod procedures;
mod router;

pub use error::{ErrorBody, RpcError};
pub use input::DeleteAck;
pub use router::{AppRouter, PROCEDURES};
