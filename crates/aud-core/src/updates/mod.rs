//! Partial update types for entity mutations.
//!
//! Each update struct has `Option` fields; only `Some` fields are written.
//! Nullable columns use `Option<Option<T>>`: `None` leaves the column alone,
//! `Some(None)` clears it. On the wire an absent key is `None` and an explicit
//! `null` is `Some(None)`.

mod audit;
mod evidence;
mod finding;
mod recommendation;

pub use audit::{AuditUpdate, AuditUpdateBuilder};
pub use evidence::{EvidenceUpdate, EvidenceUpdateBuilder};
pub use finding::{FindingUpdate, FindingUpdateBuilder};
pub use recommendation::{RecommendationUpdate, RecommendationUpdateBuilder};

use serde::{Deserialize, Deserializer};

/// Deserialize a present value (including `null`) as `Some(..)`.
///
/// Paired with `#[serde(default)]` so an absent key stays `None`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
