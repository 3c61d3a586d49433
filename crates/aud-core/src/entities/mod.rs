//! Entity structs for the persisted audit records.
//!
//! Each entity maps to a table declared in [`crate::schema`]. The plain struct
//! (`Audit`) is the select shape returned by reads; the `New*` struct is the
//! insert shape accepted by `create`, with server-managed fields omitted.
//! All structs serialize with camelCase field names.

mod audit;
mod evidence;
mod finding;
mod metric;
mod recommendation;

pub use audit::{Audit, NewAudit};
pub use evidence::{Evidence, NewEvidence};
pub use finding::{Finding, NewFinding};
pub use metric::{Metric, NewMetric};
pub use recommendation::{NewRecommendation, Recommendation};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::enums::EntityType;
use crate::schema::{Table, table_for};

/// A persisted record described by a [`Table`].
pub trait Record: Serialize + DeserializeOwned {
    const ENTITY: EntityType;

    fn id(&self) -> i64;

    #[must_use]
    fn table() -> &'static Table {
        table_for(Self::ENTITY)
    }
}
