//! One procedure group per entity family.
//!
//! Each group offers typed async methods for in-process callers and a
//! `dispatch` that decodes a JSON input, runs the typed method, and encodes
//! the result. `dispatch` returns `None` for a method the group lacks.

mod audits;
mod evidence;
mod findings;
mod metrics;
mod recommendations;

pub use audits::AuditsRouter;
pub use evidence::EvidenceRouter;
pub use findings::FindingsRouter;
pub use metrics::MetricsRouter;
pub use recommendations::RecommendationsRouter;
