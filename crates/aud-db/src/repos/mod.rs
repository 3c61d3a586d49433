//! Per-entity repositories.
//!
//! Each module adds typed `list`/`get`/`create`/`update`/`delete` methods to
//! [`crate::service::AudService`] and defines the filter accepted by its
//! `list`.

pub mod audit;
pub mod evidence;
pub mod finding;
pub mod metric;
pub mod recommendation;
pub mod stats;

pub use audit::AuditFilter;
pub use evidence::EvidenceFilter;
pub use finding::FindingFilter;
pub use metric::MetricFilter;
pub use recommendation::RecommendationFilter;
pub use stats::AuditStats;

/// Page size when a filter omits `limit`.
pub const DEFAULT_LIMIT: u32 = 50;

/// `LIMIT`/`OFFSET` of a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    #[must_use]
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

/// `WHERE` clause under construction. Placeholders are numbered by
/// `params.len()` after each push.
#[derive(Debug, Default)]
pub(crate) struct Conditions {
    clauses: Vec<String>,
    params: Vec<libsql::Value>,
}

impl Conditions {
    /// `column = value` when a value is given.
    pub(crate) fn eq(&mut self, column: &str, value: Option<libsql::Value>) {
        if let Some(value) = value {
            self.params.push(value);
            self.clauses.push(format!("{column} = ?{}", self.params.len()));
        }
    }

    /// Substring match of `term` against any of `columns`.
    ///
    /// `LIKE` folds ASCII letters only: `tls` finds `TLS`, but `ü` does not
    /// find `Ü`.
    pub(crate) fn search(&mut self, columns: &[&str], term: Option<&str>) {
        let Some(term) = term else { return };
        self.params
            .push(libsql::Value::Text(format!("%{}%", escape_like(term))));
        let idx = self.params.len();
        let any = columns
            .iter()
            .map(|c| format!("{c} LIKE ?{idx} ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.clauses.push(format!("({any})"));
    }

    pub(crate) fn into_parts(self) -> (String, Vec<libsql::Value>) {
        let where_clause = if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        };
        (where_clause, self.params)
    }
}

pub(crate) fn text(value: Option<impl ToString>) -> Option<libsql::Value> {
    value.map(|v| libsql::Value::Text(v.to_string()))
}

pub(crate) fn integer(value: Option<i64>) -> Option<libsql::Value> {
    value.map(libsql::Value::Integer)
}

/// Escape `LIKE` wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
