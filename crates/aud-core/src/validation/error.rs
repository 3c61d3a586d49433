//! Structured validation failures.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IssueKind {
    /// A required field was omitted.
    Missing,
    /// `null` supplied for a non-nullable field.
    Null,
    /// Empty string where a non-empty value is required.
    Empty,
    /// Wrong JSON type, or an unparseable timestamp.
    InvalidType { expected: &'static str },
    /// Value outside the enumerated set.
    InvalidEnum { allowed: &'static [&'static str] },
    /// Server-managed or immutable field supplied in an update.
    ReadOnly,
    /// Input that could not be interpreted at all.
    Malformed { detail: String },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("is required"),
            Self::Null => f.write_str("must not be null"),
            Self::Empty => f.write_str("must not be empty"),
            Self::InvalidType { expected } => write!(f, "expected {expected}"),
            Self::InvalidEnum { allowed } => write!(f, "must be one of: {}", allowed.join(", ")),
            Self::ReadOnly => f.write_str("cannot be changed"),
            Self::Malformed { detail } => f.write_str(detail),
        }
    }
}

/// A rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    #[serde(flatten)]
    pub kind: IssueKind,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, kind: IssueKind) -> Self {
        let field = field.into();
        let message = format!("{field} {kind}");
        Self {
            field,
            kind,
            message,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every violated field of one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("validation failed: {}", join(.issues))]
pub struct ValidationErrors {
    pub issues: Vec<FieldIssue>,
}

fn join(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    #[must_use]
    pub fn single(field: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            issues: vec![FieldIssue::new(field, kind)],
        }
    }

    /// Input that could not be decoded into the target shape.
    #[must_use]
    pub fn malformed(field: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self::single(
            field,
            IssueKind::Malformed {
                detail: detail.to_string(),
            },
        )
    }

    pub fn push(&mut self, field: impl Into<String>, kind: IssueKind) {
        self.issues.push(FieldIssue::new(field, kind));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Names of the rejected fields, in report order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.field.as_str()).collect()
    }

    /// The issue reported for `field`, if any.
    #[must_use]
    pub fn issue_for(&self, field: &str) -> Option<&IssueKind> {
        self.issues
            .iter()
            .find(|i| i.field == field)
            .map(|i| &i.kind)
    }

    /// `Ok(())` when nothing was collected.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one issue was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}
