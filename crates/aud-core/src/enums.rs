//! Enumerated value sets for the audit domain.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! which is also the form stored in SQL. `VALUES` lists the accepted strings in
//! declaration order and feeds the column descriptor, so the validator and the
//! storage layer agree on the value set.
//!
//! Status fields are plain enumerations: any member may follow any other.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// AuditType
// ---------------------------------------------------------------------------

/// Kind of audit being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditType {
    Internal,
    External,
    Compliance,
    Security,
    Financial,
    Operational,
}

impl AuditType {
    pub const VALUES: &'static [&'static str] = &[
        "internal",
        "external",
        "compliance",
        "security",
        "financial",
        "operational",
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
            Self::Compliance => "compliance",
            Self::Security => "security",
            Self::Financial => "financial",
            Self::Operational => "operational",
        }
    }
}

impl fmt::Display for AuditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an audit. New audits start as `planned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Planned,
    InProgress,
    Completed,
    Overdue,
    Cancelled,
}

impl AuditStatus {
    pub const VALUES: &'static [&'static str] =
        &["planned", "in_progress", "completed", "overdue", "cancelled"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Four-level severity scale.
///
/// Used as the priority of audits and recommendations and as the risk level
/// of findings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const VALUES: &'static [&'static str] = &["low", "medium", "high", "critical"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FindingStatus
// ---------------------------------------------------------------------------

/// Remediation status of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
    AcceptedRisk,
}

impl FindingStatus {
    pub const VALUES: &'static [&'static str] =
        &["open", "in_progress", "resolved", "closed", "accepted_risk"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::AcceptedRisk => "accepted_risk",
        }
    }
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecommendationStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Pending,
    InProgress,
    Completed,
    Rejected,
}

impl RecommendationStatus {
    pub const VALUES: &'static [&'static str] =
        &["pending", "in_progress", "completed", "rejected"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EvidenceStatus
// ---------------------------------------------------------------------------

/// Review status of a piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStatus {
    Submitted,
    Reviewed,
    Accepted,
    Rejected,
}

impl EvidenceStatus {
    pub const VALUES: &'static [&'static str] = &["submitted", "reviewed", "accepted", "rejected"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Reviewed => "reviewed",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for EvidenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// The five persisted entity kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Audit,
    Finding,
    Recommendation,
    Evidence,
    Metric,
}

impl EntityType {
    pub const ALL: [Self; 5] = [
        Self::Audit,
        Self::Finding,
        Self::Recommendation,
        Self::Evidence,
        Self::Metric,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audit => "audit",
            Self::Finding => "finding",
            Self::Recommendation => "recommendation",
            Self::Evidence => "evidence",
            Self::Metric => "metric",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A string outside an enum's value set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! parse_from_str {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$(Self::$variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: stringify!($ty),
                        value: s.to_string(),
                    })
            }
        }
    };
}

parse_from_str!(AuditType { Internal, External, Compliance, Security, Financial, Operational });
parse_from_str!(AuditStatus { Planned, InProgress, Completed, Overdue, Cancelled });
parse_from_str!(Priority { Low, Medium, High, Critical });
parse_from_str!(FindingStatus { Open, InProgress, Resolved, Closed, AcceptedRisk });
parse_from_str!(RecommendationStatus { Pending, InProgress, Completed, Rejected });
parse_from_str!(EvidenceStatus { Submitted, Reviewed, Accepted, Rejected });
parse_from_str!(EntityType { Audit, Finding, Recommendation, Evidence, Metric });
