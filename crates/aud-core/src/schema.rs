//! Column descriptor: the single declared shape of every persisted table.
//!
//! Each [`Table`] lists its columns with SQL name, wire field name, kind,
//! nullability, non-empty rule, default, foreign key, and role. The storage
//! layer builds its DDL, column lists and row mapping from these tables, and
//! [`crate::validation`] builds its insert/update rules from the same data.
//!
//! Tables are listed parent-first in [`TABLES`]. Cascade order (children
//! before parents) is derived from the foreign keys via [`dependents_of`].

use std::fmt::Write as _;

use crate::enums::{
    AuditStatus, AuditType, EntityType, EvidenceStatus, FindingStatus, Priority,
    RecommendationStatus,
};

/// Storage and validation kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
    /// RFC 3339 TEXT in storage, string on the wire.
    Timestamp,
    /// TEXT restricted to the listed values.
    Enum(&'static [&'static str]),
}

impl ColumnKind {
    #[must_use]
    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text | Self::Timestamp | Self::Enum(_) => "TEXT",
        }
    }

    /// Human-readable description of the accepted JSON input.
    #[must_use]
    pub const fn expected(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Real => "number",
            Self::Text | Self::Enum(_) => "string",
            Self::Timestamp => "RFC 3339 timestamp or YYYY-MM-DD date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Store-assigned integer key.
    PrimaryKey,
    /// Timestamp stamped by the service (`createdAt`, `updatedAt`, `recordedAt`).
    Managed,
    /// Caller-supplied data.
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced table name (always its `id` column).
    pub table: &'static str,
    pub on_delete: OnDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// SQL column name.
    pub name: &'static str,
    /// Wire / serde field name.
    pub field: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    /// Strings must have at least one character.
    pub non_empty: bool,
    /// Applied when an insert payload omits the field.
    pub default: Option<&'static str>,
    pub references: Option<ForeignKey>,
    pub role: Role,
    /// Cannot be changed by an update once set on insert.
    pub immutable: bool,
}

impl Column {
    const fn data(name: &'static str, field: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            field,
            kind,
            nullable: true,
            non_empty: false,
            default: None,
            references: None,
            role: Role::Data,
            immutable: false,
        }
    }

    const fn id() -> Self {
        Self {
            nullable: false,
            role: Role::PrimaryKey,
            immutable: true,
            ..Self::data("id", "id", ColumnKind::Integer)
        }
    }

    const fn managed(name: &'static str, field: &'static str) -> Self {
        Self {
            nullable: false,
            role: Role::Managed,
            immutable: true,
            ..Self::data(name, field, ColumnKind::Timestamp)
        }
    }

    const fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    const fn non_empty(mut self) -> Self {
        self.nullable = false;
        self.non_empty = true;
        self
    }

    const fn default_value(mut self, value: &'static str) -> Self {
        self.nullable = false;
        self.default = Some(value);
        self
    }

    const fn references(mut self, table: &'static str) -> Self {
        self.references = Some(ForeignKey {
            table,
            on_delete: OnDelete::Cascade,
        });
        self
    }

    const fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    /// Must be present in an insert payload.
    #[must_use]
    pub const fn is_required_on_insert(&self) -> bool {
        matches!(self.role, Role::Data) && !self.nullable && self.default.is_none()
    }

    /// Accepted from callers (insert or update).
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(self.role, Role::Data)
    }

    fn ddl(&self) -> String {
        let mut out = format!("{} {}", self.name, self.kind.sql_type());
        if matches!(self.role, Role::PrimaryKey) {
            out.push_str(" PRIMARY KEY AUTOINCREMENT");
            return out;
        }
        if !self.nullable {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = self.default {
            let _ = write!(out, " DEFAULT '{default}'");
        }
        if let Some(fk) = self.references {
            let action = match fk.on_delete {
                OnDelete::Cascade => "CASCADE",
            };
            let _ = write!(out, " REFERENCES {}(id) ON DELETE {action}", fk.table);
        }
        if let ColumnKind::Enum(values) = self.kind {
            let list = values
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(out, " CHECK ({} IN ({list}))", self.name);
        }
        if self.non_empty {
            let _ = write!(out, " CHECK (length({}) > 0)", self.name);
        }
        out
    }
}

/// A persisted table.
#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub entity: EntityType,
    pub columns: &'static [Column],
}

impl Table {
    /// Look up a column by its wire field name.
    #[must_use]
    pub fn column(&self, field: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Look up a column by its SQL name.
    #[must_use]
    pub fn column_by_name(&self, name: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Comma-separated SQL column names in declaration order.
    #[must_use]
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Columns accepted from callers.
    pub fn writable_columns(&self) -> impl Iterator<Item = &'static Column> {
        self.columns.iter().filter(|c| c.is_writable())
    }

    /// Columns carrying a foreign key.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &'static Column> {
        self.columns.iter().filter(|c| c.references.is_some())
    }

    /// Whether the table has a `updated_at` column refreshed on mutation.
    #[must_use]
    pub fn tracks_updates(&self) -> bool {
        self.column_by_name("updated_at").is_some()
    }

    /// `CREATE TABLE IF NOT EXISTS` statement.
    #[must_use]
    pub fn create_table_sql(&self) -> String {
        let body = self
            .columns
            .iter()
            .map(|c| format!("    {}", c.ddl()))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("CREATE TABLE IF NOT EXISTS {} (\n{body}\n);", self.name)
    }

    /// One `CREATE INDEX IF NOT EXISTS` per foreign-key column.
    #[must_use]
    pub fn index_sql(&self) -> Vec<String> {
        self.foreign_keys()
            .map(|c| {
                format!(
                    "CREATE INDEX IF NOT EXISTS idx_{table}_{col} ON {table}({col});",
                    table = self.name,
                    col = c.name
                )
            })
            .collect()
    }
}

pub static AUDITS: Table = Table {
    name: "audits",
    entity: EntityType::Audit,
    columns: &[
        Column::id(),
        Column::data("title", "title", ColumnKind::Text).non_empty(),
        Column::data("description", "description", ColumnKind::Text),
        Column::data("type", "type", ColumnKind::Enum(AuditType::VALUES)).required(),
        Column::data("status", "status", ColumnKind::Enum(AuditStatus::VALUES))
            .default_value("planned"),
        Column::data("priority", "priority", ColumnKind::Enum(Priority::VALUES))
            .default_value("medium"),
        Column::data("start_date", "startDate", ColumnKind::Timestamp),
        Column::data("end_date", "endDate", ColumnKind::Timestamp),
        Column::data("due_date", "dueDate", ColumnKind::Timestamp).required(),
        Column::data("auditor_id", "auditorId", ColumnKind::Text),
        Column::data("department", "department", ColumnKind::Text),
        Column::data("scope", "scope", ColumnKind::Text),
        Column::managed("created_at", "createdAt"),
        Column::managed("updated_at", "updatedAt"),
    ],
};

pub static FINDINGS: Table = Table {
    name: "audit_findings",
    entity: EntityType::Finding,
    columns: &[
        Column::id(),
        Column::data("audit_id", "auditId", ColumnKind::Integer)
            .required()
            .references("audits")
            .immutable(),
        Column::data("title", "title", ColumnKind::Text).non_empty(),
        Column::data("description", "description", ColumnKind::Text).non_empty(),
        Column::data("risk_level", "riskLevel", ColumnKind::Enum(Priority::VALUES))
            .default_value("medium"),
        Column::data("category", "category", ColumnKind::Text),
        Column::data("status", "status", ColumnKind::Enum(FindingStatus::VALUES))
            .default_value("open"),
        Column::data("recommendation", "recommendation", ColumnKind::Text),
        Column::data("assigned_to", "assignedTo", ColumnKind::Text),
        Column::data("due_date", "dueDate", ColumnKind::Timestamp),
        Column::data("resolved_date", "resolvedDate", ColumnKind::Timestamp),
        Column::managed("created_at", "createdAt"),
        Column::managed("updated_at", "updatedAt"),
    ],
};

pub static RECOMMENDATIONS: Table = Table {
    name: "audit_recommendations",
    entity: EntityType::Recommendation,
    columns: &[
        Column::id(),
        Column::data("finding_id", "findingId", ColumnKind::Integer)
            .required()
            .references("audit_findings")
            .immutable(),
        Column::data("description", "description", ColumnKind::Text).non_empty(),
        Column::data("priority", "priority", ColumnKind::Enum(Priority::VALUES))
            .default_value("medium"),
        Column::data(
            "status",
            "status",
            ColumnKind::Enum(RecommendationStatus::VALUES),
        )
        .default_value("pending"),
        Column::data("assigned_to", "assignedTo", ColumnKind::Text),
        Column::data("due_date", "dueDate", ColumnKind::Timestamp),
        Column::data("completed_date", "completedDate", ColumnKind::Timestamp),
        Column::managed("created_at", "createdAt"),
        Column::managed("updated_at", "updatedAt"),
    ],
};

pub static EVIDENCE: Table = Table {
    name: "audit_evidence",
    entity: EntityType::Evidence,
    columns: &[
        Column::id(),
        Column::data("audit_id", "auditId", ColumnKind::Integer)
            .required()
            .references("audits")
            .immutable(),
        Column::data("finding_id", "findingId", ColumnKind::Integer).references("audit_findings"),
        Column::data("title", "title", ColumnKind::Text).non_empty(),
        Column::data("description", "description", ColumnKind::Text),
        Column::data("file_path", "filePath", ColumnKind::Text),
        Column::data("file_type", "fileType", ColumnKind::Text),
        Column::data("status", "status", ColumnKind::Enum(EvidenceStatus::VALUES))
            .default_value("submitted"),
        Column::data("uploaded_by", "uploadedBy", ColumnKind::Text),
        Column::managed("created_at", "createdAt"),
        Column::managed("updated_at", "updatedAt"),
    ],
};

pub static METRICS: Table = Table {
    name: "audit_metrics",
    entity: EntityType::Metric,
    columns: &[
        Column::id(),
        Column::data("audit_id", "auditId", ColumnKind::Integer)
            .required()
            .references("audits")
            .immutable(),
        Column::data("metric_type", "metricType", ColumnKind::Text).required(),
        Column::data("value", "value", ColumnKind::Real).required(),
        Column::data("target_value", "targetValue", ColumnKind::Real),
        Column::data("unit", "unit", ColumnKind::Text),
        Column::managed("recorded_at", "recordedAt"),
    ],
};

/// All tables, parents before children.
pub static TABLES: [&Table; 5] = [&AUDITS, &FINDINGS, &RECOMMENDATIONS, &EVIDENCE, &METRICS];

/// Descriptor of the table storing `entity`.
#[must_use]
pub const fn table_for(entity: EntityType) -> &'static Table {
    match entity {
        EntityType::Audit => &AUDITS,
        EntityType::Finding => &FINDINGS,
        EntityType::Recommendation => &RECOMMENDATIONS,
        EntityType::Evidence => &EVIDENCE,
        EntityType::Metric => &METRICS,
    }
}

/// Look up a table by its SQL name.
#[must_use]
pub fn table_named(name: &str) -> Option<&'static Table> {
    TABLES.iter().copied().find(|t| t.name == name)
}

/// Child tables referencing `parent`, with the referencing column.
#[must_use]
pub fn dependents_of(parent: &Table) -> Vec<(&'static Table, &'static Column)> {
    TABLES
        .iter()
        .flat_map(|table| {
            table
                .foreign_keys()
                .filter(|c| c.references.is_some_and(|fk| fk.table == parent.name))
                .map(move |c| (*table, c))
        })
        .collect()
}
