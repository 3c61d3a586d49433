//! # aud-core
//!
//! Core types shared by every crate of the audit-management backend.
//!
//! - Entity structs for audits, findings, recommendations, evidence and metrics
//!   (persisted shape) and their insert shapes
//! - Enumerated value sets with their SQL/wire string forms
//! - The column descriptor: the one declared shape of every table, from which
//!   the storage mapping and the validators are both derived
//! - Partial update structs and builders
//! - Descriptor-driven insert/update validation with field-level errors
//! - Timestamp helpers

pub mod entities;
pub mod enums;
pub mod schema;
pub mod time;
pub mod updates;
pub mod validation;
