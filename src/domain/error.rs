//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeId;

/// Rejected allocation request. The tree is never touched when one of these
/// is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{what} must be a finite number, got {value}")]
    NotFinite { what: &'static str, value: f64 },

    #[error("{what} must not be negative, got {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("no row with id '{0}'")]
    UnknownNode(NodeId),
}

/// Domain errors represent business logic violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("duplicate row id: {0}")]
    DuplicateId(NodeId),

    #[error("row id must not be empty (label: {label})")]
    EmptyId { label: String },

    #[error("invalid value for row '{id}': {value}")]
    InvalidValue { id: NodeId, value: f64 },

    #[error("invalid rounding precision: {0} decimals (max 10)")]
    InvalidPrecision(u32),

    #[error(transparent)]
    Input(#[from] InputError),
}
