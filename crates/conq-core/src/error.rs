use thiserror::Error;

use crate::UnitId;

/// Errors surfaced by the unit AI crates.
///
/// Expected domain outcomes (no route, no target, idle unit) are not errors and never show up
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    #[error("grid has no cells")]
    EmptyGrid,

    #[error("grid row {row} has {found} columns, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type AiResult<T> = Result<T, AiError>;
