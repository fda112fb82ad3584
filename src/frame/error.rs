//! Dataframe engine errors

use super::value::DataType;
use graphframe_algorithms::PageRankError;
use thiserror::Error;

/// Errors raised by the execution engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("Type mismatch in column '{column}': expected {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        found: &'static str,
    },

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Row has {found} values, schema has {expected} columns")]
    ArityMismatch { expected: usize, found: usize },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Algorithm error: {0}")]
    Algorithm(#[from] PageRankError),
}

pub type EngineResult<T> = Result<T, EngineError>;
