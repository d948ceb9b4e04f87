//! Error types for the conversion pipeline

use thiserror::Error;

/// Every failure is fatal for the run: nothing is written when one is returned.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("missing arguments")]
    MissingArguments,

    #[error("maximum recursion depth reached (limit {limit}) while resolving group '{group_id}'")]
    RecursionLimit { group_id: String, limit: usize },

    #[error("unknown group id '{group_id}'")]
    UnknownGroup { group_id: String },

    #[error("group record on line {line} has no group_id")]
    MissingGroupId { line: usize },

    #[error("input contains no header row")]
    EmptyInput,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
