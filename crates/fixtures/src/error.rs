use academy::AppError;
use thiserror::Error;

use crate::db::StoreError;

/// Errors that abort a generation run. Any of them rolls back every write of the run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("An account with {field} {value:?} already exists")]
    DuplicateIdentity { field: &'static str, value: String },

    #[error("Could not generate a unique {what} after {attempts} attempts")]
    GenerationExhausted { what: &'static str, attempts: usize },

    #[error("Fixture pool {pool} has {available} entries, {requested} requested")]
    InsufficientFixtureData {
        pool: &'static str,
        available: usize,
        requested: usize,
    },

    #[error("Fixture pools {left} ({left_len}) and {right} ({right_len}) must have equal length")]
    FixtureDataInconsistency {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Password error: {0}")]
    Password(#[from] AppError),
}
