//! Unified error types for the planner.
//!
//! Every fallible operation in the crate returns [`Result`]. Data-source failures
//! surface as [`Error::Database`]; local input problems get their own variants so a
//! caller can turn them into a user-visible message.

use crate::core::rows::{EditField, RowId};
use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or input validation failed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// The database layer reported an error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Reading a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable was missing or malformed
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// A buffered value could not be committed because it is not a number
    #[error("Value {value} for {field} on row {row} is not a number")]
    InvalidNumber {
        /// Row whose buffer holds the value
        row: RowId,
        /// Field being committed
        field: EditField,
        /// The offending value
        value: f64,
    },

    /// A row has no annual plan to write back to
    #[error("Row {row} has no annual plan to commit to")]
    MissingBackingPlan {
        /// Row the commit was attempted on
        row: RowId,
    },

    /// No task type with this id exists
    #[error("Task type not found: {id}")]
    TaskTypeNotFound {
        /// Requested id
        id: i64,
    },

    /// No annual plan with this id exists
    #[error("Annual plan not found: {id}")]
    AnnualPlanNotFound {
        /// Requested id
        id: i64,
    },

    /// Club cost share must be a percentage between 0 and 100
    #[error("Invalid club cost share: {value} (expected 0-100)")]
    InvalidCostShare {
        /// Rejected value
        value: f64,
    },

    /// Point values and conversion rates must be finite and non-negative
    #[error("Invalid point value: {value}")]
    InvalidPoints {
        /// Rejected value
        value: f64,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
