//! Error types for tree assembly.

use thiserror::Error;

/// Errors that can occur when building tree values.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A required field was missing or empty.
    #[error("bad format: {field} must not be empty")]
    BadFormat {
        /// Name of the offending field.
        field: &'static str,
    },

    /// An operation name that is not one of CREATE, READ, UPDATE, DELETE, OTHER.
    #[error("unknown operation: {value}")]
    UnknownOperation {
        /// The rejected value.
        value: String,
    },
}
