//! # Error Types
//!
//! Operational failures: loading schema documents, building schemas from
//! them, and converting results into typed values. Data-level validation
//! failures never surface here; they are recorded in the validation tree.
//! The one bridge is [`SchemaError::Validation`], produced when a caller
//! asks for a typed result from an invalid evaluation.

use thiserror::Error;

use shapeguard_core::ValueError;

use crate::evaluate::ValidationError;

/// Error loading or building a schema, or reading a validated result.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A union must have two or three members.
    #[error("union at '{path}' has {found} members; expected 2 or 3")]
    UnionArity {
        /// Location of the union within the schema document.
        path: String,
        /// Number of members found.
        found: usize,
    },

    /// Record keys must be a primitive or options node with no modifiers.
    #[error("record at '{path}' has an invalid key schema: {reason}")]
    InvalidRecordKey {
        /// Location of the record within the schema document.
        path: String,
        /// Why the key schema was rejected.
        reason: String,
    },

    /// A parser node names a parser that is not registered.
    #[error("parser '{name}' at '{path}' is not registered")]
    UnknownParser {
        /// The parser name.
        name: String,
        /// Location of the node within the schema document.
        path: String,
    },

    /// A document file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the file.
        path: String,
        /// Reason the file could not be loaded.
        reason: String,
    },

    /// Invalid JSON, or a result that does not fit the requested type.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid YAML.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A validated value could not be represented as JSON.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The input did not validate.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
