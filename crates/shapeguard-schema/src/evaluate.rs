//! # Top-Level API
//!
//! Entry points that run [`walk`] from the root and package its outputs.
//!
//! - [`evaluate`] never fails: it returns the outcome, the validation tree
//!   and the ordered leaf messages together.
//! - [`assert_valid`] returns the result value, or a [`ValidationError`]
//!   carrying the tree, the messages and a rendered report.
//!
//! ```
//! use serde_json::json;
//! use shapeguard_core::Value;
//! use shapeguard_schema::{assert_valid, Schema};
//!
//! let schema = Schema::object([("one", Schema::number())]);
//! let err = assert_valid(&Value::from(json!({"one": "1"})), &schema).unwrap_err();
//! assert_eq!(err.to_string(), "Validation failed:\nroot.one: \"1\" is not a number.");
//! ```

use serde::de::DeserializeOwned;
use thiserror::Error;

use shapeguard_core::Value;

use crate::error::SchemaError;
use crate::grammar::Schema;
use crate::outcome::Outcome;
use crate::validation::{render_messages, Validation, ValidationMessage};
use crate::walk::walk;

/// Path label of the root value.
pub const ROOT_PATH: &str = "root";

/// Everything one validation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The result value, or `Invalid`.
    pub outcome: Outcome,
    /// Diagnostic tree parallel to the input.
    pub validation: Validation,
    /// Leaf diagnostics in discovery order.
    pub messages: Vec<ValidationMessage>,
}

impl Evaluation {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }

    /// The result value, if valid.
    pub fn value(&self) -> Option<&Value> {
        self.outcome.value()
    }

    /// The messages as `"<path>: <err>"` lines.
    pub fn report(&self) -> String {
        render_messages(&self.messages)
    }

    /// The result value, or the failure as an error.
    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self.outcome {
            Outcome::Valid(value) => Ok(value),
            Outcome::Invalid => Err(ValidationError::new(self.validation, self.messages)),
        }
    }

    /// Deserialize the result value into a caller-defined type.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Validation`] if the evaluation failed;
    /// [`SchemaError::Value`] or [`SchemaError::Json`] if the result does not
    /// convert into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, SchemaError> {
        let value = match &self.outcome {
            Outcome::Valid(value) => value,
            Outcome::Invalid => {
                return Err(ValidationError::new(self.validation.clone(), self.messages.clone()).into())
            }
        };
        Ok(serde_json::from_value(value.to_json()?)?)
    }
}

/// Validate `input` against `schema` with the root labelled `root`.
pub fn evaluate(input: &Value, schema: &Schema) -> Evaluation {
    evaluate_at(input, schema, ROOT_PATH)
}

/// Validate with a caller-chosen root label.
pub fn evaluate_at(input: &Value, schema: &Schema, root: &str) -> Evaluation {
    let mut messages = Vec::new();
    let (outcome, validation) = walk(input, schema, root, &mut messages);

    tracing::debug!(
        root,
        valid = outcome.is_valid(),
        messages = messages.len(),
        "evaluation complete"
    );

    Evaluation {
        outcome,
        validation,
        messages,
    }
}

/// Validate and return the result value, or fail with the diagnostics.
pub fn assert_valid(input: &Value, schema: &Schema) -> Result<Value, ValidationError> {
    evaluate(input, schema).into_result()
}

/// Validation failed. Carries the validation tree and the leaf messages.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Validation failed:\n{report}")]
pub struct ValidationError {
    validation: Validation,
    messages: Vec<ValidationMessage>,
    report: String,
}

impl ValidationError {
    pub fn new(validation: Validation, messages: Vec<ValidationMessage>) -> Self {
        let report = render_messages(&messages);
        Self {
            validation,
            messages,
            report,
        }
    }

    /// The validation tree of the failed evaluation.
    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    /// The leaf messages, in discovery order.
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// The `"<path>: <err>"` lines, without the header.
    pub fn report(&self) -> &str {
        &self.report
    }
}
