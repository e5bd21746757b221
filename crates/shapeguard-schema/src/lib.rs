//! # shapeguard-schema: Schemas and Recursive Validation
//!
//! Describes the expected shape of an untyped [`Value`](shapeguard_core::Value)
//! and validates inputs against it, producing two trees that mirror the input
//! plus an ordered log of leaf diagnostics.
//!
//! ## Grammar (`grammar`)
//!
//! A [`Schema`] is a [`TypeNode`] (primitive, options, parser, union, array,
//! tuple, object, record) with [`Modifiers`] for `null` and `undefined`.
//! Schemas are built in code with the constructors on [`Schema`], or loaded
//! from JSON/YAML with [`SchemaDocument`].
//!
//! ## Validation (`walk`, `evaluate`)
//!
//! - [`evaluate`] returns an [`Evaluation`]: the [`Outcome`] (result value
//!   or `Invalid`), the [`Validation`] tree, and the [`ValidationMessage`] log.
//! - [`assert_valid`] returns the result value or a [`ValidationError`].
//! - [`get_valid_prop`] reads a child of a validation tree without
//!   checking its shape first.
//!
//! ## Crate Policy
//!
//! - Depends only on `shapeguard-core` internally.
//! - Validation never fails operationally: bad data is reported in the
//!   trees, never as `Err`. [`SchemaError`] covers loading and building
//!   schemas only.

pub mod document;
pub mod error;
pub mod evaluate;
pub mod grammar;
pub mod outcome;
pub mod parser;
pub mod validation;
pub mod walk;

pub use document::{load_value, NodeDocument, SchemaDocument};
pub use error::SchemaError;
pub use evaluate::{assert_valid, evaluate, evaluate_at, Evaluation, ValidationError, ROOT_PATH};
pub use grammar::{KeySchema, Literal, Modifiers, Primitive, Schema, TypeNode};
pub use outcome::Outcome;
pub use parser::{make_parser, Parser, ParserRegistry, ParserResult};
pub use validation::{get_valid_prop, render_messages, Validation, ValidationMessage};
pub use walk::{walk, NO_VALID_UNION, PROPERTY_MISSING};
