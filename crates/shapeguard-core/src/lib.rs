//! # shapeguard-core: Foundational Types
//!
//! The value model shared by every shapeguard crate. It depends on nothing
//! internal; `shapeguard-schema` builds the validator on top of it.
//!
//! ## Key Design Principles
//!
//! 1. **One untyped value type.** [`Value`] is the input to validation and
//!    the output of it. Parsers may return any `Value`, so coercion needs no
//!    second representation.
//!
//! 2. **Absent is not null.** [`Value::Undefined`] is a first-class state;
//!    `Optional` and `Nullable` schema modifiers accept exactly one of them.
//!
//! 3. **Stable diagnostics.** `type_of()` and `Display` follow `typeof` and
//!    string-coercion rules; diagnostics embed them verbatim.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod value;

pub use error::ValueError;
pub use value::{Map, Value};
