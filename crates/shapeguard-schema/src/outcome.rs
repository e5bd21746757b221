//! Result of validating one node.

use shapeguard_core::Value;

/// Either the validated (possibly coerced) value, or a failure marker.
///
/// `Valid(Value::Undefined)` is a success: it is what a satisfied
/// `Optional` produces, and it is distinct from `Invalid`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The node validated; this is its result.
    Valid(Value),
    /// The node, or a required descendant, failed.
    Invalid,
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// Borrow the result value, if valid.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid => None,
        }
    }

    /// Take the result value, if valid.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid => None,
        }
    }
}

impl From<Option<Value>> for Outcome {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Invalid, Self::Valid)
    }
}
