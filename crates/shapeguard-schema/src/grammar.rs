//! # Schema Grammar
//!
//! The closed set of schema node kinds and the two modifiers. Pure data: the
//! behavior lives in [`walk`](crate::walk).
//!
//! A [`Schema`] pairs a [`TypeNode`] with [`Modifiers`]:
//!
//! ```text
//! Schema    = (TypeNode, {Nullable?, Optional?})
//! TypeNode  = Primitive(string | number | boolean | unknown | any)
//!           | Options([literal, ...])
//!           | Parser(fn)
//!           | Union(Schema, Schema, Schema?)
//!           | Array(Schema)
//!           | Tuple([Schema, ...])
//!           | Object({name: Schema, ...})
//!           | Record(KeySchema, Schema)
//! KeySchema = Primitive | Options
//! ```
//!
//! Schemas own their children, so a schema tree is finite and acyclic by
//! construction. They are immutable once built and `Send + Sync`; cloning is
//! cheap for parser nodes, which are reference-counted.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use shapeguard_core::Value;

use crate::parser::Parser;

// ─── Leaves ──────────────────────────────────────────────────────────

/// Primitive type checks, by `typeof` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// `typeof input === "string"`.
    String,
    /// `typeof input === "number"`.
    Number,
    /// `typeof input === "boolean"`.
    Boolean,
    /// Any non-null, non-undefined value.
    Unknown,
    /// Any non-null, non-undefined value. Kept apart from `Unknown` for
    /// documentation only.
    Any,
}

impl Primitive {
    /// The type name used in schema text and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Unknown => "unknown",
            Self::Any => "any",
        }
    }

    /// Whether `input` passes this check. Null and undefined are handled by
    /// the modifiers before this is consulted.
    pub fn accepts(&self, input: &Value) -> bool {
        match self {
            Self::String => matches!(input, Value::String(_)),
            Self::Number => matches!(input, Value::Number(_)),
            Self::Boolean => matches!(input, Value::Bool(_)),
            Self::Unknown | Self::Any => true,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal allowed by an `Options` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// A string literal.
    String(String),
    /// A number literal.
    Number(f64),
}

impl Literal {
    /// Strict equality against an input: `"1"` never matches `1`.
    pub fn matches(&self, input: &Value) -> bool {
        self.to_value().strict_eq(input)
    }

    /// The literal as a value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Number(n) => Value::Number(*n),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", Value::Number(*n)),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

// ─── Modifiers ───────────────────────────────────────────────────────

/// Acceptance of `null` and `undefined`, checked before the node itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    /// Accept `null` (result `null`).
    #[serde(default)]
    pub nullable: bool,
    /// Accept `undefined` (result `undefined`; omitted from objects).
    #[serde(default)]
    pub optional: bool,
}

impl Modifiers {
    /// Neither modifier.
    pub const NONE: Self = Self {
        nullable: false,
        optional: false,
    };
}

// ─── Nodes ───────────────────────────────────────────────────────────

/// The key check of a `Record` node. Keys are strings, so only leaf checks
/// make sense here.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySchema {
    /// Keys must pass a primitive check.
    Primitive(Primitive),
    /// Keys form a closed set. Each option must also be present unless the
    /// value schema is `Optional`.
    Options(Vec<Literal>),
}

impl KeySchema {
    /// The key check as a standalone schema with no modifiers.
    pub fn to_schema(&self) -> Schema {
        match self {
            Self::Primitive(p) => Schema::new(TypeNode::Primitive(*p)),
            Self::Options(options) => Schema::new(TypeNode::Options(options.clone())),
        }
    }
}

/// The shape check of a schema node.
#[derive(Debug, Clone)]
pub enum TypeNode {
    /// Primitive `typeof` check.
    Primitive(Primitive),
    /// Membership in a list of literals.
    Options(Vec<Literal>),
    /// Custom validation and coercion.
    Parser(Parser),
    /// Two or three alternatives; the third is optional.
    Union(Box<Schema>, Box<Schema>, Option<Box<Schema>>),
    /// Homogeneous list.
    Array(Box<Schema>),
    /// Fixed-length list with per-position schemas.
    Tuple(Vec<Schema>),
    /// Declared properties, validated in declaration order.
    Object(IndexMap<String, Schema>),
    /// Open map with checked keys and values.
    Record(KeySchema, Box<Schema>),
}

impl TypeNode {
    /// Short name of the node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Primitive(p) => p.as_str(),
            Self::Options(_) => "options",
            Self::Parser(_) => "parser",
            Self::Union(..) => "union",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
            Self::Object(_) => "object",
            Self::Record(..) => "record",
        }
    }
}

/// A schema: a node plus its modifiers.
#[derive(Debug, Clone)]
pub struct Schema {
    /// The shape check.
    pub node: TypeNode,
    /// Null/undefined acceptance.
    pub modifiers: Modifiers,
}

impl Schema {
    /// A schema with no modifiers.
    pub fn new(node: TypeNode) -> Self {
        Self {
            node,
            modifiers: Modifiers::NONE,
        }
    }

    /// A string.
    pub fn string() -> Self {
        Self::new(TypeNode::Primitive(Primitive::String))
    }

    /// A number.
    pub fn number() -> Self {
        Self::new(TypeNode::Primitive(Primitive::Number))
    }

    /// A boolean.
    pub fn boolean() -> Self {
        Self::new(TypeNode::Primitive(Primitive::Boolean))
    }

    /// Any defined, non-null value.
    pub fn unknown() -> Self {
        Self::new(TypeNode::Primitive(Primitive::Unknown))
    }

    /// Any defined, non-null value; same check as [`Schema::unknown`].
    pub fn any() -> Self {
        Self::new(TypeNode::Primitive(Primitive::Any))
    }

    /// One of the given literals.
    pub fn options<I, L>(options: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        Self::new(TypeNode::Options(options.into_iter().map(Into::into).collect()))
    }

    /// A custom leaf check.
    pub fn parser(parser: Parser) -> Self {
        Self::new(TypeNode::Parser(parser))
    }

    /// Either of two schemas; the first that passes supplies the result.
    pub fn union2(first: Schema, second: Schema) -> Self {
        Self::new(TypeNode::Union(Box::new(first), Box::new(second), None))
    }

    /// Any of three schemas.
    pub fn union3(first: Schema, second: Schema, third: Schema) -> Self {
        Self::new(TypeNode::Union(
            Box::new(first),
            Box::new(second),
            Some(Box::new(third)),
        ))
    }

    /// A list whose every element matches `element`.
    pub fn array(element: Schema) -> Self {
        Self::new(TypeNode::Array(Box::new(element)))
    }

    /// A list of exactly these per-position schemas.
    pub fn tuple(items: impl IntoIterator<Item = Schema>) -> Self {
        Self::new(TypeNode::Tuple(items.into_iter().collect()))
    }

    /// An object with properties in the given order.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self::new(TypeNode::Object(
            properties.into_iter().map(|(k, s)| (k.into(), s)).collect(),
        ))
    }

    /// An object whose every key matches `keys` and every value `values`.
    pub fn record(keys: KeySchema, values: Schema) -> Self {
        Self::new(TypeNode::Record(keys, Box::new(values)))
    }

    /// Also accept `null`.
    pub fn nullable(mut self) -> Self {
        self.modifiers.nullable = true;
        self
    }

    /// Also accept `undefined`.
    pub fn optional(mut self) -> Self {
        self.modifiers.optional = true;
        self
    }

    /// Number of nodes in this schema tree, including itself.
    pub fn node_count(&self) -> usize {
        1 + match &self.node {
            TypeNode::Primitive(_) | TypeNode::Options(_) | TypeNode::Parser(_) => 0,
            TypeNode::Union(a, b, c) => {
                a.node_count() + b.node_count() + c.as_ref().map_or(0, |s| s.node_count())
            }
            TypeNode::Array(element) => element.node_count(),
            TypeNode::Tuple(items) => items.iter().map(Schema::node_count).sum(),
            TypeNode::Object(props) => props.values().map(Schema::node_count).sum(),
            // The key check counts as a node.
            TypeNode::Record(_, values) => 1 + values.node_count(),
        }
    }
}

impl fmt::Display for Schema {
    /// Compact type notation, e.g. `{one: number, two: string | null}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            TypeNode::Primitive(p) => write!(f, "{p}")?,
            TypeNode::Options(options) => {
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    match option {
                        Literal::String(s) => write!(f, "{s:?}")?,
                        Literal::Number(_) => write!(f, "{option}")?,
                    }
                }
            }
            TypeNode::Parser(parser) => write!(f, "parser({})", parser.label().unwrap_or("?"))?,
            TypeNode::Union(a, b, c) => {
                write!(f, "({a} | {b}")?;
                if let Some(c) = c {
                    write!(f, " | {c}")?;
                }
                f.write_str(")")?;
            }
            TypeNode::Array(element) => write!(f, "{element}[]")?,
            TypeNode::Tuple(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")?;
            }
            TypeNode::Object(props) => {
                f.write_str("{")?;
                for (i, (name, prop)) in props.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {prop}")?;
                }
                f.write_str("}")?;
            }
            TypeNode::Record(keys, values) => write!(f, "record<{}, {values}>", keys.to_schema())?,
        }
        if self.modifiers.nullable {
            f.write_str(" | null")?;
        }
        if self.modifiers.optional {
            f.write_str(" | undefined")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_accepts() {
        assert!(Primitive::String.accepts(&Value::from("x")));
        assert!(!Primitive::String.accepts(&Value::from(1)));
        assert!(Primitive::Number.accepts(&Value::from(f64::NAN)));
        assert!(!Primitive::Boolean.accepts(&Value::from("true")));
        assert!(Primitive::Unknown.accepts(&Value::Array(vec![])));
        assert!(Primitive::Any.accepts(&Value::from(false)));
    }

    #[test]
    fn test_literal_strict_match() {
        assert!(Literal::from("A").matches(&Value::from("A")));
        assert!(!Literal::from(1).matches(&Value::from("1")));
        assert!(Literal::from(2).matches(&Value::from(2.0)));
    }

    #[test]
    fn test_modifier_builders() {
        let s = Schema::string().nullable();
        assert!(s.modifiers.nullable && !s.modifiers.optional);
        let s = Schema::number().optional().nullable();
        assert!(s.modifiers.nullable && s.modifiers.optional);
        assert_eq!(Schema::boolean().modifiers, Modifiers::NONE);
    }

    #[test]
    fn test_object_keeps_declaration_order() {
        let s = Schema::object([
            ("zeta", Schema::number()),
            ("alpha", Schema::string()),
            ("mid", Schema::boolean()),
        ]);
        let TypeNode::Object(props) = &s.node else {
            panic!("expected object node");
        };
        let names: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_node_count() {
        let s = Schema::object([
            ("one", Schema::number()),
            ("arr", Schema::array(Schema::union2(Schema::string(), Schema::number()))),
            (
                "rec",
                Schema::record(KeySchema::Primitive(Primitive::String), Schema::boolean()),
            ),
        ]);
        // object + one + (array + union + 2) + (record + key + value)
        assert_eq!(s.node_count(), 1 + 1 + 4 + 3);
    }

    #[test]
    fn test_display() {
        let s = Schema::object([
            ("one", Schema::number()),
            ("two", Schema::string().nullable()),
            ("three", Schema::tuple([Schema::options(["A", "B"]), Schema::number()])),
            ("four", Schema::array(Schema::boolean()).optional()),
        ]);
        assert_eq!(
            s.to_string(),
            r#"{one: number, two: string | null, three: ["A" | "B", number], four: boolean[] | undefined}"#
        );
    }

    #[test]
    fn test_key_schema_has_no_modifiers() {
        let key = KeySchema::Options(vec!["A".into(), "B".into()]);
        assert_eq!(key.to_schema().modifiers, Modifiers::NONE);
    }
}
