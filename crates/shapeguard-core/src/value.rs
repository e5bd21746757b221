//! # Value Model: Untyped Input and Result Values
//!
//! Defines [`Value`], the dynamically typed tree that the validator consumes
//! and produces. It is a JSON value with one extra state, [`Value::Undefined`],
//! which stands for "absent": a missing object property, an out-of-range
//! tuple slot, or the result of a satisfied `Optional` schema.
//!
//! ## Null vs Undefined
//!
//! The two are distinct throughout. A schema modifier accepts one without
//! accepting the other, so collapsing them would change which inputs pass.
//!
//! ## Diagnostics
//!
//! Error messages quote an input's string coercion (`"2"`, `"1,2"`) and name
//! its type with a `typeof`-style tag. [`Display`] and [`Value::type_of`]
//! define both:
//!
//! | Value              | `type_of()`   | Display           |
//! |--------------------|---------------|-------------------|
//! | `Undefined`        | `undefined`   | `undefined`       |
//! | `Null`             | `object`      | `null`            |
//! | `Bool(true)`       | `boolean`     | `true`            |
//! | `Number(2.0)`      | `number`      | `2`               |
//! | `String("a")`      | `string`      | `a`               |
//! | `Array([1, 2])`    | `object`      | `1,2`             |
//! | `Object({..})`     | `object`      | `[object Object]` |
//!
//! [`Display`]: std::fmt::Display

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValueError;

/// Ordered map used for object values. Iteration follows insertion order.
pub type Map = IndexMap<String, Value>;

/// An untyped value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent. Never produced by parsing JSON.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. All numbers are IEEE-754 doubles, as in JSON.
    Number(f64),
    /// A string.
    String(String),
    /// A list of values.
    Array(Vec<Value>),
    /// A map of string keys to values, in insertion order.
    Object(Map),
}

impl Value {
    /// The `typeof` name of this value.
    ///
    /// Null and arrays report `"object"`, exactly as `typeof` does.
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null | Self::Array(_) | Self::Object(_) => "object",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }

    /// Whether this is [`Value::Undefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric payload, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the list payload, if any.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the object payload, if any.
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Property lookup. Missing properties and non-objects yield `Undefined`,
    /// mirroring `input[prop]`.
    pub fn get(&self, key: &str) -> &Value {
        static UNDEFINED: Value = Value::Undefined;
        match self {
            Self::Object(map) => map.get(key).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// Strict equality (`===`) for scalars.
    ///
    /// `===` compares containers by identity, which has no meaning for owned
    /// trees, so two containers are never strictly equal.
    /// `NaN` is not equal to itself.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }

    /// Convert into a `serde_json::Value`.
    ///
    /// `Undefined` object members are dropped and `Undefined` list items
    /// become `null`, as `JSON.stringify` does. A top-level `Undefined`
    /// becomes `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NonFiniteNumber`] for NaN or infinite numbers.
    pub fn to_json(&self) -> Result<serde_json::Value, ValueError> {
        Ok(match self {
            Self::Undefined | Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Value::Number(json_number(*n)?),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Array(items) => serde_json::Value::Array(
                items.iter().map(Value::to_json).collect::<Result<_, _>>()?,
            ),
            Self::Object(map) => {
                let mut out = serde_json::Map::new();
                for (k, v) in map {
                    if !v.is_undefined() {
                        out.insert(k.clone(), v.to_json()?);
                    }
                }
                serde_json::Value::Object(out)
            }
        })
    }
}

/// Integral values are emitted as integers so `1` does not become `1.0`.
fn json_number(n: f64) -> Result<serde_json::Number, ValueError> {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Ok(serde_json::Number::from(n as i64));
    }
    serde_json::Number::from_f64(n).ok_or(ValueError::NonFiniteNumber(n))
}

// ─── String Coercion ─────────────────────────────────────────────────

/// Shortest round-trip text for a double, switching to exponent form
/// outside `1e-6..1e21`.
fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        // Covers -0, which prints as "0".
        return f.write_str("0");
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return write!(f, "{n}");
    }
    // Positive exponents carry a sign: "1e+21", not "1e21".
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{mantissa}e+{power}"),
        _ => f.write_str(&exp),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => format_number(*n, f),
            Self::String(s) => f.write_str(s),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    // Array.prototype.join renders holes and null as "".
                    if !matches!(item, Self::Undefined | Self::Null) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Object(_) => f.write_str("[object Object]"),
        }
    }
}

// ─── Conversions ─────────────────────────────────────────────────────

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` maps to `Null`, matching serde's treatment of `Option`.
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().collect())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Self::Undefined | Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let defined = map.values().filter(|v| !v.is_undefined()).count();
                let mut out = serializer.serialize_map(Some(defined))?;
                for (k, v) in map.iter().filter(|(_, v)| !v.is_undefined()) {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_of_names() {
        assert_eq!(Value::Undefined.type_of(), "undefined");
        assert_eq!(Value::Null.type_of(), "object");
        assert_eq!(Value::from(true).type_of(), "boolean");
        assert_eq!(Value::from(1).type_of(), "number");
        assert_eq!(Value::from("x").type_of(), "string");
        assert_eq!(Value::Array(vec![]).type_of(), "object");
        assert_eq!(Value::Object(Map::new()).type_of(), "object");
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(Value::from(1).to_string(), "1");
        assert_eq!(Value::from(123.45).to_string(), "123.45");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from(1e21).to_string(), "1e+21");
        assert_eq!(Value::from(1.5e-8).to_string(), "1.5e-8");
    }

    #[test]
    fn test_display_containers() {
        let arr = Value::from(json!([1, "a", null, [2, 3]]));
        assert_eq!(arr.to_string(), "1,a,,2,3");
        let obj = Value::from(json!({"a": 1}));
        assert_eq!(obj.to_string(), "[object Object]");
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_get_missing_property_is_undefined() {
        let obj = Value::from(json!({"one": 1}));
        assert_eq!(obj.get("one"), &Value::from(1));
        assert!(obj.get("two").is_undefined());
        assert!(Value::from(3).get("one").is_undefined());
    }

    #[test]
    fn test_strict_eq() {
        assert!(Value::from("A").strict_eq(&Value::from("A")));
        assert!(!Value::from("1").strict_eq(&Value::from(1)));
        assert!(!Value::from(f64::NAN).strict_eq(&Value::from(f64::NAN)));
        assert!(!Value::Array(vec![]).strict_eq(&Value::Array(vec![])));
        assert!(Value::Null.strict_eq(&Value::Null));
        assert!(!Value::Null.strict_eq(&Value::Undefined));
    }

    #[test]
    fn test_object_key_order_preserved() {
        let obj = Value::from(json!({"b": 1, "a": 2, "c": 3}));
        let keys: Vec<&str> = obj.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_to_json_drops_undefined_members() {
        let mut map = Map::new();
        map.insert("one".into(), Value::from(1));
        map.insert("gone".into(), Value::Undefined);
        map.insert("list".into(), Value::Array(vec![Value::Undefined, Value::from(2.5)]));
        let json = Value::Object(map).to_json().unwrap();
        assert_eq!(json, json!({"one": 1, "list": [null, 2.5]}));
    }

    #[test]
    fn test_to_json_rejects_nan() {
        let err = Value::from(f64::NAN).to_json().unwrap_err();
        assert!(matches!(err, ValueError::NonFiniteNumber(_)));
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let mut map = Map::new();
        map.insert("n".into(), Value::from(3));
        map.insert("u".into(), Value::Undefined);
        let text = serde_json::to_string(&Value::Object(map)).unwrap();
        assert_eq!(text, r#"{"n":3}"#);
    }

    #[test]
    fn test_deserialize_from_yaml_shaped_json() {
        let v: Value = serde_json::from_str(r#"{"a": [true, null, "x"]}"#).unwrap();
        assert_eq!(
            v.get("a"),
            &Value::Array(vec![Value::Bool(true), Value::Null, Value::from("x")])
        );
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
