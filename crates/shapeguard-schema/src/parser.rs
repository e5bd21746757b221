//! # Parsers: Custom Validation and Coercion
//!
//! A [`Parser`] is the one extension point of the grammar: any function from
//! the raw input to either a (possibly transformed) value or an error
//! message. The walk passes its result through verbatim.
//!
//! [`make_parser`] adapts a fallible transform `Fn(&Value) -> Result<T, E>`
//! into a parser, turning the error's `Display` text into the diagnostic.
//! This is how branded values are validated:
//!
//! ```
//! use shapeguard_core::Value;
//! use shapeguard_schema::{evaluate, make_parser, Schema};
//!
//! let product_id = make_parser(|input: &Value| match input.as_f64() {
//!     Some(id) if id > 0.0 => Ok(id),
//!     _ => Err("Invalid product ID"),
//! });
//!
//! let eval = evaluate(&Value::from(-1), &Schema::parser(product_id));
//! assert_eq!(eval.messages[0].err, "Invalid product ID");
//! ```
//!
//! [`ParserRegistry`] names parsers so schema documents can refer to them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use shapeguard_core::Value;

/// What a parser returns: the accepted value or a leaf error message.
pub type ParserResult = Result<Value, String>;

type ParseFn = dyn Fn(&Value) -> ParserResult + Send + Sync;

/// A reference-counted custom check.
#[derive(Clone)]
pub struct Parser {
    label: Option<Arc<str>>,
    func: Arc<ParseFn>,
}

impl Parser {
    /// Wrap a function already in parser shape.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value) -> ParserResult + Send + Sync + 'static,
    {
        Self {
            label: None,
            func: Arc::new(func),
        }
    }

    /// Attach a label, shown in `Debug` and schema rendering.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(Arc::from(label.into()));
        self
    }

    /// The label, if one was attached.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Run the parser on a raw input.
    pub fn parse(&self, input: &Value) -> ParserResult {
        (self.func)(input)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Parser")
            .field(&self.label.as_deref().unwrap_or("<anonymous>"))
            .finish()
    }
}

/// Build a parser from a fallible transform.
///
/// `Ok(t)` becomes the node's result; `Err(e)` becomes a leaf error carrying
/// `e.to_string()`.
pub fn make_parser<F, T, E>(transform: F) -> Parser
where
    F: Fn(&Value) -> Result<T, E> + Send + Sync + 'static,
    T: Into<Value>,
    E: fmt::Display,
{
    Parser::new(move |input| transform(input).map(Into::into).map_err(|e| e.to_string()))
}

// ─── Registry ────────────────────────────────────────────────────────

/// Named parsers available to schema documents.
#[derive(Debug, Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, Parser>,
}

impl ParserRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the builtin parsers:
    ///
    /// - `integer`: a number with no fractional part.
    /// - `non_empty_string`: a string with at least one non-whitespace character.
    /// - `trimmed_string`: a string, coerced by trimming surrounding whitespace.
    /// - `numeric_string`: a string holding a number, coerced to that number.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("integer", make_parser(parse_integer));
        registry.register("non_empty_string", make_parser(parse_non_empty_string));
        registry.register("trimmed_string", make_parser(parse_trimmed_string));
        registry.register("numeric_string", make_parser(parse_numeric_string));
        registry
    }

    /// Add or replace a parser. The name becomes its label unless it already
    /// has one.
    pub fn register(&mut self, name: impl Into<String>, parser: Parser) {
        let name = name.into();
        let parser = if parser.label().is_some() {
            parser
        } else {
            parser.with_label(name.clone())
        };
        self.parsers.insert(name, parser);
    }

    /// Look up a parser by name.
    pub fn get(&self, name: &str) -> Option<&Parser> {
        self.parsers.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn parse_integer(input: &Value) -> Result<f64, String> {
    match input {
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 => Ok(*n),
        other => Err(format!("\"{other}\" is not an integer.")),
    }
}

fn parse_non_empty_string(input: &Value) -> Result<String, String> {
    match input {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => Err("String is empty.".to_string()),
        other => Err(format!("\"{other}\" is not a string.")),
    }
}

fn parse_trimmed_string(input: &Value) -> Result<String, String> {
    input
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| format!("\"{input}\" is not a string."))
}

fn parse_numeric_string(input: &Value) -> Result<f64, String> {
    let text = input
        .as_str()
        .ok_or_else(|| format!("\"{input}\" is not a string."))?;
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("\"{text}\" is not a numeric string."))
}
