//! # Validation Trees and Messages
//!
//! A [`Validation`] runs parallel to the result value and records where
//! validation failed:
//!
//! - [`Validation::Clean`]: no error at or below this node (`null`).
//! - [`Validation::Leaf`]: this node's own check failed (a string).
//! - [`Validation::List`] / [`Validation::Map`]: a container node; each
//!   entry is the validation of the matching child.
//!
//! Serialized, the tree is plain JSON: `null`, strings, arrays and objects.
//!
//! Leaf errors are also collected into a flat, ordered list of
//! [`ValidationMessage`]s tagged with a dotted/bracketed path such as
//! `root.nested.arr[1]`.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// The diagnostic tree of one validated node.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Validation {
    /// No error here.
    #[default]
    Clean,
    /// This node's own check failed with a message.
    Leaf(String),
    /// Per-index validations of an array or tuple.
    List(Vec<Validation>),
    /// Per-key validations of an object or record.
    Map(IndexMap<String, Validation>),
}

impl Validation {
    /// Drill into a named child.
    ///
    /// - `Clean` yields `Clean`: nothing below it failed.
    /// - `Leaf` yields the same leaf: a failure at an ancestor carries no
    ///   per-property detail, so it applies to every child.
    /// - `Map` yields the entry, or `Clean` if absent.
    /// - `List` yields the entry at `name` parsed as an index, or `Clean`.
    pub fn prop(&self, name: &str) -> &Validation {
        static CLEAN: Validation = Validation::Clean;
        match self {
            Self::Clean => &CLEAN,
            Self::Leaf(_) => self,
            Self::Map(entries) => entries.get(name).unwrap_or(&CLEAN),
            Self::List(items) => name
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i))
                .unwrap_or(&CLEAN),
        }
    }

    /// Drill into a list position; same rules as [`prop`](Self::prop).
    pub fn index(&self, i: usize) -> &Validation {
        static CLEAN: Validation = Validation::Clean;
        match self {
            Self::Leaf(_) => self,
            Self::List(items) => items.get(i).unwrap_or(&CLEAN),
            Self::Clean | Self::Map(_) => &CLEAN,
        }
    }

    /// The leaf message, if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether any leaf exists at or below this node.
    pub fn has_errors(&self) -> bool {
        match self {
            Self::Clean => false,
            Self::Leaf(_) => true,
            Self::List(items) => items.iter().any(Validation::has_errors),
            Self::Map(entries) => entries.values().any(Validation::has_errors),
        }
    }

    /// All leaf messages in pre-order, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Clean => {}
            Self::Leaf(message) => out.push(message),
            Self::List(items) => items.iter().for_each(|v| v.collect_leaves(out)),
            Self::Map(entries) => entries.values().for_each(|v| v.collect_leaves(out)),
        }
    }
}

/// Free-function form of [`Validation::prop`].
pub fn get_valid_prop<'a>(validation: &'a Validation, name: &str) -> &'a Validation {
    validation.prop(name)
}

/// One leaf diagnostic and where it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    /// Path from the root, e.g. `root.items[2].name`.
    pub path: String,
    /// The leaf error text.
    pub err: String,
}

impl ValidationMessage {
    pub fn new(path: impl Into<String>, err: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            err: err.into(),
        }
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.err)
    }
}

/// Render messages as `"<path>: <err>"` lines joined by newlines.
pub fn render_messages(messages: &[ValidationMessage]) -> String {
    messages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
