//! # Schema Documents
//!
//! Schemas described as data, loaded from JSON or YAML and built into a
//! [`Schema`]. Every node is a map with a `type` tag and optional
//! `nullable`/`optional` flags:
//!
//! ```yaml
//! type: object
//! properties:
//!   id:    { type: parser, name: integer }
//!   code:  { type: options, values: [A, B, C] }
//!   tags:  { type: array, items: { type: string } }
//!   pair:  { type: tuple, items: [{ type: string }, { type: number }] }
//!   extra: { type: record, keys: { type: string }, values: { type: any }, optional: true }
//!   either:
//!     type: union
//!     members: [{ type: string }, { type: number }]
//! ```
//!
//! Property order is preserved. Parser nodes are resolved by name through a
//! [`ParserRegistry`]; building fails if a name is not registered.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use shapeguard_core::Value;

use crate::error::SchemaError;
use crate::grammar::{KeySchema, Literal, Modifiers, Primitive, Schema, TypeNode};
use crate::parser::ParserRegistry;

/// A schema node as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// The node shape, tagged by `type`.
    #[serde(flatten)]
    pub node: NodeDocument,
    /// `nullable` / `optional` flags.
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

/// The node shapes a document can describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeDocument {
    String,
    Number,
    Boolean,
    Unknown,
    Any,
    Options {
        values: Vec<Literal>,
    },
    Parser {
        name: String,
    },
    Union {
        members: Vec<SchemaDocument>,
    },
    Array {
        items: Box<SchemaDocument>,
    },
    Tuple {
        items: Vec<SchemaDocument>,
    },
    Object {
        properties: IndexMap<String, SchemaDocument>,
    },
    Record {
        keys: Box<SchemaDocument>,
        values: Box<SchemaDocument>,
    },
}

impl SchemaDocument {
    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a document from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a document from a file; `.yaml`/`.yml` is read as YAML, anything
    /// else as JSON.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let text = read_file(path)?;
        if is_yaml(path) {
            Self::from_yaml_str(&text)
        } else {
            Self::from_json_str(&text)
        }
        .map_err(|e| SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Build the schema, resolving parser names through `registry`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnionArity`], [`SchemaError::InvalidRecordKey`] or
    /// [`SchemaError::UnknownParser`], each tagged with the offending node's
    /// location in the document (`$`, `$.properties.name`, `$.items[0]`, ...).
    pub fn build(&self, registry: &ParserRegistry) -> Result<Schema, SchemaError> {
        let schema = self.build_at("$", registry)?;
        tracing::debug!(nodes = schema.node_count(), "built schema from document");
        Ok(schema)
    }

    fn build_at(&self, path: &str, registry: &ParserRegistry) -> Result<Schema, SchemaError> {
        let node = match &self.node {
            NodeDocument::String => TypeNode::Primitive(Primitive::String),
            NodeDocument::Number => TypeNode::Primitive(Primitive::Number),
            NodeDocument::Boolean => TypeNode::Primitive(Primitive::Boolean),
            NodeDocument::Unknown => TypeNode::Primitive(Primitive::Unknown),
            NodeDocument::Any => TypeNode::Primitive(Primitive::Any),
            NodeDocument::Options { values } => TypeNode::Options(values.clone()),
            NodeDocument::Parser { name } => {
                let parser = registry.get(name).ok_or_else(|| SchemaError::UnknownParser {
                    name: name.clone(),
                    path: path.to_string(),
                })?;
                TypeNode::Parser(parser.clone())
            }
            NodeDocument::Union { members } => {
                let mut built = members
                    .iter()
                    .enumerate()
                    .map(|(i, m)| m.build_at(&format!("{path}.members[{i}]"), registry))
                    .collect::<Result<Vec<_>, _>>()?
                    .into_iter()
                    .map(Box::new);
                match (built.next(), built.next(), built.next(), built.next()) {
                    (Some(first), Some(second), third, None) => {
                        TypeNode::Union(first, second, third)
                    }
                    _ => {
                        return Err(SchemaError::UnionArity {
                            path: path.to_string(),
                            found: members.len(),
                        })
                    }
                }
            }
            NodeDocument::Array { items } => {
                TypeNode::Array(Box::new(items.build_at(&format!("{path}.items"), registry)?))
            }
            NodeDocument::Tuple { items } => TypeNode::Tuple(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| item.build_at(&format!("{path}.items[{i}]"), registry))
                    .collect::<Result<_, _>>()?,
            ),
            NodeDocument::Object { properties } => TypeNode::Object(
                properties
                    .iter()
                    .map(|(name, prop)| {
                        prop.build_at(&format!("{path}.properties.{name}"), registry)
                            .map(|schema| (name.clone(), schema))
                    })
                    .collect::<Result<_, _>>()?,
            ),
            NodeDocument::Record { keys, values } => TypeNode::Record(
                keys.key_schema(&format!("{path}.keys"))?,
                Box::new(values.build_at(&format!("{path}.values"), registry)?),
            ),
        };
        Ok(Schema {
            node,
            modifiers: self.modifiers,
        })
    }

    fn key_schema(&self, path: &str) -> Result<KeySchema, SchemaError> {
        let invalid = |reason: &str| SchemaError::InvalidRecordKey {
            path: path.to_string(),
            reason: reason.to_string(),
        };
        if self.modifiers != Modifiers::NONE {
            return Err(invalid("key schemas cannot be nullable or optional"));
        }
        match &self.node {
            NodeDocument::String => Ok(KeySchema::Primitive(Primitive::String)),
            NodeDocument::Number => Ok(KeySchema::Primitive(Primitive::Number)),
            NodeDocument::Boolean => Ok(KeySchema::Primitive(Primitive::Boolean)),
            NodeDocument::Unknown => Ok(KeySchema::Primitive(Primitive::Unknown)),
            NodeDocument::Any => Ok(KeySchema::Primitive(Primitive::Any)),
            NodeDocument::Options { values } => Ok(KeySchema::Options(values.clone())),
            _ => Err(invalid("expected a primitive or options node")),
        }
    }
}

/// Load an input document (JSON or YAML, by extension) as a [`Value`].
pub fn load_value(path: &Path) -> Result<Value, SchemaError> {
    let text = read_file(path)?;
    let parsed = if is_yaml(path) {
        serde_yaml::from_str::<Value>(&text).map_err(SchemaError::from)
    } else {
        serde_json::from_str::<Value>(&text).map_err(SchemaError::from)
    };
    parsed.map_err(|e| SchemaError::DocumentLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn read_file(path: &Path) -> Result<String, SchemaError> {
    std::fs::read_to_string(path).map_err(|e| SchemaError::DocumentLoad {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}
