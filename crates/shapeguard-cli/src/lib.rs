//! # shapeguard-cli: Command-Line Validation
//!
//! Provides the `shapeguard` binary.
//!
//! ## Subcommands
//!
//! - `shapeguard check`: validate JSON/YAML documents against a schema
//!   document and report every leaf diagnostic.
//! - `shapeguard schema`: load and build a schema document, reporting
//!   its shape.
//!
//! ```bash
//! shapeguard check --schema product.schema.yaml products/*.json
//! shapeguard check --schema product.schema.yaml --format json item.yaml
//! shapeguard -vv schema --schema product.schema.yaml --render
//! ```
//!
//! Exit codes: 0 when every document validates, 1 when any does not,
//! 2 on operational errors (unreadable files, malformed schemas).

pub mod check;
pub mod schema;

use std::path::Path;

use anyhow::{Context, Result};

use shapeguard_schema::{ParserRegistry, Schema, SchemaDocument};

/// Load a schema document and build it against the builtin parsers.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let document = SchemaDocument::from_path(path)
        .with_context(|| format!("failed to load schema document {}", path.display()))?;
    let schema = document
        .build(&ParserRegistry::with_builtins())
        .with_context(|| format!("invalid schema document {}", path.display()))?;

    tracing::info!(
        schema = %path.display(),
        kind = schema.node.kind(),
        nodes = schema.node_count(),
        "loaded schema"
    );
    Ok(schema)
}
