//! # Schema Subcommand
//!
//! Loads and builds a schema document without validating anything, so a
//! malformed document (unknown parser, bad union arity, invalid record key)
//! fails fast in CI.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use shapeguard_schema::{ParserRegistry, Schema};

/// Arguments for the `shapeguard schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Schema document (JSON, or YAML by `.yaml`/`.yml` extension).
    #[arg(long, value_name = "FILE", required_unless_present = "list_parsers")]
    pub schema: Option<PathBuf>,

    /// Also print the schema in compact type notation.
    #[arg(long)]
    pub render: bool,

    /// List the parser names schema documents may reference, then exit.
    #[arg(long, conflicts_with = "render")]
    pub list_parsers: bool,
}

/// Execute the schema subcommand.
///
/// Returns exit code 0; a document that fails to build is an error.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    if args.list_parsers {
        for name in ParserRegistry::with_builtins().names() {
            println!("{name}");
        }
        return Ok(0);
    }

    let Some(path) = &args.schema else {
        bail!("--schema is required");
    };
    let schema = crate::load_schema(path)?;
    println!("OK: {}", summary(&path.display().to_string(), &schema));
    if args.render {
        println!("  {schema}");
    }
    Ok(0)
}

/// One-line description: `<file> (<root kind>, <n> nodes)`.
pub fn summary(file: &str, schema: &Schema) -> String {
    let nodes = schema.node_count();
    let plural = if nodes == 1 { "" } else { "s" };
    format!("{file} ({}, {nodes} node{plural})", schema.node.kind())
}
