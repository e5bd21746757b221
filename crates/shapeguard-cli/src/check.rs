//! # Check Subcommand
//!
//! Validates documents against a schema document. Each document is read as
//! JSON or YAML by extension and reported as `PASS`/`FAIL`, followed by its
//! leaf diagnostics; `--format json` emits one report object per document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use shapeguard_core::Value;
use shapeguard_schema::{evaluate_at, load_value, Schema, Validation, ValidationMessage, ROOT_PATH};

/// Arguments for the `shapeguard check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema document (JSON, or YAML by `.yaml`/`.yml` extension).
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Documents to validate.
    #[arg(value_name = "DOCUMENT", required = true)]
    pub documents: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Label for the root of each document in diagnostic paths.
    #[arg(long, value_name = "LABEL")]
    pub root: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `PASS`/`FAIL` lines with indented diagnostics.
    Text,
    /// A JSON array of per-document reports.
    Json,
}

/// The validation report of one document.
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    /// The document path as given.
    pub file: String,
    pub valid: bool,
    /// The validated result, absent on failure or for an undefined result.
    pub result: Option<serde_json::Value>,
    pub validation: Validation,
    pub messages: Vec<ValidationMessage>,
}

impl DocumentReport {
    /// `PASS: <file>` or `FAIL: <file>` followed by indented diagnostics.
    pub fn render_text(&self) -> String {
        let status = if self.valid { "PASS" } else { "FAIL" };
        let mut out = format!("{status}: {}", self.file);
        for message in &self.messages {
            out.push_str("\n  ");
            out.push_str(&message.to_string());
        }
        out
    }
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 if every document is valid, 1 otherwise.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let schema = crate::load_schema(&args.schema)?;
    let root = args.root.as_deref().unwrap_or(ROOT_PATH);

    let reports = args
        .documents
        .iter()
        .map(|path| check_document(&schema, path, root))
        .collect::<Result<Vec<_>>>()?;

    let passed = reports.iter().filter(|r| r.valid).count();
    match args.format {
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", report.render_text());
            }
            println!("Documents: {}/{} passed", passed, reports.len());
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&reports).context("failed to serialize reports")?;
            println!("{json}");
        }
    }

    if passed == reports.len() {
        Ok(0)
    } else {
        Ok(1)
    }
}

/// Validate one document file against `schema`.
pub fn check_document(schema: &Schema, path: &Path, root: &str) -> Result<DocumentReport> {
    let input = load_value(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let report = check_value(schema, &path.display().to_string(), &input, root)?;

    tracing::debug!(
        file = %path.display(),
        valid = report.valid,
        messages = report.messages.len(),
        "checked document"
    );
    Ok(report)
}

/// Validate an already-loaded value, reporting it under the name `file`.
pub fn check_value(schema: &Schema, file: &str, input: &Value, root: &str) -> Result<DocumentReport> {
    let eval = evaluate_at(input, schema, root);
    let result = eval
        .value()
        .filter(|v| !v.is_undefined())
        .map(Value::to_json)
        .transpose()
        .with_context(|| format!("result for {file} is not representable as JSON"))?;
    Ok(DocumentReport {
        file: file.to_string(),
        valid: eval.is_valid(),
        result,
        validation: eval.validation,
        messages: eval.messages,
    })
}
