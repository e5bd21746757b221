//! Integration test: the check and schema subcommands over files on disk.

use std::path::{Path, PathBuf};

use shapeguard_cli::check::{run_check, CheckArgs, OutputFormat};
use shapeguard_cli::schema::{run_schema, SchemaArgs};

/// `date` is not a node type.
const MALFORMED_SCHEMA: &str = r#"
type: object
properties:
  born: { type: date }
"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn person_schema(dir: &Path) -> PathBuf {
    write(
        dir,
        "person.schema.yaml",
        r#"
type: object
properties:
  name: { type: parser, name: trimmed_string }
  age: { type: parser, name: integer, optional: true }
  role: { type: options, values: [admin, member] }
"#,
    )
}

fn check_args(schema: PathBuf, documents: Vec<PathBuf>, format: OutputFormat) -> CheckArgs {
    CheckArgs {
        schema,
        documents,
        format,
        root: None,
    }
}

#[test]
fn all_valid_documents_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let schema = person_schema(dir.path());
    let a = write(dir.path(), "a.json", r#"{"name": " Ada ", "role": "admin"}"#);
    let b = write(dir.path(), "b.yaml", "name: Bob\nage: 40\nrole: member\n");

    let code = run_check(&check_args(schema, vec![a, b], OutputFormat::Text)).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn any_invalid_document_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let schema = person_schema(dir.path());
    let good = write(dir.path(), "good.json", r#"{"name": "Ada", "role": "admin"}"#);
    let bad = write(dir.path(), "bad.json", r#"{"name": "Eve", "age": 1.5, "role": "root"}"#);

    let code = run_check(&check_args(schema, vec![good, bad], OutputFormat::Json)).unwrap();
    assert_eq!(code, 1);
}

#[test]
fn unreadable_document_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let schema = person_schema(dir.path());
    let missing = dir.path().join("missing.json");

    let err = run_check(&check_args(schema, vec![missing], OutputFormat::Text)).unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));
}

#[test]
fn malformed_schema_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "broken.schema.yaml", MALFORMED_SCHEMA);
    let doc = write(dir.path(), "doc.json", "{}");

    assert!(run_check(&check_args(schema.clone(), vec![doc], OutputFormat::Text)).is_err());
    let args = SchemaArgs {
        schema: Some(schema),
        render: true,
        list_parsers: false,
    };
    assert!(run_schema(&args).is_err());
}

#[test]
fn schema_subcommand_accepts_valid_document() {
    let dir = tempfile::tempdir().unwrap();
    let args = SchemaArgs {
        schema: Some(person_schema(dir.path())),
        render: true,
        list_parsers: false,
    };
    assert_eq!(run_schema(&args).unwrap(), 0);
}
