//! # Recursive Validation
//!
//! [`walk`] validates one value against one schema and returns the pair
//! `(Outcome, Validation)`. Container nodes recurse into their children with
//! an extended path; every leaf failure is appended to the shared message
//! log as the recursion unwinds, so the log is in pre-order, left-to-right
//! discovery order.
//!
//! ## Order of Checks
//!
//! 1. `null` passes iff the schema is `Nullable`, else `null is not allowed.`
//! 2. `undefined` passes iff the schema is `Optional`, else
//!    `undefined is not allowed.`
//! 3. The node's own check, by kind.
//!
//! ## Paths
//!
//! | Step          | Suffix       | Example             |
//! |---------------|--------------|---------------------|
//! | property      | `.name`      | `root.nested.two`   |
//! | list index    | `[i]`        | `root.arr[1]`       |
//! | union branch  | `{union(i)}` | `root{union(0)}.one` |
//!
//! ## Aggregation
//!
//! - Containers fail if any child fails, and always return their full
//!   container of child validations (`Clean` where a child passed).
//! - Unions evaluate **every** branch, even after one has passed, and log
//!   every branch's leaves. The first passing branch (in declared order)
//!   provides the result. If none passes, the union's validation is the
//!   flat leaf `No valid union schemas`; branch detail lives in the log only.
//! - Objects drop undeclared input keys, and omit properties whose result
//!   is `undefined`. Once a property fails, the result is `Invalid` but the
//!   remaining properties are still validated and recorded.
//! - Records validate every key and its value. An entry keyed by a rejected
//!   key holds the value's validation, or the key's leaf if the value passed.

use indexmap::IndexMap;

use shapeguard_core::{Map, Value};

use crate::grammar::{KeySchema, Literal, Primitive, Schema, TypeNode};
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::validation::{Validation, ValidationMessage};

/// Leaf message for an exhausted union.
pub const NO_VALID_UNION: &str = "No valid union schemas";

/// Leaf message for a closed-set record key absent from the input.
pub const PROPERTY_MISSING: &str = "Property is missing.";

/// Validate `input` against `schema` at `path`, appending leaf errors to `log`.
pub fn walk(
    input: &Value,
    schema: &Schema,
    path: &str,
    log: &mut Vec<ValidationMessage>,
) -> (Outcome, Validation) {
    let (outcome, validation) = check(input, schema, path, log);

    // Containers are never logged; their leaves already were.
    if let Validation::Leaf(err) = &validation {
        log.push(ValidationMessage::new(path, err.clone()));
    }

    (outcome, validation)
}

fn fail(message: impl Into<String>) -> (Outcome, Validation) {
    (Outcome::Invalid, Validation::Leaf(message.into()))
}

fn pass(value: Value) -> (Outcome, Validation) {
    (Outcome::Valid(value), Validation::Clean)
}

fn check(
    input: &Value,
    schema: &Schema,
    path: &str,
    log: &mut Vec<ValidationMessage>,
) -> (Outcome, Validation) {
    match input {
        Value::Null if schema.modifiers.nullable => return pass(Value::Null),
        Value::Null => return fail("null is not allowed."),
        Value::Undefined if schema.modifiers.optional => return pass(Value::Undefined),
        Value::Undefined => return fail("undefined is not allowed."),
        _ => {}
    }

    match &schema.node {
        TypeNode::Primitive(primitive) => check_primitive(input, *primitive),
        TypeNode::Options(options) => check_options(input, options),
        TypeNode::Parser(parser) => check_parser(input, parser),
        TypeNode::Union(first, second, third) => {
            let members = [Some(&**first), Some(&**second), third.as_deref()];
            walk_union(input, members.into_iter().flatten(), path, log)
        }
        TypeNode::Array(element) => walk_array(input, element, path, log),
        TypeNode::Tuple(items) => walk_tuple(input, items, path, log),
        TypeNode::Object(properties) => walk_object(input, properties, path, log),
        TypeNode::Record(keys, values) => walk_record(input, keys, values, path, log),
    }
}

// ─── Leaf Checks ─────────────────────────────────────────────────────

fn check_primitive(input: &Value, primitive: Primitive) -> (Outcome, Validation) {
    if primitive.accepts(input) {
        pass(input.clone())
    } else {
        fail(format!("\"{input}\" is not a {primitive}."))
    }
}

fn check_options(input: &Value, options: &[Literal]) -> (Outcome, Validation) {
    if options.iter().any(|option| option.matches(input)) {
        return pass(input.clone());
    }
    let allowed = options
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    fail(format!("\"{input}\" is not a valid option ({allowed})."))
}

fn check_parser(input: &Value, parser: &Parser) -> (Outcome, Validation) {
    match parser.parse(input) {
        Ok(value) => pass(value),
        Err(message) => fail(message),
    }
}

// ─── Containers ──────────────────────────────────────────────────────

fn walk_union<'s>(
    input: &Value,
    members: impl Iterator<Item = &'s Schema>,
    path: &str,
    log: &mut Vec<ValidationMessage>,
) -> (Outcome, Validation) {
    let mut chosen = None;

    for (i, member) in members.enumerate() {
        let (outcome, _) = walk(input, member, &format!("{path}{{union({i})}}"), log);
        if chosen.is_none() {
            chosen = outcome.into_value();
        }
    }

    match chosen {
        Some(value) => pass(value),
        None => {
            tracing::trace!(path, "no union branch matched");
            fail(NO_VALID_UNION)
        }
    }
}

/// Validate list items against per-index schemas and aggregate.
fn walk_items<'s>(
    items: &[Value],
    schemas: impl Iterator<Item = &'s Schema>,
    path: &str,
    log: &mut Vec<ValidationMessage>,
) -> (Outcome, Validation) {
    let mut results = Some(Vec::with_capacity(items.len()));
    let mut validations = Vec::with_capacity(items.len());

    for (i, (item, schema)) in items.iter().zip(schemas).enumerate() {
        let (outcome, validation) = walk(item, schema, &format!("{path}[{i}]"), log);
        match outcome {
            Outcome::Valid(value) => {
                if let Some(results) = results.as_mut() {
                    results.push(value);
                }
            }
            Outcome::Invalid => results = None,
        }
        validations.push(validation);
    }

    (
        results.map(Value::Array).into(),
        Validation::List(validations),
    )
}

fn walk_array(
    input: &Value,
    element: &Schema,
    path: &str,
    log: &mut Vec<ValidationMessage>,
) -> (Outcome, Validation) {
    match input {
        Value::Array(items) => walk_items(items, std::iter::repeat(element), path, log),
        other => fail(format!(
            "Value of type \"{}\" is not an array.",
            other.type_of()
        )),
    }
}

fn walk_tuple(
    input: &Value,
    schemas: &[Schema],
    path: &str,
    log: &mut Vec<ValidationMessage>,
) -> (Outcome, Validation) {
    let Value::Array(items) = input else {
        return fail(format!(
            "Value of type \"{}\" is not a tuple.",
            input.type_of()
        ));
    };
    if items.len() != schemas.len() {
        return fail(format!(
            "Tuple of length \"{}\" should be \"{}\".",
            items.len(),
            schemas.len()
        ));
    }
    walk_items(items, schemas.iter(), path, log)
}

/// Builds an object result, freezing at the first failure.
struct ObjectResult {
    values: Option<Map>,
    validations: IndexMap<String, Validation>,
}

impl ObjectResult {
    fn new() -> Self {
        Self {
            values: Some(Map::new()),
            validations: IndexMap::new(),
        }
    }

    fn record(&mut self, key: &str, outcome: Outcome, validation: Validation) {
        match outcome {
            Outcome::Invalid => self.values = None,
            // A satisfied Optional is omitted, not stored as undefined.
            Outcome::Valid(Value::Undefined) => {}
            Outcome::Valid(value) => {
                if let Some(values) = self.values.as_mut() {
                    values.insert(key.to_string(), value);
                }
            }
        }
        self.validations.insert(key.to_string(), validation);
    }

    fn fail(&mut self, key: &str, validation: Validation) {
        self.record(key, Outcome::Invalid, validation);
    }

    fn finish(self) -> (Outcome, Validation) {
        (
            self.values.map(Value::Object).into(),
            Validation::Map(self.validations),
        )
    }
}

fn walk_object(
    input: &Value,
    properties: &IndexMap<String, Schema>,
    path: &str,
    log: &mut Vec<ValidationMessage>,
) -> (Outcome, Validation) {
    if !matches!(input, Value::Object(_)) {
        return fail(format!(
            "Value of type \"{}\" is not an object.",
            input.type_of()
        ));
    }

    let mut result = ObjectResult::new();
    for (name, schema) in properties {
        let (outcome, validation) = walk(input.get(name), schema, &format!("{path}.{name}"), log);
        result.record(name, outcome, validation);
    }
    result.finish()
}

fn walk_record(
    input: &Value,
    keys: &KeySchema,
    values: &Schema,
    path: &str,
    log: &mut Vec<ValidationMessage>,
) -> (Outcome, Validation) {
    let Value::Object(entries) = input else {
        return fail(format!(
            "Value of type \"{}\" is not a record.",
            input.type_of()
        ));
    };

    let key_schema = keys.to_schema();
    let mut result = ObjectResult::new();

    for (key, value) in entries {
        let key_path = format!("{path}.{key}");
        let (key_outcome, key_validation) =
            walk(&Value::String(key.clone()), &key_schema, &key_path, log);
        let (outcome, validation) = walk(value, values, &key_path, log);
        if key_outcome.is_invalid() {
            // The key's leaf stands in for a clean value under the raw key.
            let validation = match validation {
                Validation::Clean => key_validation,
                value_validation => value_validation,
            };
            result.fail(key, validation);
        } else {
            result.record(key, outcome, validation);
        }
    }

    if let KeySchema::Options(options) = keys {
        if !values.modifiers.optional {
            for option in options {
                let key = option.to_string();
                // Present keys and repeated options already have an entry.
                if result.validations.contains_key(&key) {
                    continue;
                }
                log.push(ValidationMessage::new(format!("{path}.{key}"), PROPERTY_MISSING));
                result.fail(&key, Validation::Leaf(PROPERTY_MISSING.to_string()));
            }
        }
    }

    result.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(input: serde_json::Value, schema: &Schema) -> (Outcome, Validation, Vec<ValidationMessage>) {
        let mut log = Vec::new();
        let (outcome, validation) = walk(&Value::from(input), schema, "root", &mut log);
        (outcome, validation, log)
    }

    #[test]
    fn test_null_checked_before_node() {
        let (outcome, validation, log) = run(json!(null), &Schema::string());
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(validation.as_leaf(), Some("null is not allowed."));
        assert_eq!(log, vec![ValidationMessage::new("root", "null is not allowed.")]);

        let (outcome, _, log) = run(json!(null), &Schema::string().nullable());
        assert_eq!(outcome, Outcome::Valid(Value::Null));
        assert!(log.is_empty());
    }

    #[test]
    fn test_undefined_requires_optional() {
        let mut log = Vec::new();
        let (outcome, validation) =
            walk(&Value::Undefined, &Schema::string().nullable(), "root", &mut log);
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(validation.as_leaf(), Some("undefined is not allowed."));

        let (outcome, validation) =
            walk(&Value::Undefined, &Schema::string().optional(), "root", &mut log);
        assert_eq!(outcome, Outcome::Valid(Value::Undefined));
        assert_eq!(validation, Validation::Clean);
    }

    #[test]
    fn test_unknown_and_any_accept_everything_defined() {
        for schema in [Schema::unknown(), Schema::any()] {
            let (outcome, _, _) = run(json!({"x": [1]}), &schema);
            assert!(outcome.is_valid());
            let (outcome, _, _) = run(json!(null), &schema);
            assert!(outcome.is_invalid());
        }
    }

    #[test]
    fn test_options_error_lists_literals() {
        let schema = Schema::options([Literal::from("A"), Literal::from(2)]);
        let (_, validation, _) = run(json!("2"), &schema);
        assert_eq!(validation.as_leaf(), Some("\"2\" is not a valid option (A, 2)."));
        let (outcome, _, _) = run(json!(2), &schema);
        assert_eq!(outcome, Outcome::Valid(Value::from(2)));
    }

    #[test]
    fn test_array_validation_is_list_even_when_clean() {
        let (outcome, validation, log) = run(json!([1, 2]), &Schema::array(Schema::number()));
        assert_eq!(outcome, Outcome::Valid(Value::from(json!([1, 2]))));
        assert_eq!(validation, Validation::List(vec![Validation::Clean, Validation::Clean]));
        assert!(log.is_empty());
    }

    #[test]
    fn test_array_rejects_non_list() {
        let (_, validation, _) = run(json!({"a": 1}), &Schema::array(Schema::number()));
        assert_eq!(validation.as_leaf(), Some("Value of type \"object\" is not an array."));
    }

    #[test]
    fn test_tuple_rejects_non_list() {
        let (_, validation, _) = run(json!("ab"), &Schema::tuple([Schema::string()]));
        assert_eq!(validation.as_leaf(), Some("Value of type \"string\" is not a tuple."));
    }

    #[test]
    fn test_object_rejects_arrays() {
        let (_, validation, _) = run(json!([1]), &Schema::object([("a", Schema::number())]));
        assert_eq!(validation.as_leaf(), Some("Value of type \"object\" is not an object."));
    }

    #[test]
    fn test_object_keeps_recording_after_failure() {
        let schema = Schema::object([
            ("a", Schema::number()),
            ("b", Schema::string()),
            ("c", Schema::boolean()),
        ]);
        let (outcome, validation, log) = run(json!({"a": "x", "b": "ok", "c": 1}), &schema);
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(
            serde_json::to_value(&validation).unwrap(),
            json!({"a": "\"x\" is not a number.", "b": null, "c": "\"1\" is not a boolean."})
        );
        let paths: Vec<&str> = log.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["root.a", "root.c"]);
    }

    #[test]
    fn test_union_logs_all_branches_even_after_success() {
        let schema = Schema::union2(Schema::string(), Schema::number());
        let (outcome, validation, log) = run(json!("hi"), &schema);
        assert_eq!(outcome, Outcome::Valid(Value::from("hi")));
        assert_eq!(validation, Validation::Clean);
        assert_eq!(
            log,
            vec![ValidationMessage::new("root{union(1)}", "\"hi\" is not a number.")]
        );
    }

    #[test]
    fn test_union_takes_first_passing_branch() {
        let trimmed = Parser::new(|v| {
            v.as_str()
                .map(|s| Value::from(s.trim()))
                .ok_or_else(|| "not a string".to_string())
        });
        let schema = Schema::union3(Schema::number(), Schema::parser(trimmed), Schema::string());
        let (outcome, _, log) = run(json!("  x "), &schema);
        assert_eq!(outcome, Outcome::Valid(Value::from("x")));
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].path, "root{union(0)}");
    }

    #[test]
    fn test_union_exhaustion() {
        let schema = Schema::union3(Schema::number(), Schema::boolean(), Schema::options(["A"]));
        let (outcome, validation, log) = run(json!("B"), &schema);
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(validation.as_leaf(), Some(NO_VALID_UNION));
        let paths: Vec<&str> = log.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["root{union(0)}", "root{union(1)}", "root{union(2)}", "root"]
        );
    }

    #[test]
    fn test_record_rejected_key_still_walks_value() {
        let schema = Schema::record(KeySchema::Primitive(Primitive::Boolean), Schema::number());
        let (outcome, validation, log) = run(json!({"k": "nope"}), &schema);
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(
            serde_json::to_value(&validation).unwrap(),
            json!({"k": "\"nope\" is not a number."})
        );
        assert_eq!(
            log,
            vec![
                ValidationMessage::new("root.k", "\"k\" is not a boolean."),
                ValidationMessage::new("root.k", "\"nope\" is not a number."),
            ]
        );
    }

    #[test]
    fn test_record_rejected_key_with_clean_value_keeps_key_leaf() {
        let schema = Schema::record(KeySchema::Options(vec!["A".into()]), Schema::number().optional());
        let (outcome, validation, log) = run(json!({"A": 1, "Z": 2}), &schema);
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(
            serde_json::to_value(&validation).unwrap(),
            json!({"A": null, "Z": "\"Z\" is not a valid option (A)."})
        );
        assert_eq!(
            log,
            vec![ValidationMessage::new("root.Z", "\"Z\" is not a valid option (A).")]
        );
        let logged: Vec<&str> = log.iter().map(|m| m.err.as_str()).collect();
        assert_eq!(logged, validation.leaves());
    }

    #[test]
    fn test_record_repeated_option_missing_once() {
        let schema = Schema::record(
            KeySchema::Options(vec!["A".into(), "A".into()]),
            Schema::number(),
        );
        let (outcome, validation, log) = run(json!({}), &schema);
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(log, vec![ValidationMessage::new("root.A", PROPERTY_MISSING)]);
        assert_eq!(validation.leaves(), vec![PROPERTY_MISSING]);

        let (outcome, _, log) = run(json!({"A": 1}), &schema);
        assert!(outcome.is_valid());
        assert!(log.is_empty());
    }

    #[test]
    fn test_record_numeric_options_match_string_keys_for_presence() {
        let schema = Schema::record(KeySchema::Options(vec![Literal::from(1)]), Schema::number());
        let (outcome, validation, _) = run(json!({}), &schema);
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(validation.prop("1").as_leaf(), Some(PROPERTY_MISSING));
    }

    #[test]
    fn test_record_rejects_arrays_and_scalars() {
        let schema = Schema::record(KeySchema::Primitive(Primitive::String), Schema::number());
        let (outcome, validation, log) = run(json!([1, 2]), &schema);
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(validation.as_leaf(), Some("Value of type \"object\" is not a record."));
        assert_eq!(log.len(), 1);

        let (_, validation, _) = run(json!("ab"), &schema);
        assert_eq!(validation.as_leaf(), Some("Value of type \"string\" is not a record."));
    }

    #[test]
    fn test_record_omits_undefined_values() {
        let schema = Schema::record(
            KeySchema::Primitive(Primitive::String),
            Schema::number().optional(),
        );
        let mut entries = Map::new();
        entries.insert("a".into(), Value::from(1));
        entries.insert("b".into(), Value::Undefined);
        let mut log = Vec::new();
        let (outcome, validation) = walk(&Value::Object(entries), &schema, "root", &mut log);
        assert_eq!(outcome, Outcome::Valid(Value::from(json!({"a": 1}))));
        assert_eq!(serde_json::to_value(&validation).unwrap(), json!({"a": null, "b": null}));
    }
}
