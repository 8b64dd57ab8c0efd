//! Schema Validator: draft-7 subset evaluation over `serde_json::Value`.
//!
//! The two schema documents under `schemas/` stay data, not code: they are
//! loaded per invocation, meta-checked once, and evaluated against parsed
//! documents or tool descriptors. The supported keyword subset is `type`
//! (including type arrays), `required`, `properties`, `additionalProperties`,
//! `items`, `enum`, `pattern`, `minimum`, `minItems`, and `minLength`, which
//! covers the repository's schema documents unmodified.

use crate::runtime::error::{LintError, LintResult};
use crate::runtime::fs::read_text;
use regex::Regex;
use serde_json::Value;
use std::path::Path;

/// One field-level schema violation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    /// Json-path-style locator of the offending field (`$.steps.numbers[0]`).
    pub path: String,
    /// Human-readable mismatch description.
    pub message: String,
}

impl Violation {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Load a schema document and meta-check it once.
///
/// Schema authors get fast feedback here instead of confusing per-record
/// failures later; the returned value is ready for [`validate`].
pub fn load(path: &Path) -> LintResult<Value> {
    if !path.exists() {
        return Err(LintError::not_found(format!(
            "schema not found: {}",
            path.display()
        )));
    }
    let text = read_text(path)?;
    let schema: Value = serde_json::from_str(&text)
        .map_err(|err| LintError::config(format!("failed to parse schema: {err}")).with_path(path))?;
    check_schema(&schema).map_err(|v| {
        LintError::config(format!("malformed schema at {}: {}", v.path, v.message)).with_path(path)
    })?;
    Ok(schema)
}

/// Meta-check a schema document: keyword operands must have the right shapes
/// and `pattern` operands must compile. Returns the first problem found.
pub fn check_schema(schema: &Value) -> Result<(), Violation> {
    check_schema_at(schema, "$")
}

fn check_schema_at(schema: &Value, path: &str) -> Result<(), Violation> {
    let Some(obj) = schema.as_object() else {
        return Err(Violation::new(path, "schema must be an object"));
    };

    if let Some(type_spec) = obj.get("type") {
        let names: Vec<&Value> = match type_spec {
            Value::String(_) => vec![type_spec],
            Value::Array(items) => items.iter().collect(),
            _ => {
                return Err(Violation::new(
                    path,
                    "`type` must be a string or array of strings",
                ))
            }
        };
        for name in names {
            let valid = name.as_str().is_some_and(|n| {
                matches!(
                    n,
                    "string" | "object" | "array" | "integer" | "number" | "boolean" | "null"
                )
            });
            if !valid {
                return Err(Violation::new(path, format!("unsupported type {name}")));
            }
        }
    }

    if let Some(required) = obj.get("required") {
        let ok = required
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !ok {
            return Err(Violation::new(path, "`required` must be an array of strings"));
        }
    }

    if let Some(properties) = obj.get("properties") {
        let Some(map) = properties.as_object() else {
            return Err(Violation::new(path, "`properties` must be an object"));
        };
        for (key, sub) in map {
            check_schema_at(sub, &format!("{path}.properties.{key}"))?;
        }
    }

    if let Some(additional) = obj.get("additionalProperties") {
        if !additional.is_boolean() {
            check_schema_at(additional, &format!("{path}.additionalProperties"))?;
        }
    }

    if let Some(items) = obj.get("items") {
        check_schema_at(items, &format!("{path}.items"))?;
    }

    if let Some(variants) = obj.get("enum") {
        let ok = variants.as_array().is_some_and(|items| !items.is_empty());
        if !ok {
            return Err(Violation::new(path, "`enum` must be a non-empty array"));
        }
    }

    if let Some(pattern) = obj.get("pattern") {
        let Some(pattern) = pattern.as_str() else {
            return Err(Violation::new(path, "`pattern` must be a string"));
        };
        if let Err(err) = Regex::new(pattern) {
            return Err(Violation::new(path, format!("invalid `pattern`: {err}")));
        }
    }

    for keyword in ["minimum", "minItems", "minLength"] {
        if let Some(bound) = obj.get(keyword) {
            if !bound.is_number() {
                return Err(Violation::new(path, format!("`{keyword}` must be a number")));
            }
        }
    }

    Ok(())
}

/// Validate a record against a schema, collecting every violation.
///
/// An empty result means valid. No fail-fast: all mismatches within the
/// record are reported in one pass.
pub fn validate(value: &Value, schema: &Value) -> Vec<Violation> {
    let mut out = Vec::new();
    validate_at(value, schema, "$", &mut out);
    out
}

fn validate_at(value: &Value, schema: &Value, path: &str, out: &mut Vec<Violation>) {
    let Some(obj) = schema.as_object() else {
        return;
    };

    if let Some(type_spec) = obj.get("type") {
        let names: Vec<&str> = match type_spec {
            Value::String(name) => vec![name.as_str()],
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        if !names.is_empty() && !names.iter().any(|name| matches_type(value, name)) {
            out.push(Violation::new(
                path,
                format!(
                    "expected type `{}`, found {}",
                    names.join("` or `"),
                    type_name(value)
                ),
            ));
            // A type mismatch makes the structural keywords below meaningless.
            return;
        }
    }

    if let Some(variants) = obj.get("enum").and_then(Value::as_array) {
        if !variants.contains(value) {
            out.push(Violation::new(path, format!("{value} is not an allowed value")));
        }
    }

    if let Some(text) = value.as_str() {
        if let Some(pattern) = obj.get("pattern").and_then(Value::as_str) {
            // Meta-checked at load time; an uncompilable pattern cannot reach here.
            if let Ok(re) = Regex::new(pattern) {
                if !re.is_match(text) {
                    out.push(Violation::new(
                        path,
                        format!("\"{text}\" does not match pattern \"{pattern}\""),
                    ));
                }
            }
        }
        if let Some(min) = obj.get("minLength").and_then(Value::as_u64) {
            if (text.chars().count() as u64) < min {
                out.push(Violation::new(path, format!("string is shorter than {min}")));
            }
        }
    }

    if let Some(number) = value.as_f64() {
        if let Some(min) = obj.get("minimum").and_then(Value::as_f64) {
            if number < min {
                out.push(Violation::new(
                    path,
                    format!("{number} is less than the minimum of {min}"),
                ));
            }
        }
    }

    if let Some(map) = value.as_object() {
        if let Some(required) = obj.get("required").and_then(Value::as_array) {
            for key in required.iter().filter_map(Value::as_str) {
                if !map.contains_key(key) {
                    out.push(Violation::new(path, format!("`{key}` is a required property")));
                }
            }
        }
        let properties = obj.get("properties").and_then(Value::as_object);
        if let Some(properties) = properties {
            for (key, sub) in properties {
                if let Some(field) = map.get(key) {
                    validate_at(field, sub, &format!("{path}.{key}"), out);
                }
            }
        }
        if let Some(additional) = obj.get("additionalProperties") {
            match additional {
                Value::Bool(false) => {
                    for key in map.keys() {
                        let declared = properties.is_some_and(|p| p.contains_key(key));
                        if !declared {
                            out.push(Violation::new(
                                path,
                                format!("additional property `{key}` is not allowed"),
                            ));
                        }
                    }
                }
                Value::Object(_) => {
                    for (key, field) in map {
                        let declared = properties.is_some_and(|p| p.contains_key(key));
                        if !declared {
                            validate_at(field, additional, &format!("{path}.{key}"), out);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    if let Some(items) = value.as_array() {
        if let Some(min) = obj.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                out.push(Violation::new(path, format!("array has fewer than {min} items")));
            }
        }
        if let Some(item_schema) = obj.get("items") {
            for (idx, item) in items.iter().enumerate() {
                validate_at(item, item_schema, &format!("{path}[{idx}]"), out);
            }
        }
    }
}

fn matches_type(value: &Value, name: &str) -> bool {
    match name {
        "string" => value.is_string(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        "number" => value.is_number(),
        "integer" => {
            value.as_i64().is_some()
                || value.as_u64().is_some()
                || value.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command_schema() -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["overview", "steps", "tools"],
            "properties": {
                "overview": {"type": "string", "minLength": 1},
                "definitions": {"type": "string"},
                "prerequisites": {"type": "string"},
                "steps": {
                    "type": "object",
                    "required": ["content", "numbers"],
                    "properties": {
                        "content": {"type": "string", "minLength": 1},
                        "numbers": {
                            "type": "array",
                            "minItems": 1,
                            "items": {"type": "integer", "minimum": 1}
                        }
                    }
                },
                "tools": {"type": "string"},
                "guidance": {"type": "string"},
                "mcpRefs": {
                    "type": "array",
                    "items": {"type": "string", "pattern": "^mcp_[A-Za-z0-9-]+_[A-Za-z0-9_]+$"}
                }
            }
        })
    }

    #[test]
    fn valid_record_yields_no_violations() {
        let record = json!({
            "overview": "Create a plan.",
            "definitions": "",
            "prerequisites": "",
            "steps": {"content": "1. Do it.", "numbers": [1]},
            "tools": "mcp_github_list_commits",
            "guidance": "",
            "mcpRefs": ["mcp_github_list_commits"]
        });
        assert!(validate(&record, &command_schema()).is_empty());
    }

    #[test]
    fn missing_required_field_is_located_at_parent() {
        let record = json!({"overview": "x", "tools": ""});
        let violations = validate(&record, &command_schema());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "$");
        assert!(violations[0].message.contains("`steps`"));
    }

    #[test]
    fn nested_violations_carry_full_paths() {
        let record = json!({
            "overview": "x",
            "tools": "",
            "steps": {"content": "1. Do it.", "numbers": [0, "two"]}
        });
        let violations = validate(&record, &command_schema());
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"$.steps.numbers[0]"));
        assert!(paths.contains(&"$.steps.numbers[1]"));
    }

    #[test]
    fn all_violations_are_collected_not_fail_fast() {
        let record = json!({"steps": 7});
        let violations = validate(&record, &command_schema());
        assert!(violations.len() >= 3, "got: {violations:?}");
    }

    #[test]
    fn pattern_keyword_rejects_malformed_tokens() {
        let record = json!({
            "overview": "x",
            "tools": "",
            "steps": {"content": "1.", "numbers": [1]},
            "mcpRefs": ["not-a-ref"]
        });
        let violations = validate(&record, &command_schema());
        assert!(violations
            .iter()
            .any(|v| v.path == "$.mcpRefs[0]" && v.message.contains("pattern")));
    }

    #[test]
    fn enum_and_additional_properties_are_enforced() {
        let schema = json!({
            "type": "object",
            "properties": {"kind": {"enum": ["tool", "resource"]}},
            "additionalProperties": false
        });
        let violations = validate(&json!({"kind": "widget", "extra": 1}), &schema);
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("not an allowed value")));
        assert!(messages.iter().any(|m| m.contains("`extra`")));
    }

    #[test]
    fn integer_type_accepts_whole_floats_only() {
        let schema = json!({"type": "integer"});
        assert!(validate(&json!(3), &schema).is_empty());
        assert!(validate(&json!(3.0), &schema).is_empty());
        assert_eq!(validate(&json!(3.5), &schema).len(), 1);
    }

    #[test]
    fn meta_check_accepts_the_command_schema() {
        assert!(check_schema(&command_schema()).is_ok());
    }

    #[test]
    fn meta_check_rejects_bad_keyword_operands() {
        let bad = json!({"type": "object", "required": "name"});
        let err = check_schema(&bad).expect_err("meta-check should fail");
        assert!(err.message.contains("`required`"));

        let bad_pattern = json!({"properties": {"name": {"pattern": "["}}});
        let err = check_schema(&bad_pattern).expect_err("meta-check should fail");
        assert_eq!(err.path, "$.properties.name");
    }
}
