use crate::{Line, LineId, LineResult, Scope, TallyError};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct SheetJson<'a> {
    lines: Vec<LineJson<'a>>,
    variables: &'a BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
struct LineJson<'a> {
    id: LineId,
    line: usize,
    input: &'a str,
    result: &'a LineResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

fn sheet_json<'a>(lines: &'a [Line], scope: &'a Scope) -> SheetJson<'a> {
    SheetJson {
        lines: lines
            .iter()
            .map(|line| LineJson {
                id: line.id,
                line: line.line_number(),
                input: &line.input,
                result: &line.result,
                detail: line.diagnostic.as_ref().map(|err| err.to_string()),
            })
            .collect(),
        variables: scope.variables(),
    }
}

/// Snapshot of evaluated lines and the final variables as a JSON value
pub fn to_json(lines: &[Line], scope: &Scope) -> Value {
    serde_json::to_value(sheet_json(lines, scope)).unwrap_or(Value::Null)
}

/// Snapshot of evaluated lines and the final variables as pretty-printed JSON
pub fn to_string_pretty(lines: &[Line], scope: &Scope) -> Result<String, TallyError> {
    serde_json::to_string_pretty(&sheet_json(lines, scope))
        .map_err(|e| TallyError::Engine(format!("Failed to serialize sheet: {}", e)))
}

/// Read line inputs from JSON.
///
/// Accepts either an array of lines or an object with a `lines` array, so a
/// snapshot written by [`to_json`] loads back. Each line is a string, a
/// number (written out as typed), `null` (blank) or an object with a string
/// `input` field.
pub fn from_json(json: &str) -> Result<Vec<String>, TallyError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| TallyError::Engine(format!("Invalid sheet JSON: {}", e)))?;

    let items = match &value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("lines") {
            Some(Value::Array(items)) => items,
            _ => return Err(TallyError::Engine("Expected a \"lines\" array".to_string())),
        },
        _ => {
            return Err(TallyError::Engine(
                "Expected an array of lines".to_string(),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Null => Ok(String::new()),
            Value::Object(line) => match line.get("input") {
                Some(Value::String(input)) => Ok(input.clone()),
                _ => Err(TallyError::Engine(format!(
                    "Line {} needs a string \"input\" field",
                    index + 1
                ))),
            },
            other => Err(TallyError::Engine(format!(
                "Line {} must be a string, got {}",
                index + 1,
                other
            ))),
        })
        .collect()
}
