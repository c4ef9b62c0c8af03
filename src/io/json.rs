//! JSON reading.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single object (one row)
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Columns appear in order of first appearance across rows. Nested objects are flattened
//! into dot-path columns (`{"user":{"name":"x"}}` gives `user.name`); arrays are kept as
//! their JSON text. A key missing from a row is null in that row.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::error::{FrameError, FrameResult};
use crate::series::Series;
use crate::table::Table;
use crate::types::Value;

/// Read a JSON or NDJSON file into a [`Table`].
pub fn read_json_from_path(path: impl AsRef<Path>) -> FrameResult<Table> {
    let text = fs::read_to_string(path)?;
    read_json_from_str(&text)
}

/// Read JSON or NDJSON held in memory.
pub fn read_json_from_str(input: &str) -> FrameResult<Table> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Table::new());
    }

    // A single JSON document first, then NDJSON.
    let items = match serde_json::from_str::<JsonValue>(trimmed) {
        Ok(JsonValue::Array(items)) => items,
        Ok(v @ JsonValue::Object(_)) => vec![v],
        Ok(_) => {
            return Err(FrameError::Unsupported {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            });
        }
        Err(_) => parse_ndjson(trimmed)?,
    };
    table_from_json_rows(&items)
}

fn parse_ndjson(input: &str) -> FrameResult<Vec<JsonValue>> {
    let mut items = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let item = serde_json::from_str::<JsonValue>(line).inspect_err(|e| {
            log::warn!("json: invalid ndjson at line {}: {e}", i + 1);
        })?;
        items.push(item);
    }
    Ok(items)
}

fn table_from_json_rows(items: &[JsonValue]) -> FrameResult<Table> {
    let mut names: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<Value>> = Vec::new();

    for (row, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| FrameError::Unsupported {
            message: format!("json row {} is not an object", row + 1),
        })?;
        let mut cells = Vec::new();
        flatten_object(obj, "", &mut cells);
        for (name, value) in cells {
            let slot = match names.iter().position(|n| *n == name) {
                Some(i) => i,
                None => {
                    names.push(name);
                    columns.push(vec![Value::Null; row]);
                    columns.len() - 1
                }
            };
            let column = &mut columns[slot];
            column.resize(row, Value::Null);
            column.push(value);
        }
        for column in &mut columns {
            column.resize(row + 1, Value::Null);
        }
    }

    let table = Table::from_series(
        names
            .into_iter()
            .zip(columns)
            .map(|(name, values)| Series::new(name, values)),
    )?;
    log::debug!("json: read {} rows x {} columns", table.height(), table.width());
    Ok(table)
}

fn flatten_object(obj: &Map<String, JsonValue>, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, value) in obj {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            JsonValue::Object(inner) => flatten_object(inner, &name, out),
            other => out.push((name, json_to_value(other))),
        }
    }
}

fn json_to_value(v: &JsonValue) -> Value {
    match v {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => n.as_f64().map_or(Value::Null, Value::Float),
        },
        JsonValue::String(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::read_json_from_str;
    use crate::types::{Kind, Value};

    #[test]
    fn array_of_objects_keeps_first_appearance_order() {
        let t = read_json_from_str(r#"[{"id":1,"name":"Ada"},{"name":"Grace","id":2}]"#).unwrap();
        assert_eq!(t.column_names(), ["id", "name"]);
        assert_eq!(t.column("id").unwrap().kind(), Kind::Int);
    }

    #[test]
    fn ndjson_with_missing_keys_gives_nulls() {
        let t = read_json_from_str("{\"a\":1}\n\n{\"b\":true}\n").unwrap();
        assert_eq!(t.shape(), (2, 2));
        assert_eq!(t.column("a").unwrap().values(), vec![Value::Int(1), Value::Null]);
        assert_eq!(t.column("b").unwrap().kind(), Kind::Mixed);
    }

    #[test]
    fn nested_objects_flatten_to_dot_paths() {
        let t = read_json_from_str(r#"{"user":{"name":"x","tags":[1,2]},"score":1.5}"#).unwrap();
        assert_eq!(t.column_names(), ["user.name", "user.tags", "score"]);
        assert_eq!(t.column("user.tags").unwrap().get(0), Some(Value::from("[1,2]")));
    }

    #[test]
    fn scalar_document_is_rejected() {
        assert!(read_json_from_str("42").is_err());
        assert!(read_json_from_str("[1, 2]").is_err());
        assert_eq!(read_json_from_str("  ").unwrap().shape(), (0, 0));
    }
}
