//! Value conversion between kinds.
//!
//! [`convert`] is the one place cast rules live; series casts, table casts, aggregation
//! fallbacks, and egress all go through it (or through the typed helpers it is built on).
//!
//! Rules:
//!
//! - Int ↔ Float (Float → Int truncates toward zero; non-finite floats fail)
//! - Int/Float/Bool → Text with locale-neutral formatting
//! - Text → Int/Float: parse, then retry after stripping `,` thousands separators and
//!   surrounding whitespace; Text → Int finally accepts a float and truncates it
//! - Text → Bool (case-insensitive): `true/t/yes/y/1` and `false/f/no/n/0`
//! - Int/Float → Bool: nonzero is `true`; Bool → Int/Float: `1`/`0`
//! - Null → Text is `""`; Null → Int/Float/Bool fails; anything → Mixed is unchanged

use crate::error::ConversionError;
use crate::types::{Kind, Value};

/// Convert `value` to the kind `to`.
pub fn convert(value: &Value, to: Kind) -> Result<Value, ConversionError> {
    if to == Kind::Mixed || value.kind() == Some(to) {
        return Ok(value.clone());
    }

    match (value, to) {
        (Value::Null, Kind::Text) => Ok(Value::Text(String::new())),
        (Value::Null, _) => Err(ConversionError::new(None, to, "", "null has no value of this kind")),

        (Value::Int(v), Kind::Float) => Ok(Value::Float(int_to_float(*v))),
        (Value::Int(v), Kind::Text) => Ok(Value::Text(v.to_string())),
        (Value::Int(v), Kind::Bool) => Ok(Value::Bool(*v != 0)),

        (Value::Float(v), Kind::Int) => float_to_int(*v).map(Value::Int),
        (Value::Float(v), Kind::Text) => Ok(Value::Text(float_to_text(*v))),
        (Value::Float(v), Kind::Bool) => Ok(Value::Bool(*v != 0.0)),

        (Value::Bool(v), Kind::Int) => Ok(Value::Int(i64::from(*v))),
        (Value::Bool(v), Kind::Float) => Ok(Value::Float(if *v { 1.0 } else { 0.0 })),
        (Value::Bool(v), Kind::Text) => Ok(Value::Text(v.to_string())),

        (Value::Text(s), Kind::Int) => parse_int(s).map(Value::Int),
        (Value::Text(s), Kind::Float) => parse_float(s).map(Value::Float),
        (Value::Text(s), Kind::Bool) => parse_bool(s).map(Value::Bool),

        // Same-kind and Mixed targets returned above.
        (v, k) => Err(ConversionError::new(v.kind(), k, to_text(v), "no conversion rule")),
    }
}

/// Render a value as text. Null renders as the empty string.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Int(v) => v.to_string(),
        Value::Float(v) => float_to_text(*v),
        Value::Text(v) => v.clone(),
        Value::Bool(v) => v.to_string(),
    }
}

/// Shortest round-trippable decimal rendering (`3.0` renders as `"3"`).
pub fn float_to_text(v: f64) -> String {
    format!("{v}")
}

/// Widen an integer to a float.
pub fn int_to_float(v: i64) -> f64 {
    v as f64
}

/// Truncate a float toward zero.
pub fn float_to_int(v: f64) -> Result<i64, ConversionError> {
    if !v.is_finite() {
        return Err(ConversionError::new(
            Some(Kind::Float),
            Kind::Int,
            float_to_text(v),
            "non-finite float has no integer value",
        ));
    }
    let t = v.trunc();
    // i64::MAX is not exactly representable; 2^63 is the first float past it.
    if t < i64::MIN as f64 || t >= 9_223_372_036_854_775_808.0 {
        return Err(ConversionError::new(
            Some(Kind::Float),
            Kind::Int,
            float_to_text(v),
            "float out of range for i64",
        ));
    }
    Ok(t as i64)
}

/// Strip thousands separators and surrounding whitespace.
pub fn clean_numeric(s: &str) -> String {
    s.replace(',', "").trim().to_owned()
}

/// Parse an integer, retrying once after [`clean_numeric`]. No float fallback.
pub fn parse_int_exact(s: &str) -> Option<i64> {
    s.parse::<i64>()
        .ok()
        .or_else(|| clean_numeric(s).parse::<i64>().ok())
}

/// Parse a float, retrying once after [`clean_numeric`].
pub fn parse_float_exact(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .or_else(|| clean_numeric(s).parse::<f64>().ok())
}

/// Recognize the boolean spellings (case-insensitive, trimmed).
pub fn bool_from_text(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Text → Int, accepting a float spelling as a last resort.
pub fn parse_int(s: &str) -> Result<i64, ConversionError> {
    if let Some(v) = parse_int_exact(s) {
        return Ok(v);
    }
    match parse_float_exact(s) {
        Some(f) => float_to_int(f).map_err(|e| ConversionError {
            from: Some(Kind::Text),
            raw: s.to_owned(),
            ..e
        }),
        None => Err(ConversionError::new(
            Some(Kind::Text),
            Kind::Int,
            s,
            "expected an integer",
        )),
    }
}

/// Text → Float.
pub fn parse_float(s: &str) -> Result<f64, ConversionError> {
    parse_float_exact(s)
        .ok_or_else(|| ConversionError::new(Some(Kind::Text), Kind::Float, s, "expected a number"))
}

/// Text → Bool.
pub fn parse_bool(s: &str) -> Result<bool, ConversionError> {
    bool_from_text(s).ok_or_else(|| {
        ConversionError::new(
            Some(Kind::Text),
            Kind::Bool,
            s,
            "expected bool (true/false/t/f/yes/no/y/n/1/0)",
        )
    })
}

/// Numeric view of a value used by aggregation and comparison fallbacks.
///
/// Returns `None` when [`convert`] to Float fails.
pub fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float(v) => Some(*v),
        Value::Int(v) => Some(int_to_float(*v)),
        other => convert(other, Kind::Float).ok().and_then(|v| v.as_float()),
    }
}
