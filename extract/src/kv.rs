//! `key=value` line extraction.
//!
//! Scans a log line for `key=value` pairs, the shape emitted by
//! firewalls, kernels, and most structured syslog producers. Values may
//! be double-quoted (with `\"` and `\\` escapes) or bare tokens; bare
//! `true`/`false` become booleans and bare numbers become numeric
//! values. Text between pairs is ignored, so a syslog header in front of
//! the pairs does not disturb extraction.

use std::sync::LazyLock;

use record_schema_core::{Record, Value};
use regex::Regex;

use crate::error::Result;

/// One `key=value` pair: key, then either a quoted or a bare value.
static KV_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([@A-Za-z_][@\w.\-]*)=(?:"((?:[^"\\]|\\.)*)"|(\S+))"#)
        .expect("static regex must compile")
});

/// Extracts a flat record from a `key=value` line. Repeated keys keep
/// the last occurrence.
pub(crate) fn extract_kv(text: &str) -> Result<Record> {
    let mut record = Record::new();

    for captures in KV_PAIR.captures_iter(text) {
        let key = captures[1].to_string();
        let value = if let Some(quoted) = captures.get(2) {
            Value::String(unescape(quoted.as_str()))
        } else {
            bare_value(&captures[3])
        };
        record.insert(key, value);
    }

    Ok(record)
}

/// Classifies a bare token: boolean, then integer, then float, then
/// string.
fn bare_value(token: &str) -> Value {
    match token {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(int) = token.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(int) = token.parse::<u64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = token.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }

    Value::String(token.to_string())
}

fn unescape(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
