use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Lenient text field: accepts strings, numbers, booleans, `null` and lists of those.
///
/// Empty strings and empty lists decode as `None`, matching how the page
/// treated falsy values. List elements are joined with `"; "`.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(value) => value_to_text(&value).map_err(Error::custom),
    }
}

fn value_to_text(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(values) => {
            let mut parts = Vec::with_capacity(values.len());
            for element in values {
                if let Some(text) = value_to_text(element)? {
                    parts.push(text);
                }
            }
            Ok(if parts.is_empty() { None } else { Some(parts.join("; ")) })
        }
        Value::Object(_) => Err("expected text, number or list, found object".to_string()),
    }
}

/// `hits.total` is either a bare count or `{"value": n, "relation": "eq"}`.
pub fn deserialize_total_hits<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| Error::custom("hit count must be non-negative")),
        Value::Object(map) => map
            .get("value")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::custom("hit count object is missing a numeric \"value\"")),
        _ => Err(Error::custom("hit count must be a number or an object")),
    }
}
