//! Generic field sanitizer applied to every payload before persistence.
//!
//! Works on the serialized form so one implementation covers every entity
//! kind: strings are trimmed, negative numbers become zero and `null`
//! (absent optional) fields are dropped from objects.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Sanitize a payload, returning the cleaned copy.
pub fn sanitize<T>(payload: &T) -> Result<T, CoreError>
where
    T: Serialize + DeserializeOwned,
{
    let mut json = serde_json::to_value(payload)?;
    scrub(&mut json);
    Ok(serde_json::from_value(json)?)
}

/// Sanitize a JSON value in place.
pub fn scrub(value: &mut Value) {
    if let Some(zero) = zero_if_negative(value) {
        *value = zero;
        return;
    }

    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(scrub),
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(scrub);
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Zero of the same numeric flavour for negative numbers.
fn zero_if_negative(value: &Value) -> Option<Value> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return (i < 0).then(|| Value::from(0));
    }
    if n.is_u64() {
        return None;
    }
    n.as_f64().filter(|f| *f < 0.0).map(|_| Value::from(0.0))
}
