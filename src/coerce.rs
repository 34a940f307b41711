// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Coercion of loosely shaped JSON into arrays, so list rendering never has
//! to deal with `null` or an object where a list was expected.

use serde_json::Value;

/// `value` itself if it is an array, otherwise an empty array.
pub fn ensure_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            log::warn!("Expected an array, got {}.", kind(&other));
            Vec::new()
        }
    }
}

/// The list carried by an API-like response: the response itself if it is
/// an array, or its `key` field if that is an array. Anything else gives an
/// empty array.
pub fn safe_array_from_response(value: Value, key: &str) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut fields) => match fields.remove(key) {
            Some(field) => ensure_array(field),
            None => {
                log::warn!("Response has no '{key}' field.");
                Vec::new()
            }
        },
        Value::Null => Vec::new(),
        other => {
            log::warn!("Expected a response object or array, got {}.", kind(&other));
            Vec::new()
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_ensure_array_rejects_non_arrays() {
        for value in [Value::Null, json!({}), json!("x"), json!(42), json!(true)] {
            assert!(ensure_array(value).is_empty());
        }
    }

    #[test]
    fn test_ensure_array_keeps_arrays() {
        assert_eq!(ensure_array(json!([1, 2, 3])), vec![json!(1), json!(2), json!(3)]);
        assert!(ensure_array(json!([])).is_empty());
    }

    #[test]
    fn test_safe_array_from_response() {
        let items = safe_array_from_response(json!({"data": [{"id": 1}], "ok": true}), "data");
        assert_eq!(items, vec![json!({"id": 1})]);
        assert_eq!(safe_array_from_response(json!(["a"]), "data"), vec![json!("a")]);
        assert!(safe_array_from_response(json!({"data": {"id": 1}}), "data").is_empty());
        assert!(safe_array_from_response(json!({"items": []}), "data").is_empty());
        assert!(safe_array_from_response(Value::Null, "data").is_empty());
        assert!(safe_array_from_response(json!("oops"), "data").is_empty());
    }
}
