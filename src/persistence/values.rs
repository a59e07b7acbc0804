//! JSON to Firestore typed-value encoding.
//!
//! The Firestore REST API represents every field as a single-key object
//! naming the value type (`{"stringValue": "..."}`). Integers travel as
//! strings. This module encodes arbitrary parsed JSON so the model's
//! output can be stored verbatim.

use serde_json::{Map, Value, json};

/// Encodes one JSON value as a Firestore typed value.
#[must_use]
pub fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({"nullValue": null}),
        Value::Bool(b) => json!({"booleanValue": b}),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({"integerValue": i.to_string()})
            } else if let Some(u) = n.as_u64() {
                json!({"integerValue": u.to_string()})
            } else {
                json!({"doubleValue": n.as_f64()})
            }
        }
        Value::String(s) => json!({"stringValue": s}),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(to_firestore_value).collect();
            json!({"arrayValue": {"values": values}})
        }
        Value::Object(map) => json!({"mapValue": {"fields": to_document_fields(map)}}),
    }
}

/// Encodes a JSON object as a Firestore document field map.
#[must_use]
pub fn to_document_fields(object: &Map<String, Value>) -> Value {
    let fields: Map<String, Value> = object
        .iter()
        .map(|(k, v)| (k.clone(), to_firestore_value(v)))
        .collect();
    Value::Object(fields)
}
