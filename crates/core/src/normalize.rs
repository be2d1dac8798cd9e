// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result normalization for successful engine events

use crate::payload::PayloadParseError;
use crate::result::NormalizedResult;
use serde_json::{Map, Value};

/// Namespace tag the engine puts on its own keys
pub const ENGINE_KEY_PREFIX: &str = "ansible_";

/// Payload key holding gathered facts
pub const FACTS_KEY: &str = "ansible_facts";

/// Substring marking a module as facts-style
const FACTS_MARKER: &str = "fact";

/// Strip [`ENGINE_KEY_PREFIX`] from every mapping key at every depth
///
/// Mappings nested inside sequences are stripped too. Scalars pass through.
pub fn strip_key_prefix(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(strip_map(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_key_prefix).collect()),
        other => other,
    }
}

fn strip_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| {
            let key = match key.strip_prefix(ENGINE_KEY_PREFIX) {
                Some(rest) => rest.to_string(),
                None => key,
            };
            (key, strip_key_prefix(value))
        })
        .collect()
}

/// Pick the part of the payload that forms the result
fn select_subtree(module: &str, mut body: Map<String, Value>) -> Result<Value, PayloadParseError> {
    if module.contains(FACTS_MARKER) {
        return body.shift_remove(FACTS_KEY).ok_or(PayloadParseError::MissingFacts);
    }
    match body.get(module) {
        Some(Value::Null) | None => {
            body.shift_remove(FACTS_KEY);
            Ok(Value::Object(body))
        }
        Some(subtree) => Ok(subtree.clone()),
    }
}

/// Normalize one `Ok` payload into a result tagged with host and status
///
/// A subtree that is not a mapping is wrapped as `{module: value}`. Any
/// `host` or `status` key in the payload is replaced by the event's own.
pub fn normalize(
    module: &str,
    host: &str,
    status: &str,
    body: Map<String, Value>,
) -> Result<NormalizedResult, PayloadParseError> {
    let subtree = select_subtree(module, body)?;

    let mut fields = match strip_key_prefix(subtree) {
        Value::Object(map) => map,
        other => {
            let mut wrapped = Map::new();
            wrapped.insert(module.to_string(), other);
            wrapped
        }
    };
    fields.shift_remove("host");
    fields.shift_remove("status");

    Ok(NormalizedResult::new(host, status, fields))
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
