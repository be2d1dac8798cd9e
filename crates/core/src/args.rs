// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module argument serialization

use crate::error::ConfigError;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::num::NonZeroUsize;

/// Argument consumed by target resolution
pub const RESERVED_HOST: &str = "host";
/// Argument consumed as the concurrency factor
pub const RESERVED_CONCURRENCY: &str = "concurrency";

/// String form of an argument value: strings verbatim, everything else as JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Ordered module arguments
///
/// Keys keep their declared order; setting an existing key replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleArgs {
    pairs: Vec<(String, Value)>,
}

impl ModuleArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the module arguments of a command call
    ///
    /// Drops the reserved `host` and `concurrency` keys and anything the
    /// command definition ignores.
    pub fn from_command_args(args: &IndexMap<String, Value>, ignored: &[String]) -> Self {
        let mut module_args = Self::new();
        for (key, value) in args {
            if key == RESERVED_HOST
                || key == RESERVED_CONCURRENCY
                || ignored.iter().any(|i| i == key)
            {
                continue;
            }
            module_args.set(key, value.clone());
        }
        module_args
    }

    pub fn set(&mut self, key: &str, value: Value) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Append every pair of `extra` after the current ones
    pub fn extend(&mut self, extra: &IndexMap<String, Value>) {
        for (key, value) in extra {
            self.set(key, value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Legacy `key="value" ` rendering
    ///
    /// Every pair is followed by one space. Values are not escaped: an
    /// embedded double quote produces an argument string the engine cannot
    /// parse. Use [`ModuleArgs::to_json`] when handing arguments to an engine.
    pub fn to_kv_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}=\"{}\" ", key, display_value(value)))
            .collect()
    }

    /// Structured rendering as a JSON object
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self.pairs.iter().cloned().collect();
        Value::Object(map)
    }
}

/// Resolve the concurrency factor of a command call
///
/// The call's own `concurrency` argument wins, then the configured fallback,
/// then 1. Numbers and numeric strings are accepted.
pub fn parse_concurrency(
    value: Option<&Value>,
    fallback: Option<NonZeroUsize>,
) -> Result<NonZeroUsize, ConfigError> {
    let Some(value) = value else {
        return Ok(fallback.unwrap_or(NonZeroUsize::MIN));
    };

    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    };

    parsed
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| ConfigError::InvalidConcurrency(display_value(value)))
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
