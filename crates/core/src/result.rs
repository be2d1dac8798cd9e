// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized per-target results and the aggregate command output

use crate::inventory::LOCALHOST;
use serde::Serialize;
use serde_json::{Map, Value};

/// One successful target's normalized mapping, tagged with host and status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResult {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub host: String,
    pub status: String,
}

impl NormalizedResult {
    pub fn new(host: impl Into<String>, status: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            fields,
            host: host.into(),
            status: status.into(),
        }
    }

    /// The fields alone, as rendered into the readable output
    pub fn fields_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Structured results: one per target, or a single one for local commands
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Results {
    Single(NormalizedResult),
    Many(Vec<NormalizedResult>),
}

impl Results {
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn as_slice(&self) -> &[NormalizedResult] {
        match self {
            Results::Single(result) => std::slice::from_ref(result),
            Results::Many(results) => results,
        }
    }
}

/// Everything one command invocation returns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateOutput {
    pub readable: String,
    /// Context path for the structured results, `<integration>.<module>`
    pub outputs_prefix: String,
    pub results: Results,
}

/// Heading line preceding a target's rendered result
pub fn readable_header(host: &str, status: &str) -> String {
    if host == LOCALHOST {
        format!("# {}\n", status)
    } else {
        format!("# {} - {}\n", host, status)
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
