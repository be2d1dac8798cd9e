// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine output line parsing
//!
//! Each engine event carries one display line shaped like
//! `web1 | SUCCESS => {"changed": false, ...}`. The delimiter contract is
//! fixed by the engine:
//! - the JSON body starts at the first `{`
//! - the host is everything before the first `|`
//! - the status is the second field once `=>` is treated as `|`

use serde_json::{Map, Value};
use thiserror::Error;

const EXCERPT_LEN: usize = 80;

/// Errors parsing an engine event payload
#[derive(Debug, Error)]
pub enum PayloadParseError {
    #[error("event payload has no JSON body: {0}")]
    MissingBody(String),
    #[error("event payload has no host field: {0}")]
    MissingHost(String),
    #[error("event payload has no status field: {0}")]
    MissingStatus(String),
    #[error("event payload body is not a JSON object: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("facts command result has no ansible_facts section")]
    MissingFacts,
}

/// Fields recovered from one engine output line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPayload {
    pub host: String,
    pub status: String,
    pub body: Map<String, Value>,
}

fn excerpt(line: &str) -> String {
    let mut end = line.len().min(EXCERPT_LEN);
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line[..end].to_string()
}

/// Parse one engine output line
pub fn parse_payload(line: &str) -> Result<ParsedPayload, PayloadParseError> {
    let (head, json) = line
        .split_once('{')
        .ok_or_else(|| PayloadParseError::MissingBody(excerpt(line)))?;

    // Host and status both precede the body; a `|` inside the JSON never
    // counts as a separator.
    let host = head
        .split_once('|')
        .map(|(host, _)| host.trim())
        .filter(|host| !host.is_empty())
        .ok_or_else(|| PayloadParseError::MissingHost(excerpt(line)))?;

    let normalized = head.replace("=>", "|");
    let status = normalized
        .splitn(4, '|')
        .nth(1)
        .map(str::trim)
        .filter(|status| !status.is_empty())
        .ok_or_else(|| PayloadParseError::MissingStatus(excerpt(line)))?;

    let body: Map<String, Value> = serde_json::from_str(&format!("{{{}", json))?;

    Ok(ParsedPayload {
        host: host.to_string(),
        status: status.to_string(),
        body,
    })
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
