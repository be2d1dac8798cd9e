// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine events and their classified outcomes

use crate::payload::{parse_payload, PayloadParseError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Kind tag attached to every engine event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Ok,
    Unreachable,
    Failed,
}

impl EventKind {
    /// Map an engine display status to an event kind
    ///
    /// `FAILED` without the bang is what raw command modules report. Statuses
    /// outside the three outcome kinds (e.g. `SKIPPED`) map to `None`.
    pub fn from_status(status: &str) -> Option<Self> {
        match status.trim() {
            "SUCCESS" | "CHANGED" => Some(EventKind::Ok),
            "UNREACHABLE!" => Some(EventKind::Unreachable),
            "FAILED!" | "FAILED" => Some(EventKind::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Ok => "ok",
            EventKind::Unreachable => "unreachable",
            EventKind::Failed => "failed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event as emitted by the execution engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineEvent {
    pub kind: EventKind,
    /// Host the engine attributes the event to
    pub host: String,
    /// Display line, `host | STATUS => {json}`
    pub stdout: String,
}

impl EngineEvent {
    pub fn new(kind: EventKind, host: impl Into<String>, stdout: impl Into<String>) -> Self {
        Self {
            kind,
            host: host.into(),
            stdout: stdout.into(),
        }
    }
}

/// A per-target outcome after payload parsing
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeEvent {
    Ok {
        host: String,
        status: String,
        payload: Map<String, Value>,
    },
    Unreachable {
        host: String,
        detail: String,
    },
    Failed {
        host: String,
        detail: String,
    },
}

impl OutcomeEvent {
    /// Parse the event's display line into an outcome
    ///
    /// The host comes from the display line, not from the order in which
    /// events arrive.
    pub fn from_engine(event: &EngineEvent) -> Result<Self, PayloadParseError> {
        let parsed = parse_payload(&event.stdout)?;
        Ok(match event.kind {
            EventKind::Ok => OutcomeEvent::Ok {
                host: parsed.host,
                status: parsed.status,
                payload: parsed.body,
            },
            EventKind::Unreachable => OutcomeEvent::Unreachable {
                host: parsed.host,
                detail: Value::Object(parsed.body).to_string(),
            },
            EventKind::Failed => OutcomeEvent::Failed {
                host: parsed.host,
                detail: Value::Object(parsed.body).to_string(),
            },
        })
    }

    pub fn host(&self) -> &str {
        match self {
            OutcomeEvent::Ok { host, .. }
            | OutcomeEvent::Unreachable { host, .. }
            | OutcomeEvent::Failed { host, .. } => host,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            OutcomeEvent::Ok { .. } => EventKind::Ok,
            OutcomeEvent::Unreachable { .. } => EventKind::Unreachable,
            OutcomeEvent::Failed { .. } => EventKind::Failed,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
