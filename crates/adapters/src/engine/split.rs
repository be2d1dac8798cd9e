// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Splitting engine stdout into per-host event blocks
//!
//! The ad-hoc CLI prints one block per finished host. A block starts with a
//! header line in one of two shapes:
//!
//! ```text
//! web1 | SUCCESS => {
//!     "ping": "pong"
//! }
//! web2 | CHANGED | rc=0 >>
//! raw command output
//! ```
//!
//! JSON blocks pass through untouched. Raw command blocks are rewritten into
//! the JSON shape with `rc` and `stdout` fields so every event carries a
//! `host | STATUS => {json}` line.

use hr_core::{EngineEvent, EventKind};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

// Block header, `host | STATUS => ...` or `host | STATUS | rc=N >>`
#[allow(clippy::expect_used)]
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<host>\S+) \| (?P<status>[A-Z]+!?)(?: =>.*| \| rc=(?P<rc>-?\d+) >>\s*)$")
        .expect("constant regex pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockShape {
    Json,
    Raw { rc: i64 },
}

/// One host's output block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBlock {
    pub host: String,
    pub status: String,
    shape: BlockShape,
    lines: Vec<String>,
}

impl EventBlock {
    /// The `host | STATUS => {json}` display line for this block
    pub fn display_line(&self) -> String {
        match self.shape {
            BlockShape::Json => self.lines.join("\n"),
            BlockShape::Raw { rc } => {
                let body = json!({ "rc": rc, "stdout": self.lines.join("\n") });
                format!("{} | {} => {}", self.host, self.status, body)
            }
        }
    }

    /// Convert into an engine event; statuses with no outcome kind yield `None`
    pub fn into_event(self) -> Option<EngineEvent> {
        let kind = EventKind::from_status(&self.status)?;
        let stdout = self.display_line();
        Some(EngineEvent::new(kind, self.host, stdout))
    }
}

/// Incremental splitter fed one stdout line at a time
#[derive(Debug, Default)]
pub struct EventSplitter {
    current: Option<EventBlock>,
    /// Lines seen before the first header
    preamble: usize,
}

impl EventSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line; returns the previous block once a new header closes it
    pub fn push_line(&mut self, line: &str) -> Option<EventBlock> {
        if let Some(caps) = HEADER.captures(line) {
            let host = caps["host"].to_string();
            let status = caps["status"].to_string();
            let block = match caps.name("rc") {
                Some(rc) => EventBlock {
                    host,
                    status,
                    shape: BlockShape::Raw {
                        rc: rc.as_str().parse().unwrap_or_default(),
                    },
                    lines: Vec::new(),
                },
                None => EventBlock {
                    host,
                    status,
                    shape: BlockShape::Json,
                    lines: vec![line.to_string()],
                },
            };
            return self.current.replace(block);
        }

        match self.current.as_mut() {
            Some(block) => block.lines.push(line.to_string()),
            None => {
                self.preamble += 1;
                tracing::debug!(line, "ignoring engine output before first event");
            }
        }
        None
    }

    /// Close the last open block at end of output
    pub fn finish(&mut self) -> Option<EventBlock> {
        self.current.take()
    }

    /// Number of lines discarded before the first header
    pub fn preamble_lines(&self) -> usize {
        self.preamble
    }
}

#[cfg(test)]
#[path = "split_tests.rs"]
mod tests;
