// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown rendering of normalized results
//!
//! Nested mappings become headings one level deeper than their parent,
//! scalars become bullet lines:
//!
//! ```text
//! # Service #
//! * name: spooler
//! * ## Config ##
//!   * start_mode: auto
//! ```

use crate::args::display_value;
use serde_json::{Map, Value};

/// Render a JSON value starting at depth 0
///
/// Only mappings and sequences produce output; a bare scalar renders empty.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    render_at(value, 0, &mut out);
    out
}

fn render_at(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Object(map) => render_map(map, depth, out),
        Value::Array(items) => render_list(items, depth, out),
        _ => {}
    }
}

fn render_map(map: &Map<String, Value>, depth: usize, out: &mut String) {
    for (key, value) in map {
        match value {
            Value::Object(_) | Value::Array(_) => {
                push_heading(key, depth, out);
                render_at(value, depth + 1, out);
            }
            scalar => push_bullet(key, scalar, depth, out),
        }
    }
}

fn render_list(items: &[Value], depth: usize, out: &mut String) {
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Object(_) | Value::Array(_) => render_at(item, depth, out),
            scalar => push_bullet(&index.to_string(), scalar, depth, out),
        }
    }
}

fn push_heading(key: &str, depth: usize, out: &mut String) {
    let hashes = "#".repeat(depth + 1);
    if depth > 0 {
        out.push_str("* ");
    }
    out.push_str(&hashes);
    out.push(' ');
    out.push_str(&title_case(key));
    out.push(' ');
    out.push_str(&hashes);
    out.push('\n');
}

fn push_bullet(key: &str, value: &Value, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth.saturating_sub(1)));
    out.push_str("* ");
    out.push_str(key);
    out.push_str(": ");
    out.push_str(&display_value(value));
    out.push('\n');
}

/// Title-case a key: each run of letters starts upper-case, the rest lower
///
/// Any non-letter starts a new word, so `os_family` becomes `Os_Family`
/// and `ipv4` becomes `Ipv4`.
pub fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut in_word = false;
    for c in key.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
