// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use hr_core::AggregateOutput;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Structured document printed with `--json`
#[derive(Serialize)]
struct JsonOutput<'a> {
    outputs_prefix: &'a str,
    outputs: &'a hr_core::Results,
    readable: &'a str,
}

/// Render a command's aggregate output
pub fn format_output(output: &AggregateOutput, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(output.readable.clone()),
        OutputFormat::Json => {
            let doc = JsonOutput {
                outputs_prefix: &output.outputs_prefix,
                outputs: &output.results,
                readable: &output.readable,
            };
            Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
        }
    }
}

/// Print a list of items, one per line or as a JSON array
pub fn print_list<T: Serialize + std::fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
