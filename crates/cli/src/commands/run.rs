// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hr run <command> [--host H]... [-a key=value]...` - Run a registered command

use crate::output::{format_output, OutputFormat};
use anyhow::Result;
use clap::Args;
use hr_adapters::ExecutionEngine;
use hr_core::{RESERVED_CONCURRENCY, RESERVED_HOST};
use hr_engine::{CommandArgs, CommandResult, Runtime};
use serde_json::Value;

#[derive(Args)]
pub struct RunArgs {
    /// Command to run (e.g., "linux_service" or "test-module")
    pub command: String,

    /// Target host, optionally host:port; repeat or comma separate for several
    #[arg(long = "host", value_name = "HOST")]
    pub hosts: Vec<String>,

    /// Maximum number of targets contacted in parallel
    #[arg(long)]
    pub concurrency: Option<String>,

    /// Module arguments (key=value)
    #[arg(short = 'a', long = "arg", value_parser = parse_key_val)]
    pub named_args: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

impl RunArgs {
    /// Arguments in the shape the runtime takes
    ///
    /// A single `--host` is passed as a string (comma separated hosts
    /// allowed); several become a list.
    pub fn command_args(&self) -> CommandArgs {
        let mut args = CommandArgs::new();
        for (key, value) in &self.named_args {
            args.insert(key.clone(), Value::String(value.clone()));
        }
        match self.hosts.as_slice() {
            [] => {}
            [single] => {
                args.insert(RESERVED_HOST.to_string(), Value::String(single.clone()));
            }
            many => {
                let list = many.iter().cloned().map(Value::String).collect();
                args.insert(RESERVED_HOST.to_string(), Value::Array(list));
            }
        }
        if let Some(concurrency) = &self.concurrency {
            args.insert(
                RESERVED_CONCURRENCY.to_string(),
                Value::String(concurrency.clone()),
            );
        }
        args
    }
}

/// Run the command and render what should be printed
pub async fn run<E: ExecutionEngine>(
    runtime: &Runtime<E>,
    args: &RunArgs,
    format: OutputFormat,
) -> Result<String> {
    match runtime.run_command(&args.command, &args.command_args()).await? {
        CommandResult::TestOk => Ok("ok\n".to_string()),
        CommandResult::Completed(output) => format_output(&output, format),
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
