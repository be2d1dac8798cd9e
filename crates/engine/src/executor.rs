// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command invocation pipeline
//!
//! resolve targets → bind credentials → assemble inventory → serialize
//! arguments → run the engine → classify events → aggregate output

use crate::collector::Collector;
use crate::error::ExecuteError;
use hr_adapters::{ExecutionEngine, RunRequest};
use hr_catalog::CommandDef;
use hr_core::{
    assemble, parse_concurrency, resolve_targets, AggregateOutput, ConfigError, HostArg,
    Inventory, ModuleArgs, Parameters, RESERVED_CONCURRENCY, RESERVED_HOST,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::num::NonZeroUsize;
use tracing::Instrument;

/// Arguments supplied with one command call
pub type CommandArgs = IndexMap<String, Value>;

/// Fully prepared input for one engine run
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command_name: String,
    pub module_name: String,
    pub arguments: ModuleArgs,
    pub concurrency: NonZeroUsize,
    pub inventory: Inventory,
    pub host_based: bool,
    pub outputs_prefix: String,
}

fn host_arg(args: &CommandArgs) -> Result<Option<HostArg>, ConfigError> {
    match args.get(RESERVED_HOST) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| ConfigError::InvalidHost(value.to_string())),
    }
}

impl Invocation {
    /// Build the invocation for a command call
    ///
    /// Fails before any engine call when a host-based command has no usable
    /// targets or the concurrency is not a positive integer.
    pub fn prepare(
        command: &CommandDef,
        args: &CommandArgs,
        params: &Parameters,
    ) -> Result<Self, ConfigError> {
        let host_based = command.is_host_based();
        let concurrency = parse_concurrency(args.get(RESERVED_CONCURRENCY), params.concurrency)?;

        let inventory = if host_based {
            let targets = resolve_targets(host_arg(args)?.as_ref(), params.port)?;
            assemble(&targets, command.connection, &params.creds)?
        } else {
            Inventory::local()
        };

        let mut arguments = ModuleArgs::from_command_args(args, &command.ignored_args);
        if !host_based {
            arguments.extend(&params.module_args);
        }

        Ok(Self {
            command_name: command.name.clone(),
            module_name: command.module.clone(),
            arguments,
            concurrency,
            inventory,
            host_based,
            outputs_prefix: command.outputs_prefix.clone(),
        })
    }
}

/// Runs invocations against the execution engine
#[derive(Clone)]
pub struct Executor<E> {
    engine: E,
}

impl<E: ExecutionEngine> Executor<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Execute one invocation and aggregate its results
    ///
    /// The first fatal outcome ends consumption; the engine is left to finish
    /// in-flight work on its own.
    pub async fn execute(&self, invocation: Invocation) -> Result<AggregateOutput, ExecuteError> {
        let span = tracing::info_span!(
            "invocation",
            command = %invocation.command_name,
            module = %invocation.module_name
        );

        async {
            tracing::info!(
                targets = invocation.inventory.len(),
                concurrency = invocation.concurrency.get(),
                host_based = invocation.host_based,
                "executing"
            );
            tracing::debug!(args = %invocation.arguments.to_kv_string(), "module arguments");

            let start = std::time::Instant::now();
            let mut collector = Collector::new(invocation.module_name.clone());
            let mut events = self
                .engine
                .run(RunRequest {
                    inventory: invocation.inventory,
                    module: invocation.module_name,
                    args: invocation.arguments,
                    forks: invocation.concurrency,
                })
                .await?;

            while let Some(event) = events.recv().await {
                let event = event?;
                if let Err(e) = collector.accept(&event) {
                    tracing::error!(host = %event.host, kind = %event.kind, error = %e, "fatal outcome");
                    return Err(e);
                }
            }

            let output = collector.finish(invocation.host_based, invocation.outputs_prefix)?;
            tracing::info!(
                results = output.results.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "completed"
            );
            Ok(output)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
