// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command dispatch

use crate::error::RuntimeError;
use crate::executor::{CommandArgs, Executor, Invocation};
use hr_adapters::ExecutionEngine;
use hr_catalog::Registry;
use hr_core::{AggregateOutput, Parameters};

/// Connectivity check command; answers without touching the engine
pub const TEST_MODULE: &str = "test-module";

/// Outcome of a dispatched command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// `test-module` answered `ok`
    TestOk,
    Completed(AggregateOutput),
}

/// Runtime that dispatches named commands to the executor
pub struct Runtime<E> {
    registry: Registry,
    params: Parameters,
    executor: Executor<E>,
}

impl<E: ExecutionEngine> Runtime<E> {
    pub fn new(engine: E, registry: Registry, params: Parameters) -> Self {
        Self {
            registry,
            params,
            executor: Executor::new(engine),
        }
    }

    /// Run a command by name
    pub async fn run_command(
        &self,
        name: &str,
        args: &CommandArgs,
    ) -> Result<CommandResult, RuntimeError> {
        if name == TEST_MODULE {
            tracing::debug!("test-module");
            return Ok(CommandResult::TestOk);
        }

        let command = self
            .registry
            .get_command(name)
            .ok_or_else(|| RuntimeError::CommandNotFound(name.to_string()))?;

        let invocation =
            Invocation::prepare(command, args, &self.params).map_err(crate::ExecuteError::from)?;
        let output = self.executor.execute(invocation).await?;
        Ok(CommandResult::Completed(output))
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
