// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hr list` - List registered commands

use hr_catalog::{CommandDef, Registry};
use serde::Serialize;
use std::fmt;

/// One row of the command listing
#[derive(Debug, Serialize)]
pub struct CommandRow {
    pub name: String,
    pub module: String,
    pub connection: String,
    pub integration: String,
}

impl From<&CommandDef> for CommandRow {
    fn from(command: &CommandDef) -> Self {
        Self {
            name: command.name.clone(),
            module: command.module.clone(),
            connection: command.connection.to_string(),
            integration: command.integration.clone(),
        }
    }
}

impl fmt::Display for CommandRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<32} {:<24} {}", self.name, self.module, self.connection)
    }
}

/// Rows for every registered command, sorted by name
pub fn rows(registry: &Registry) -> Vec<CommandRow> {
    registry.commands().map(CommandRow::from).collect()
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
