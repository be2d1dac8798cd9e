// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Integration and command definitions

use heck::ToSnakeCase;
use hr_core::ConnectionType;
use serde::Serialize;

/// One integration: a named group of modules sharing a connection type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationDef {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub command_prefix: Option<String>,
    /// Absent means the commands run locally
    pub connection: Option<ConnectionType>,
    pub modules: Vec<String>,
    pub ignored_args: Vec<String>,
}

fn is_single_word(name: &str) -> bool {
    name.split_whitespace().count() <= 1
}

impl IntegrationDef {
    /// Stable identifier: the name, with spaces removed when it has several words
    pub fn id(&self) -> String {
        if is_single_word(&self.name) {
            self.name.clone()
        } else {
            self.name.replace(' ', "")
        }
    }

    /// Prefix shared by every command of this integration
    ///
    /// An explicit `command_prefix` wins. Otherwise a one-word name is
    /// lower-cased and a multi-word name is snake-cased.
    pub fn command_prefix(&self) -> String {
        if let Some(prefix) = &self.command_prefix {
            return prefix.clone();
        }
        if is_single_word(&self.name) {
            self.name.to_lowercase()
        } else {
            self.id().to_snake_case()
        }
    }

    /// Command name for a module; modules already carrying the prefix keep their name
    pub fn command_name(&self, module: &str) -> String {
        let prefix = self.command_prefix();
        if module.starts_with(&format!("{}_", prefix)) {
            module.to_string()
        } else {
            format!("{}_{}", prefix, module)
        }
    }

    /// Context path attached to a module's structured results
    pub fn outputs_prefix(&self, module: &str) -> String {
        format!("{}.{}", self.id().to_lowercase(), module)
    }

    pub fn connection_type(&self) -> ConnectionType {
        self.connection.unwrap_or_default()
    }

    pub fn is_host_based(&self) -> bool {
        self.connection_type().is_host_based()
    }

    /// Expand every module into a command definition
    pub fn commands(&self) -> Vec<CommandDef> {
        self.modules
            .iter()
            .map(|module| CommandDef {
                name: self.command_name(module),
                module: module.clone(),
                integration: self.id(),
                connection: self.connection_type(),
                ignored_args: self.ignored_args.clone(),
                outputs_prefix: self.outputs_prefix(module),
            })
            .collect()
    }
}

/// A single dispatchable command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDef {
    pub name: String,
    /// Engine module executed by the command
    pub module: String,
    /// Owning integration id
    pub integration: String,
    pub connection: ConnectionType,
    pub ignored_args: Vec<String>,
    pub outputs_prefix: String,
}

impl CommandDef {
    pub fn is_host_based(&self) -> bool {
        self.connection.is_host_based()
    }
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
