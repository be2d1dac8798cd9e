// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Definition file parsing

use crate::{CommandDef, IntegrationDef};
use hr_core::{ConnectionType, UnknownConnection};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading definitions
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("integration {integration}: {source}")]
    UnknownConnection {
        integration: String,
        #[source]
        source: UnknownConnection,
    },
    #[error("command {command} defined by both {first} and {second}")]
    DuplicateCommand {
        command: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    integration: Vec<RawIntegration>,
}

#[derive(Debug, Deserialize)]
struct RawIntegration {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    command_prefix: Option<String>,
    #[serde(default, alias = "hostbasedtarget")]
    connection: Option<String>,
    #[serde(default, alias = "ansible_modules")]
    modules: Vec<String>,
    #[serde(default)]
    ignored_args: Vec<String>,
}

impl RawIntegration {
    fn into_def(self) -> Result<IntegrationDef, ParseError> {
        if self.name.trim().is_empty() {
            return Err(ParseError::InvalidFormat(
                "integration name must not be empty".to_string(),
            ));
        }
        if self.modules.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "integration {} lists no modules",
                self.name
            )));
        }
        let connection = self
            .connection
            .as_deref()
            .map(str::parse::<ConnectionType>)
            .transpose()
            .map_err(|source| ParseError::UnknownConnection {
                integration: self.name.clone(),
                source,
            })?;

        Ok(IntegrationDef {
            name: self.name,
            description: self.description,
            category: self.category,
            command_prefix: self.command_prefix,
            connection,
            modules: self.modules,
            ignored_args: self.ignored_args,
        })
    }
}

/// Every command known to the process, built once at startup
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub integrations: Vec<IntegrationDef>,
    commands: BTreeMap<String, CommandDef>,
}

impl Registry {
    /// Get a command definition by name
    pub fn get_command(&self, name: &str) -> Option<&CommandDef> {
        self.commands.get(name)
    }

    /// All commands, sorted by name
    pub fn commands(&self) -> impl Iterator<Item = &CommandDef> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Add an integration and all of its commands
    pub fn register(&mut self, integration: IntegrationDef) -> Result<(), ParseError> {
        for command in integration.commands() {
            if let Some(existing) = self.commands.get(&command.name) {
                return Err(ParseError::DuplicateCommand {
                    command: command.name,
                    first: existing.integration.clone(),
                    second: integration.id(),
                });
            }
            tracing::debug!(
                command = %command.name,
                module = %command.module,
                connection = %command.connection,
                "registered command"
            );
            self.commands.insert(command.name.clone(), command);
        }
        self.integrations.push(integration);
        Ok(())
    }
}

/// Parse a definition file from TOML content
pub fn parse_catalog(content: &str) -> Result<Registry, ParseError> {
    let raw: RawCatalog = toml::from_str(content)?;

    let mut registry = Registry::default();
    for integration in raw.integration {
        registry.register(integration.into_def()?)?;
    }
    Ok(registry)
}

/// Read and parse a definition file
pub fn load_catalog(path: &Path) -> Result<Registry, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&content)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
