// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target resolution
//!
//! Turns the raw `host` argument into an ordered list of target descriptors.
//! The argument is either a comma separated string or a list of strings; both
//! forms resolve to the same descriptors for the same tokens.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw `host` argument as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostArg {
    /// Comma separated hosts, e.g. `"web1, web2:2222"`
    Scalar(String),
    /// One host per element
    List(Vec<String>),
}

impl HostArg {
    /// Split into trimmed, non-empty tokens in the given order
    pub fn tokens(&self) -> Vec<&str> {
        let raw: Vec<&str> = match self {
            HostArg::Scalar(s) => s.split(',').collect(),
            HostArg::List(items) => items.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl From<&str> for HostArg {
    fn from(s: &str) -> Self {
        HostArg::Scalar(s.to_string())
    }
}

impl From<Vec<String>> for HostArg {
    fn from(items: Vec<String>) -> Self {
        HostArg::List(items)
    }
}

/// One endpoint the module will run against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TargetDescriptor {
    pub address: String,
    pub port: Option<u16>,
}

impl TargetDescriptor {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Parse one host token: `addr`, `addr:port`, `[v6addr]` or `[v6addr]:port`
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        let token = token.trim();

        let (address, port) = if let Some(rest) = token.strip_prefix('[') {
            let (address, after) = rest
                .split_once(']')
                .ok_or_else(|| ConfigError::InvalidHost(token.to_string()))?;
            let port = match after {
                "" => None,
                _ => Some(
                    after
                        .strip_prefix(':')
                        .ok_or_else(|| ConfigError::InvalidHost(token.to_string()))?,
                ),
            };
            (address, port)
        } else {
            match token.split_once(':') {
                Some((address, port)) => (address, Some(port)),
                None => (token, None),
            }
        };

        if address.is_empty() {
            return Err(ConfigError::InvalidHost(token.to_string()));
        }

        let mut target = TargetDescriptor::new(address);
        if let Some(port) = port {
            target.port = Some(parse_port(address, port)?);
        }
        Ok(target)
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.port, self.address.contains(':')) {
            (Some(port), true) => write!(f, "[{}]:{}", self.address, port),
            (Some(port), false) => write!(f, "{}:{}", self.address, port),
            (None, _) => write!(f, "{}", self.address),
        }
    }
}

/// Ports are validated rather than passed through: service names and
/// out-of-range numbers are rejected up front.
fn parse_port(address: &str, port: &str) -> Result<u16, ConfigError> {
    match port.trim().parse::<u16>() {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(ConfigError::InvalidPort {
            host: address.to_string(),
            port: port.to_string(),
        }),
    }
}

/// Resolve the `host` argument of a host-based command
///
/// Tokens without an explicit port receive `default_port` when one is
/// configured. Fails before any network activity when no tokens remain.
pub fn resolve_targets(
    host: Option<&HostArg>,
    default_port: Option<u16>,
) -> Result<Vec<TargetDescriptor>, ConfigError> {
    let tokens = host.map(HostArg::tokens).unwrap_or_default();
    if tokens.is_empty() {
        return Err(ConfigError::MissingHosts);
    }

    tokens
        .into_iter()
        .map(|token| {
            let mut target = TargetDescriptor::parse(token)?;
            if target.port.is_none() {
                target.port = default_port;
            }
            Ok(target)
        })
        .collect()
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
