// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Precondition errors raised before any engine call

use thiserror::Error;

/// Errors in the caller-supplied configuration of an invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required argument: host")]
    MissingHosts,
    #[error("invalid host: {0}")]
    InvalidHost(String),
    #[error("invalid port '{port}' for host {host}: expected an integer in 1-65535")]
    InvalidPort { host: String, port: String },
    #[error("inventory is empty")]
    EmptyInventory,
    #[error("invalid concurrency '{0}': expected a positive integer")]
    InvalidConcurrency(String),
}
