// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use hr_adapters::EngineError;
use hr_core::{ConfigError, PayloadParseError};
use thiserror::Error;

/// Errors that end one command invocation
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Host {host} unreachable\nError Details: {detail}")]
    TargetUnreachable { host: String, detail: String },
    #[error("Host {host} failed running command\nError Details: {detail}")]
    TargetExecutionFailed { host: String, detail: String },
    #[error("invalid engine payload: {0}")]
    Payload(#[from] PayloadParseError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("engine reported no result")]
    NoResult,
}

/// Errors that can occur in the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),
    #[error("command not found: {0}")]
    CommandNotFound(String),
}
