// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution engine adapters

mod ansible;
mod split;

pub use ansible::{AnsibleAdapter, ANSIBLE_BIN_ENV};
pub use split::{EventBlock, EventSplitter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{EngineCall, FakeEngine};

use async_trait::async_trait;
use hr_core::{EngineEvent, Inventory, ModuleArgs};
use std::num::NonZeroUsize;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from the execution engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine: {0}")]
    SpawnFailed(String),
    #[error("engine I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize engine input: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("engine exited with {code:?} and reported no events: {stderr}")]
    ExitStatus { code: Option<i32>, stderr: String },
}

/// Events streamed back from one run, in emission order
pub type EventStream = mpsc::Receiver<Result<EngineEvent, EngineError>>;

/// Everything the engine needs to run one module against an inventory
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub inventory: Inventory,
    pub module: String,
    pub args: ModuleArgs,
    /// Maximum targets contacted in parallel
    pub forks: NonZeroUsize,
}

/// Adapter for the external multi-host execution engine
#[async_trait]
pub trait ExecutionEngine: Clone + Send + Sync + 'static {
    /// Start a run and stream its events
    ///
    /// Events arrive as targets complete. The stream ends when the run does;
    /// dropping the receiver stops delivery but not the run itself.
    async fn run(&self, request: RunRequest) -> Result<EventStream, EngineError>;
}
