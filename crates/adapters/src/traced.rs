// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::engine::{EngineError, EventStream, ExecutionEngine, RunRequest};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any ExecutionEngine
#[derive(Clone)]
pub struct TracedEngine<E> {
    inner: E,
}

impl<E> TracedEngine<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E: ExecutionEngine> ExecutionEngine for TracedEngine<E> {
    async fn run(&self, request: RunRequest) -> Result<EventStream, EngineError> {
        let span = tracing::info_span!(
            "engine.run",
            module = %request.module,
            forks = request.forks.get()
        );

        async {
            tracing::info!(
                targets = request.inventory.len(),
                args = request.args.len(),
                key = request.inventory.ssh_key().is_some(),
                "starting"
            );

            let start = std::time::Instant::now();
            let result = self.inner.run(request).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(_) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "engine started"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "engine failed to start"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
