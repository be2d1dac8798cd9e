// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event classification and result collection
//!
//! Events are consumed in arrival order. `ok` events are normalized and
//! accumulated; the first `unreachable` or `failed` event terminates the
//! collector and everything accumulated so far is discarded.

use crate::error::ExecuteError;
use hr_core::{
    markdown, normalize, readable_header, AggregateOutput, EngineEvent, NormalizedResult,
    OutcomeEvent, Results,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    Collecting,
    Terminated,
}

/// Accumulates normalized results for one invocation
#[derive(Debug)]
pub struct Collector {
    module: String,
    state: CollectorState,
    results: Vec<NormalizedResult>,
    readable: String,
}

impl Collector {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            state: CollectorState::Collecting,
            results: Vec::new(),
            readable: String::new(),
        }
    }

    pub fn state(&self) -> CollectorState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Classify one event
    ///
    /// Fatal outcomes and unparseable payloads terminate the collector and
    /// return the error. Events after termination are ignored.
    pub fn accept(&mut self, event: &EngineEvent) -> Result<(), ExecuteError> {
        if self.state == CollectorState::Terminated {
            tracing::debug!(host = %event.host, "ignoring event after termination");
            return Ok(());
        }

        match self.classify(event) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state = CollectorState::Terminated;
                self.results.clear();
                self.readable.clear();
                Err(e)
            }
        }
    }

    fn classify(&mut self, event: &EngineEvent) -> Result<(), ExecuteError> {
        match OutcomeEvent::from_engine(event)? {
            OutcomeEvent::Ok {
                host,
                status,
                payload,
            } => {
                let result = normalize(&self.module, &host, &status, payload)?;
                tracing::debug!(host = %result.host, status = %result.status, "ok");

                self.readable.push_str(&readable_header(&result.host, &result.status));
                self.readable.push_str(&markdown::render(&result.fields_value()));
                self.results.push(result);
                Ok(())
            }
            OutcomeEvent::Unreachable { host, detail } => {
                Err(ExecuteError::TargetUnreachable { host, detail })
            }
            OutcomeEvent::Failed { host, detail } => {
                Err(ExecuteError::TargetExecutionFailed { host, detail })
            }
        }
    }

    /// Finish collection into the aggregate output
    ///
    /// Local commands unwrap to their single result; extra results beyond
    /// the first are dropped with a warning.
    pub fn finish(
        self,
        host_based: bool,
        outputs_prefix: impl Into<String>,
    ) -> Result<AggregateOutput, ExecuteError> {
        if self.state == CollectorState::Terminated {
            return Err(ExecuteError::NoResult);
        }

        let results = if host_based {
            Results::Many(self.results)
        } else {
            let count = self.results.len();
            let mut results = self.results.into_iter();
            let first = results.next().ok_or(ExecuteError::NoResult)?;
            if count > 1 {
                tracing::warn!(count, kept = %first.host, "local command produced several results, keeping the first");
            }
            Results::Single(first)
        };

        Ok(AggregateOutput {
            readable: self.readable,
            outputs_prefix: outputs_prefix.into(),
            results,
        })
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
