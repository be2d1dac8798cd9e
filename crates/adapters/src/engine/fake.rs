// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake execution engine for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{EngineError, EventStream, ExecutionEngine, RunRequest};
use async_trait::async_trait;
use hr_core::{EngineEvent, EventKind};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Run { request: RunRequest },
}

#[derive(Default)]
struct FakeState {
    events: Vec<EngineEvent>,
    spawn_error: Option<String>,
    stream_error: Option<String>,
}

/// Fake engine replaying scripted events
#[derive(Clone, Default)]
pub struct FakeEngine {
    state: Arc<Mutex<FakeState>>,
    calls: Arc<Mutex<Vec<EngineCall>>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that replays the given events on every run
    pub fn with_events(events: Vec<EngineEvent>) -> Self {
        let engine = Self::default();
        engine.set_events(events);
        engine
    }

    pub fn set_events(&self, events: Vec<EngineEvent>) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).events = events;
    }

    /// Queue an `ok` event with a `host | SUCCESS => {body}` line
    pub fn push_ok(&self, host: &str, body: serde_json::Value) {
        self.push(EventKind::Ok, host, "SUCCESS", body);
    }

    /// Queue an `unreachable` event
    pub fn push_unreachable(&self, host: &str, body: serde_json::Value) {
        self.push(EventKind::Unreachable, host, "UNREACHABLE!", body);
    }

    /// Queue a `failed` event
    pub fn push_failed(&self, host: &str, body: serde_json::Value) {
        self.push(EventKind::Failed, host, "FAILED!", body);
    }

    fn push(&self, kind: EventKind, host: &str, status: &str, body: serde_json::Value) {
        let stdout = format!("{} | {} => {}", host, status, body);
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .events
            .push(EngineEvent::new(kind, host, stdout));
    }

    /// Make the next runs fail before producing a stream
    pub fn fail_spawn(&self, message: &str) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).spawn_error = Some(message.to_string());
    }

    /// Append a stream error after the scripted events
    pub fn fail_stream(&self, message: &str) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).stream_error = Some(message.to_string());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Requests of all recorded runs
    pub fn requests(&self) -> Vec<RunRequest> {
        self.calls()
            .into_iter()
            .map(|call| match call {
                EngineCall::Run { request } => request,
            })
            .collect()
    }
}

#[async_trait]
impl ExecutionEngine for FakeEngine {
    async fn run(&self, request: RunRequest) -> Result<EventStream, EngineError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(EngineCall::Run { request });

        let (events, spawn_error, stream_error) = {
            let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            (
                state.events.clone(),
                state.spawn_error.clone(),
                state.stream_error.clone(),
            )
        };
        if let Some(message) = spawn_error {
            return Err(EngineError::SpawnFailed(message));
        }

        // Sized so every scripted item fits without a reader
        let (tx, rx) = mpsc::channel(events.len() + 1);
        for event in events {
            let _ = tx.send(Ok(event)).await;
        }
        if let Some(message) = stream_error {
            let _ = tx
                .send(Err(EngineError::Io(std::io::Error::other(message))))
                .await;
        }
        Ok(rx)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
