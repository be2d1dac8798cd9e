// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ansible ad-hoc CLI engine adapter

use super::split::EventSplitter;
use super::{EngineError, EventStream, ExecutionEngine, RunRequest};
use async_trait::async_trait;
use hr_core::EngineEvent;
use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use tempfile::NamedTempFile;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Environment variable overriding the engine binary
pub const ANSIBLE_BIN_ENV: &str = "HR_ANSIBLE_BIN";

const DEFAULT_BIN: &str = "ansible";
const CHANNEL_CAPACITY: usize = 64;

/// Runs modules through the `ansible` ad-hoc CLI
#[derive(Clone)]
pub struct AnsibleAdapter {
    bin: PathBuf,
}

impl Default for AnsibleAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_BIN)
    }
}

impl AnsibleAdapter {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    /// Binary from `HR_ANSIBLE_BIN`, else `ansible` on the PATH
    pub fn from_env() -> Self {
        match std::env::var_os(ANSIBLE_BIN_ENV) {
            Some(bin) if !bin.is_empty() => Self::new(bin),
            _ => Self::default(),
        }
    }

    pub fn bin(&self) -> &std::path::Path {
        &self.bin
    }
}

fn write_temp(suffix: &str, contents: &[u8]) -> Result<NamedTempFile, EngineError> {
    let mut file = tempfile::Builder::new()
        .prefix("hr-")
        .suffix(suffix)
        .tempfile()?;
    file.write_all(contents)?;
    file.flush()?;
    Ok(file)
}

#[async_trait]
impl ExecutionEngine for AnsibleAdapter {
    async fn run(&self, request: RunRequest) -> Result<EventStream, EngineError> {
        let inventory = serde_json::to_vec(&request.inventory.to_json())?;
        let inventory_file = write_temp(".json", &inventory)?;
        let key_file = match request.inventory.ssh_key() {
            Some(key) => Some(write_temp(".key", key.as_bytes())?),
            None => None,
        };

        let mut cmd = Command::new(&self.bin);
        cmd.arg("all")
            .arg("-i")
            .arg(inventory_file.path())
            .arg("-m")
            .arg(&request.module)
            .arg("-f")
            .arg(request.forks.to_string());
        if !request.args.is_empty() {
            cmd.arg("-a").arg(request.args.to_json().to_string());
        }
        if let Some(key) = &key_file {
            cmd.arg("--private-key").arg(key.path());
        }
        cmd.env("ANSIBLE_NOCOLOR", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| EngineError::SpawnFailed(format!("{}: {}", self.bin.display(), e)))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::SpawnFailed("stdout not captured".to_string()))?;
        let stderr = child.stderr.take();

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            // Temp files must outlive the child
            let _inventory_file = inventory_file;
            let _key_file = key_file;

            let stderr_task = tokio::spawn(async move {
                let mut text = String::new();
                if let Some(mut stderr) = stderr {
                    if let Err(e) = stderr.read_to_string(&mut text).await {
                        tracing::debug!(error = %e, read = text.len(), "engine stderr read failed");
                    }
                }
                text
            });

            let mut splitter = EventSplitter::new();
            let mut emitted = 0usize;
            let mut open = true;
            let mut lines = BufReader::new(stdout).lines();

            loop {
                let block = match lines.next_line().await {
                    Ok(Some(line)) => splitter.push_line(&line),
                    Ok(None) => break,
                    Err(e) => {
                        if open {
                            let _ = tx.send(Err(EngineError::Io(e))).await;
                        }
                        open = false;
                        break;
                    }
                };
                if let Some(event) = block.and_then(|b| b.into_event()) {
                    emitted += 1;
                    open = deliver(&tx, open, event).await;
                }
            }
            if let Some(event) = splitter.finish().and_then(|b| b.into_event()) {
                emitted += 1;
                open = deliver(&tx, open, event).await;
            }
            drop(lines);

            let stderr = stderr_task.await.unwrap_or_default();
            match child.wait().await {
                Ok(status) if !status.success() && emitted == 0 => {
                    if open {
                        let _ = tx
                            .send(Err(EngineError::ExitStatus {
                                code: status.code(),
                                stderr: stderr.trim().to_string(),
                            }))
                            .await;
                    }
                }
                Ok(status) => {
                    tracing::debug!(code = ?status.code(), emitted, "engine exited");
                }
                Err(e) => {
                    if open {
                        let _ = tx.send(Err(EngineError::Io(e))).await;
                    }
                }
            }
        });

        Ok(rx)
    }
}

/// Send an event while the receiver is listening; returns whether it still is
async fn deliver(
    tx: &mpsc::Sender<Result<EngineEvent, EngineError>>,
    open: bool,
    event: EngineEvent,
) -> bool {
    if !open {
        return false;
    }
    if tx.send(Ok(event)).await.is_err() {
        tracing::debug!("event receiver dropped, letting engine finish");
        return false;
    }
    true
}

#[cfg(test)]
#[path = "ansible_tests.rs"]
mod tests;
