// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hostrun invocation engine

mod collector;
mod error;
mod executor;
mod runtime;

pub use collector::{Collector, CollectorState};
pub use error::{ExecuteError, RuntimeError};
pub use executor::{CommandArgs, Executor, Invocation};
pub use runtime::{CommandResult, Runtime, TEST_MODULE};
