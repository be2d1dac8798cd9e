// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hr-core: data model and pure transforms for hostrun
//!
//! This crate provides:
//! - Target resolution, credential binding and inventory assembly
//! - Module argument serialization
//! - Engine event payload parsing and result normalization
//! - Markdown rendering of structured results
//!
//! Nothing here performs I/O against targets; see `hr-adapters` for the
//! execution engine boundary and `hr-engine` for the invocation pipeline.

mod error;

pub mod args;
pub mod credential;
pub mod event;
pub mod inventory;
pub mod markdown;
pub mod normalize;
pub mod params;
pub mod payload;
pub mod result;
pub mod target;

pub use args::{display_value, parse_concurrency, ModuleArgs, RESERVED_CONCURRENCY, RESERVED_HOST};
pub use credential::{bind, AuthSource, ConnectionProfile, ConnectionType, UnknownConnection};
pub use error::ConfigError;
pub use event::{EngineEvent, EventKind, OutcomeEvent};
pub use inventory::{assemble, Inventory, InventoryEntry, LOCALHOST};
pub use markdown::{render, title_case};
pub use normalize::{normalize, strip_key_prefix, ENGINE_KEY_PREFIX, FACTS_KEY};
pub use params::{Credentials, Parameters, ParamsError, StoredCredential};
pub use payload::{parse_payload, ParsedPayload, PayloadParseError};
pub use result::{readable_header, AggregateOutput, NormalizedResult, Results};
pub use target::{resolve_targets, HostArg, TargetDescriptor};
