// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Integration definitions and the command registry

mod definition;
mod parser;

pub use definition::{CommandDef, IntegrationDef};
pub use parser::{load_catalog, parse_catalog, ParseError, Registry};
