// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config file resolution

use anyhow::{Context, Result};
use hr_catalog::{load_catalog, Registry};
use hr_core::Parameters;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "hostrun";
const DEFINITION_FILE: &str = "integrations.toml";
const PARAMS_FILE: &str = "params.toml";

fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Default definition file under the user config directory
pub fn default_definition_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(DEFINITION_FILE))
}

/// Default parameter file under the user config directory
pub fn default_params_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(PARAMS_FILE))
}

/// Load the command registry from an explicit path or the default location
pub fn load_registry(explicit: Option<&Path>) -> Result<Registry> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_definition_path()
            .context("no config directory; pass --definition or set HR_DEFINITION")?,
    };
    tracing::debug!(path = %path.display(), "loading definitions");
    load_catalog(&path).with_context(|| format!("loading definitions from {}", path.display()))
}

/// Load parameters; a missing default file means no parameters
pub fn load_params(explicit: Option<&Path>) -> Result<Parameters> {
    if let Some(path) = explicit {
        return Parameters::load(path)
            .with_context(|| format!("loading parameters from {}", path.display()));
    }

    match default_params_path() {
        Some(path) if path.exists() => Parameters::load(&path)
            .with_context(|| format!("loading parameters from {}", path.display())),
        _ => Ok(Parameters::default()),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
