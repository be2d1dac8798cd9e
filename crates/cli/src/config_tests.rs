// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

#[test]
fn default_paths_live_under_app_dir() {
    if let Some(path) = default_definition_path() {
        assert!(path.ends_with("hostrun/integrations.toml"));
    }
    if let Some(path) = default_params_path() {
        assert!(path.ends_with("hostrun/params.toml"));
    }
}

#[test]
fn explicit_definition_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("defs.toml");
    std::fs::write(
        &path,
        "[[integration]]\nname = \"Linux\"\nconnection = \"ssh\"\nmodules = [\"ping\"]\n",
    )
    .unwrap();

    let registry = load_registry(Some(&path)).unwrap();
    assert!(registry.get_command("linux_ping").is_some());
}

#[test]
fn missing_explicit_definition_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = load_registry(Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.toml"));
}

#[test]
fn explicit_params_are_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("params.toml");
    std::fs::write(&path, "port = 2222\n[creds]\nidentifier = \"admin\"\n").unwrap();

    let params = load_params(Some(&path)).unwrap();
    assert_eq!(params.port, Some(2222));
    assert_eq!(params.creds.identifier.as_deref(), Some("admin"));
}

#[test]
fn missing_explicit_params_is_error() {
    let dir = TempDir::new().unwrap();
    assert!(load_params(Some(&dir.path().join("absent.toml"))).is_err());
}
