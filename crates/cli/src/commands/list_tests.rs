// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hr_catalog::parse_catalog;

#[test]
fn rows_cover_every_command() {
    let registry = parse_catalog(
        r#"
[[integration]]
name = "Linux"
connection = "ssh"
modules = ["service", "ping"]

[[integration]]
name = "DNS"
modules = ["dig"]
"#,
    )
    .unwrap();

    let rows = rows(&registry);
    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["dns_dig", "linux_ping", "linux_service"]);
    assert_eq!(rows[0].connection, "local");
    assert_eq!(rows[2].integration, "Linux");
}

#[test]
fn row_displays_name_module_connection() {
    let row = CommandRow {
        name: "linux_ping".to_string(),
        module: "ping".to_string(),
        connection: "ssh".to_string(),
        integration: "Linux".to_string(),
    };
    let line = row.to_string();

    assert!(line.starts_with("linux_ping "));
    assert!(line.contains(" ping "));
    assert!(line.ends_with("ssh"));
}
