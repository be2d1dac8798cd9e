// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hr_core::{
    assemble, ConnectionType, Credentials, EventKind, Inventory, ModuleArgs, StoredCredential,
    TargetDescriptor,
};
use std::num::NonZeroUsize;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

/// Write an executable stand-in for the engine binary
fn script(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("ansible");
    std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn request(inventory: Inventory) -> RunRequest {
    RunRequest {
        inventory,
        module: "ping".to_string(),
        args: ModuleArgs::new(),
        forks: NonZeroUsize::new(2).unwrap(),
    }
}

async fn collect(mut rx: EventStream) -> Vec<Result<EngineEvent, EngineError>> {
    let mut out = Vec::new();
    while let Some(item) = rx.recv().await {
        out.push(item);
    }
    out
}

#[tokio::test]
async fn streams_events_in_output_order() {
    let dir = TempDir::new().unwrap();
    let bin = script(
        &dir,
        r#"cat <<'EOF'
web2 | SUCCESS => {
    "ping": "pong"
}
web1 | FAILED! => {
    "msg": "boom"
}
EOF
exit 2
"#,
    );

    let rx = AnsibleAdapter::new(bin)
        .run(request(Inventory::local()))
        .await
        .unwrap();
    let events: Vec<_> = collect(rx).await.into_iter().map(|e| e.unwrap()).collect();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, EventKind::Ok);
    assert_eq!(events[0].host, "web2");
    assert_eq!(events[1].kind, EventKind::Failed);
    assert_eq!(events[1].host, "web1");
}

#[tokio::test]
async fn passes_module_forks_and_structured_args() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("argv");
    let bin = script(
        &dir,
        &format!(
            "for a in \"$@\"; do echo \"$a\" >> {}; done\n",
            log.display()
        ),
    );

    let mut req = request(Inventory::local());
    req.module = "service".to_string();
    req.args.set("name", serde_json::json!("nginx \"main\""));
    let rx = AnsibleAdapter::new(bin).run(req).await.unwrap();
    collect(rx).await;

    let argv = std::fs::read_to_string(&log).unwrap();
    let argv: Vec<&str> = argv.lines().collect();
    assert_eq!(argv[0], "all");
    assert_eq!(argv[1], "-i");
    assert!(argv[2].ends_with(".json"));
    assert_eq!(&argv[3..7], &["-m", "service", "-f", "2"]);
    assert_eq!(argv[7], "-a");
    assert_eq!(argv[8], r#"{"name":"nginx \"main\""}"#);
    assert!(!argv.contains(&"--private-key"));
}

#[tokio::test]
async fn inventory_file_holds_host_vars() {
    let dir = TempDir::new().unwrap();
    let copy = dir.path().join("inventory.json");
    let bin = script(&dir, &format!("cp \"$3\" {}\n", copy.display()));

    let inventory = assemble(
        &[TargetDescriptor::new("10.0.0.5").with_port(2222)],
        ConnectionType::Ssh,
        &Credentials {
            identifier: Some("admin".to_string()),
            password: Some("pw".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    let rx = AnsibleAdapter::new(bin).run(request(inventory)).await.unwrap();
    collect(rx).await;

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&copy).unwrap()).unwrap();
    let host = &doc["all"]["hosts"]["10.0.0.5"];
    assert_eq!(host["ansible_host"], "10.0.0.5");
    assert_eq!(host["ansible_port"], "2222");
    assert_eq!(host["ansible_user"], "admin");
}

#[tokio::test]
async fn key_material_goes_to_private_key_file() {
    let dir = TempDir::new().unwrap();
    let copy = dir.path().join("key");
    let bin = script(
        &dir,
        &format!(
            "while [ $# -gt 0 ]; do if [ \"$1\" = --private-key ]; then cp \"$2\" {}; fi; shift; done\n",
            copy.display()
        ),
    );

    let inventory = assemble(
        &[TargetDescriptor::new("web1")],
        ConnectionType::Ssh,
        &Credentials {
            credentials: Some(StoredCredential {
                user: Some("deploy".to_string()),
                password: None,
                sshkey: Some("-----BEGIN KEY-----".to_string()),
            }),
            ..Default::default()
        },
    )
    .unwrap();
    let rx = AnsibleAdapter::new(bin).run(request(inventory)).await.unwrap();
    collect(rx).await;

    assert_eq!(std::fs::read_to_string(&copy).unwrap(), "-----BEGIN KEY-----");
}

#[tokio::test]
async fn failing_run_without_events_reports_exit_status() {
    let dir = TempDir::new().unwrap();
    let bin = script(&dir, "echo 'ERROR! bad inventory' >&2\nexit 5\n");

    let rx = AnsibleAdapter::new(bin)
        .run(request(Inventory::local()))
        .await
        .unwrap();
    let items = collect(rx).await;

    assert_eq!(items.len(), 1);
    match &items[0] {
        Err(EngineError::ExitStatus { code, stderr }) => {
            assert_eq!(*code, Some(5));
            assert!(stderr.contains("bad inventory"));
        }
        other => panic!("expected exit status error, got {:?}", other),
    }
}

#[test]
fn default_binary_is_ansible_on_path() {
    assert_eq!(AnsibleAdapter::default().bin(), Path::new("ansible"));
    assert_eq!(
        AnsibleAdapter::new("/opt/ansible/bin/ansible").bin(),
        Path::new("/opt/ansible/bin/ansible")
    );
}

#[tokio::test]
async fn missing_binary_is_spawn_failure() {
    let adapter = AnsibleAdapter::new(Path::new("/nonexistent/ansible"));
    let err = adapter.run(request(Inventory::local())).await.unwrap_err();
    assert!(matches!(err, EngineError::SpawnFailed(_)));
}

#[tokio::test]
async fn dropped_receiver_lets_run_finish() {
    let dir = TempDir::new().unwrap();
    let done = dir.path().join("done");
    let bin = script(
        &dir,
        &format!(
            "echo 'web1 | SUCCESS => {{}}'\necho 'web2 | SUCCESS => {{}}'\ntouch {}\n",
            done.display()
        ),
    );

    let mut rx = AnsibleAdapter::new(bin)
        .run(request(Inventory::local()))
        .await
        .unwrap();
    let first = rx.recv().await.unwrap().unwrap();
    assert_eq!(first.host, "web1");
    drop(rx);

    for _ in 0..50 {
        if done.exists() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(done.exists());
}
