// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hr_adapters::FakeEngine;
use hr_catalog::IntegrationDef;
use hr_core::{ConnectionType, Credentials, Results, StoredCredential};
use serde_json::json;
use yare::parameterized;

fn command(connection: Option<ConnectionType>, module: &str) -> CommandDef {
    IntegrationDef {
        name: "Linux".to_string(),
        connection,
        modules: vec![module.to_string()],
        ignored_args: vec!["free_form".to_string()],
        ..Default::default()
    }
    .commands()
    .remove(0)
}

fn args(pairs: Value) -> CommandArgs {
    match pairs {
        Value::Object(map) => map.into_iter().collect(),
        other => panic!("expected object, got {}", other),
    }
}

fn ssh_params() -> Parameters {
    Parameters {
        port: Some(22),
        creds: Credentials {
            identifier: Some("admin".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

// =============================================================================
// Invocation preparation
// =============================================================================

#[test]
fn prepares_host_based_invocation() {
    let cmd = command(Some(ConnectionType::Ssh), "service");
    let call = args(json!({
        "host": "web1, web2:2222",
        "name": "nginx",
        "concurrency": 2,
        "free_form": "dropped"
    }));

    let invocation = Invocation::prepare(&cmd, &call, &ssh_params()).unwrap();

    assert_eq!(invocation.command_name, "linux_service");
    assert_eq!(invocation.module_name, "service");
    assert_eq!(invocation.concurrency.get(), 2);
    assert!(invocation.host_based);
    assert_eq!(invocation.outputs_prefix, "linux.service");

    let addresses: Vec<_> = invocation.inventory.addresses().collect();
    assert_eq!(addresses, vec!["web1", "web2"]);
    assert_eq!(invocation.inventory.get("web1").unwrap().target.port, Some(22));
    assert_eq!(invocation.inventory.get("web2").unwrap().target.port, Some(2222));

    assert_eq!(invocation.arguments.to_kv_string(), "name=\"nginx\" ");
}

#[test]
fn list_host_argument_is_accepted() {
    let cmd = command(Some(ConnectionType::Ssh), "ping");
    let call = args(json!({ "host": ["web1", "web2"] }));

    let invocation = Invocation::prepare(&cmd, &call, &Parameters::default()).unwrap();
    assert_eq!(invocation.inventory.len(), 2);
    assert_eq!(invocation.concurrency.get(), 1);
}

#[parameterized(
    missing = { json!({}) },
    null = { json!({ "host": null }) },
    blank = { json!({ "host": " , " }) },
)]
fn host_based_without_hosts_is_missing_hosts(call: Value) {
    let cmd = command(Some(ConnectionType::WinRm), "win_ping");
    let err = Invocation::prepare(&cmd, &args(call), &Parameters::default()).unwrap_err();
    assert_eq!(err, ConfigError::MissingHosts);
}

#[test]
fn non_string_host_is_invalid() {
    let cmd = command(Some(ConnectionType::Ssh), "ping");
    let err = Invocation::prepare(&cmd, &args(json!({ "host": 42 })), &Parameters::default())
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidHost(_)));
}

#[test]
fn invalid_concurrency_fails_preparation() {
    let cmd = command(Some(ConnectionType::Ssh), "ping");
    let call = args(json!({ "host": "web1", "concurrency": "lots" }));
    let err = Invocation::prepare(&cmd, &call, &Parameters::default()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidConcurrency(_)));
}

#[test]
fn local_invocation_targets_localhost_and_appends_params() {
    let cmd = command(None, "dig");
    let mut params = Parameters::default();
    params.module_args.insert("server".to_string(), json!("1.1.1.1"));

    let invocation =
        Invocation::prepare(&cmd, &args(json!({ "qtype": "A" })), &params).unwrap();

    assert!(!invocation.host_based);
    let addresses: Vec<_> = invocation.inventory.addresses().collect();
    assert_eq!(addresses, vec!["localhost"]);
    assert_eq!(
        invocation.arguments.to_kv_string(),
        "qtype=\"A\" server=\"1.1.1.1\" "
    );
}

#[test]
fn local_invocation_ignores_host_argument() {
    let cmd = command(None, "dig");
    let invocation = Invocation::prepare(
        &cmd,
        &args(json!({ "host": "web1" })),
        &Parameters::default(),
    )
    .unwrap();
    assert_eq!(invocation.inventory.len(), 1);
    assert!(invocation.arguments.is_empty());
}

// =============================================================================
// Execution
// =============================================================================

#[tokio::test]
async fn passes_invocation_to_engine() {
    let engine = FakeEngine::new();
    engine.push_ok("web1", json!({ "ping": "pong" }));
    let executor = Executor::new(engine.clone());

    let cmd = command(Some(ConnectionType::Ssh), "ping");
    let mut params = ssh_params();
    params.creds.credentials = Some(StoredCredential {
        user: Some("deploy".to_string()),
        password: None,
        sshkey: Some("KEY".to_string()),
    });
    let invocation =
        Invocation::prepare(&cmd, &args(json!({ "host": "web1", "concurrency": 3 })), &params)
            .unwrap();
    executor.execute(invocation).await.unwrap();

    let requests = engine.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].module, "ping");
    assert_eq!(requests[0].forks.get(), 3);
    assert_eq!(requests[0].inventory.ssh_key(), Some("KEY"));
}

#[tokio::test]
async fn two_hosts_yield_two_results() {
    let engine = FakeEngine::new();
    engine.push_ok("hostB", json!({ "ping": "pong" }));
    engine.push_ok("hostA", json!({ "ping": "pong" }));
    let executor = Executor::new(engine);

    let cmd = command(Some(ConnectionType::Ssh), "ping");
    let invocation = Invocation::prepare(
        &cmd,
        &args(json!({ "host": "hostA,hostB" })),
        &Parameters::default(),
    )
    .unwrap();
    let output = executor.execute(invocation).await.unwrap();

    let hosts: Vec<_> = output.results.as_slice().iter().map(|r| r.host.as_str()).collect();
    assert_eq!(hosts, vec!["hostB", "hostA"]);
    assert_eq!(
        output.readable,
        "# hostB - SUCCESS\n* ping: pong\n# hostA - SUCCESS\n* ping: pong\n"
    );
}

#[tokio::test]
async fn unreachable_host_fails_invocation() {
    let engine = FakeEngine::new();
    engine.push_ok("hostB", json!({}));
    engine.push_unreachable("hostA", json!({ "msg": "timeout" }));
    let executor = Executor::new(engine);

    let cmd = command(Some(ConnectionType::Ssh), "ping");
    let invocation = Invocation::prepare(
        &cmd,
        &args(json!({ "host": "hostA,hostB" })),
        &Parameters::default(),
    )
    .unwrap();
    let err = executor.execute(invocation).await.unwrap_err();

    match err {
        ExecuteError::TargetUnreachable { host, detail } => {
            assert_eq!(host, "hostA");
            assert!(detail.contains("timeout"));
        }
        other => panic!("expected unreachable, got {:?}", other),
    }
}

#[tokio::test]
async fn local_command_returns_single_result() {
    let engine = FakeEngine::new();
    engine.push_ok("localhost", json!({ "dig": { "answer": "1.2.3.4" } }));
    let executor = Executor::new(engine);

    let invocation =
        Invocation::prepare(&command(None, "dig"), &CommandArgs::new(), &Parameters::default())
            .unwrap();
    let output = executor.execute(invocation).await.unwrap();

    assert!(matches!(output.results, Results::Single(ref r) if r.fields["answer"] == "1.2.3.4"));
    assert_eq!(output.readable, "# SUCCESS\n* answer: 1.2.3.4\n");
}

#[tokio::test]
async fn engine_failure_is_engine_error() {
    let engine = FakeEngine::new();
    engine.fail_spawn("ansible: not found");
    let executor = Executor::new(engine);

    let invocation =
        Invocation::prepare(&command(None, "dig"), &CommandArgs::new(), &Parameters::default())
            .unwrap();
    let err = executor.execute(invocation).await.unwrap_err();
    assert!(matches!(err, ExecuteError::Engine(_)));
}

#[tokio::test]
async fn stream_error_is_engine_error() {
    let engine = FakeEngine::new();
    engine.fail_stream("broken pipe");
    let executor = Executor::new(engine);

    let invocation =
        Invocation::prepare(&command(None, "dig"), &CommandArgs::new(), &Parameters::default())
            .unwrap();
    assert!(matches!(
        executor.execute(invocation).await,
        Err(ExecuteError::Engine(_))
    ));
}
