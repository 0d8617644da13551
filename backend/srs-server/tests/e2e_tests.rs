//! End-to-end tests: the real srs-server binary, driven through the supervisor

use srs_config::SupervisorConfig;
use srs_core::Command;
use srs_supervisor::{
    ChildState, ExecOutcome, PortAllocator, ProcessSpec, Supervisor, SupervisorError, run_smoke,
};

use std::net::TcpListener;
use std::path::Path;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

const SHUTDOWN_BOUND: Duration = Duration::from_secs(15);

fn server_bin() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_srs-server"))
}

async fn launch() -> Supervisor {
    Supervisor::launch(server_bin(), &SupervisorConfig::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_launch_on_free_port_answers_ping() {
    let supervisor = launch().await;

    assert_ne!(supervisor.port(), 0);
    assert_eq!(supervisor.child_state(), ChildState::UnderTest);
    assert_eq!(supervisor.client().ping().await.unwrap(), "hello");

    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_exec_with_expected_name_is_accepted() {
    let supervisor = launch().await;

    let outcome = supervisor
        .client()
        .exec(&Command::new("test-name").with_arguments(["a", "b"]))
        .await
        .unwrap();

    assert_eq!(outcome, ExecOutcome::Accepted);
    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_exec_with_other_name_is_rejected_with_517() {
    let supervisor = launch().await;

    let outcome = supervisor
        .client()
        .exec(&Command::new("bad"))
        .await
        .unwrap();

    match outcome {
        ExecOutcome::Rejected { status, body } => {
            assert_eq!(status, 517);
            assert!(body.contains("\"bad\""), "body: {body}");
        }
        ExecOutcome::Accepted => panic!("\"bad\" must be rejected"),
    }

    // Still serving after a rejection
    assert_eq!(supervisor.client().ping().await.unwrap(), "hello");
    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_exec_without_json_content_type_is_415() {
    let supervisor = launch().await;

    let reply = supervisor
        .client()
        .exec_raw(r#"{"name":"test-name"}"#, None)
        .await
        .unwrap();

    assert_eq!(reply.status, 415);
    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_query_returns_canonical_status() {
    let supervisor = launch().await;

    let first = supervisor.client().query().await.unwrap();
    let second = supervisor.client().query().await.unwrap();

    assert_eq!(first.id, "test-id");
    assert_eq!(first, second);
    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_exit_stops_process_within_bound() {
    let supervisor = launch().await;

    let status = timeout(SHUTDOWN_BOUND, supervisor.shutdown())
        .await
        .expect("service did not exit in time")
        .unwrap();

    assert!(status.success());
}

#[tokio::test]
async fn test_smoke_scenario_passes() {
    let supervisor = launch().await;

    let report = run_smoke(&supervisor).await.unwrap();

    assert_eq!(report.rejection_status, 517);
    assert_eq!(report.status.id, "test-id");
    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_configured_failure_status_is_used() {
    let port = PortAllocator::find_free().unwrap();
    let spec = ProcessSpec::new(server_bin())
        .arg(port.to_string())
        .env("SRS_LOG_COLORED", "false")
        .env("SRS_EXEC_FAILURE_STATUS", "599");
    let supervisor = Supervisor::launch_with(&spec, port, &SupervisorConfig::default())
        .await
        .unwrap();

    let outcome = supervisor
        .client()
        .exec(&Command::new("bad"))
        .await
        .unwrap();

    assert!(matches!(outcome, ExecOutcome::Rejected { status: 599, .. }));
    supervisor.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_config_exits_before_listening() {
    let port = PortAllocator::find_free().unwrap();
    let spec = ProcessSpec::new(server_bin())
        .arg(port.to_string())
        .env("SRS_EXEC_FAILURE_STATUS", "200")
        .inherit_output(false, false);

    let result = Supervisor::launch_with(&spec, port, &SupervisorConfig::default()).await;

    match result {
        Err(error @ SupervisorError::ExitedEarly { .. }) => {
            assert_eq!(error.exit_code(), Some(1));
        }
        other => panic!("expected ExitedEarly, got {other:?}"),
    }
}

#[tokio::test]
async fn test_stalled_client_does_not_block_exit() {
    let supervisor = launch().await;

    // Request headers without the terminating blank line
    let mut stalled = TcpStream::connect((supervisor.host(), supervisor.port()))
        .await
        .unwrap();
    stalled
        .write_all(b"GET /ping HTTP/1.1\r\nHost: x\r\n")
        .await
        .unwrap();

    let status = timeout(SHUTDOWN_BOUND, supervisor.shutdown())
        .await
        .expect("service did not exit in time")
        .unwrap();

    assert!(status.success());
    drop(stalled);
}

#[tokio::test]
async fn test_concurrent_exit_calls_all_answer_ok() {
    let supervisor = launch().await;
    let client = supervisor.client().clone();

    // Open three pooled connections so every /exit lands on an accepted one
    let (a, b, c) = tokio::join!(client.ping(), client.ping(), client.ping());
    assert!(a.is_ok() && b.is_ok() && c.is_ok());

    let (first, second, third) = tokio::join!(client.exit(), client.exit(), client.exit());

    assert_eq!(first.unwrap(), "ok");
    assert_eq!(second.unwrap(), "ok");
    assert_eq!(third.unwrap(), "ok");

    let status = timeout(SHUTDOWN_BOUND, supervisor.wait_for_exit())
        .await
        .expect("service did not exit in time")
        .unwrap();
    assert!(status.success());

    // Nothing is listening any more
    assert!(client.ping().await.is_err());
}

#[tokio::test]
async fn test_taken_preferred_port_falls_forward() {
    let holder = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let taken = holder.local_addr().unwrap().port();

    let supervisor =
        Supervisor::launch_preferring(server_bin(), taken, 100, &SupervisorConfig::default())
            .await
            .unwrap();

    assert_ne!(supervisor.port(), taken);
    assert!(supervisor.port() > taken);
    assert_eq!(supervisor.client().ping().await.unwrap(), "hello");

    supervisor.shutdown().await.unwrap();
    drop(holder);
}
