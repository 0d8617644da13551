use crate::{
    ChildState, PortAllocator, ProcessSpec, ReadinessPolicy, SupervisorError,
    await_child_reachable, spawn,
};

use std::time::Duration;

fn sh(script: &str) -> ProcessSpec {
    ProcessSpec::new("sh")
        .arg("-c")
        .arg(script)
        .inherit_output(false, false)
}

#[test]
fn given_builder_when_adding_args_then_kept_in_order() {
    let spec = ProcessSpec::new("srs-server").arg("9999").args(["--x", "--y"]);

    assert_eq!(spec.program().to_str(), Some("srs-server"));
    let args: Vec<_> = spec
        .arguments()
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(args, vec!["9999", "--x", "--y"]);
}

#[tokio::test]
async fn given_exiting_child_when_waiting_then_status_and_terminated() {
    let mut child = spawn(&sh("exit 3")).unwrap();
    assert_eq!(child.state(), ChildState::Spawned);

    let status = child
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(status.code(), Some(3));
    assert_eq!(child.state(), ChildState::Terminated);
}

#[tokio::test]
async fn given_env_in_spec_when_spawned_then_child_sees_it() {
    let spec = sh("test \"$SRS_PROBE\" = yes").env("SRS_PROBE", "yes");
    let mut child = spawn(&spec).unwrap();

    let status = child
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();

    assert!(status.success());
}

#[tokio::test]
async fn given_hung_child_when_waiting_then_exit_timeout_and_terminate_stops_it() {
    let mut child = spawn(&sh("sleep 30")).unwrap();

    let result = child.wait_with_timeout(Duration::from_millis(50)).await;
    assert!(matches!(
        result,
        Err(SupervisorError::ExitTimeout { timeout_ms: 50, .. })
    ));
    assert_ne!(child.state(), ChildState::Terminated);

    let status = child.terminate(Duration::from_secs(2)).await.unwrap();

    assert!(!status.success());
    assert_eq!(child.state(), ChildState::Terminated);
}

#[tokio::test]
async fn given_missing_binary_when_spawning_then_spawn_error() {
    let result = spawn(&ProcessSpec::new("/nonexistent/srs-server"));

    assert!(matches!(result, Err(SupervisorError::Spawn { .. })));
}

#[tokio::test]
async fn given_child_dies_while_polling_then_exited_early() {
    let port = PortAllocator::find_free().unwrap();
    let mut child = spawn(&sh("exit 1")).unwrap();
    let policy = ReadinessPolicy {
        startup_timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(10),
    };

    let result = await_child_reachable(&mut child, "127.0.0.1", port, &policy).await;

    match result {
        Err(error @ SupervisorError::ExitedEarly { .. }) => {
            assert_eq!(error.exit_code(), Some(1));
        }
        other => panic!("expected ExitedEarly, got {other:?}"),
    }
}

#[tokio::test]
async fn given_detached_input_when_child_reads_stdin_then_sees_eof() {
    let spec = sh("read line").inherit_input(false);
    let mut child = spawn(&spec).unwrap();

    let status = child
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();

    // `read` fails at end of input
    assert!(!status.success());
}
