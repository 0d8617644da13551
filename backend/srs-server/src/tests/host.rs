use crate::{AppState, ServiceHost, build_router};

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::{Duration, Instant, timeout};

const GRACE: Duration = Duration::from_secs(1);

async fn start_on_free_port() -> ServiceHost {
    let state = AppState::default();
    let gate = state.gate.clone();
    ServiceHost::start("127.0.0.1:0", build_router(state), gate)
        .await
        .unwrap()
}

#[tokio::test]
async fn given_port_zero_when_started_then_reports_assigned_port() {
    let host = start_on_free_port().await;

    assert_ne!(host.local_addr().port(), 0);
    assert!(
        tokio::net::TcpStream::connect(host.local_addr())
            .await
            .is_ok()
    );

    host.gate().release();
    host.stop(GRACE).await.unwrap();
}

#[tokio::test]
async fn given_port_in_use_when_started_then_bind_error() {
    let first = start_on_free_port().await;
    let taken = first.local_addr().to_string();

    let state = AppState::default();
    let gate = state.gate.clone();
    let result = ServiceHost::start(&taken, build_router(state), gate).await;

    let error = result.err().expect("second bind on the same port must fail");
    assert!(error.is_addr_in_use(), "unexpected error: {error}");

    first.stop(GRACE).await.unwrap();
}

#[tokio::test]
async fn given_running_host_when_gate_held_then_await_shutdown_blocks() {
    let host = start_on_free_port().await;

    let result = timeout(Duration::from_millis(50), host.await_shutdown()).await;
    assert!(result.is_err());

    host.gate().release();
    let result = timeout(Duration::from_millis(500), host.await_shutdown()).await;
    assert!(result.is_ok());

    host.stop(GRACE).await.unwrap();
}

#[tokio::test]
async fn given_stopped_host_when_connecting_then_refused() {
    let host = start_on_free_port().await;
    let addr = host.local_addr();

    host.stop(GRACE).await.unwrap();

    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn given_stalled_client_when_stopping_then_returns_after_grace() {
    let host = start_on_free_port().await;

    // Headers without the terminating blank line keep the connection busy
    let mut stalled = TcpStream::connect(host.local_addr()).await.unwrap();
    stalled
        .write_all(b"GET /ping HTTP/1.1\r\nHost: x\r\n")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    host.gate().release();
    host.await_shutdown().await;

    let started = Instant::now();
    let result = timeout(
        Duration::from_secs(5),
        host.stop(Duration::from_millis(200)),
    )
    .await;

    assert!(result.is_ok(), "stop did not return");
    assert!(result.unwrap().is_ok());
    assert!(started.elapsed() < Duration::from_secs(2));
    drop(stalled);
}

#[tokio::test]
async fn given_idle_host_when_stopping_then_closes_before_grace() {
    let host = start_on_free_port().await;
    host.gate().release();

    let started = Instant::now();
    host.stop(Duration::from_secs(30)).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
}
