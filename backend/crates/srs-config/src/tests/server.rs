use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Server
// =========================================================================

#[test]
#[serial]
fn given_port_zero_when_validate_then_ok() {
    // Given - port 0 means OS auto-assign
    let _temp = setup_config_dir();
    let _port = EnvGuard::set("SRS_SERVER_PORT", "0");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_hostname_instead_of_ip_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _host = EnvGuard::set("SRS_SERVER_HOST", "localhost");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("server.host"));
}

#[test]
#[serial]
fn given_ipv6_host_when_validate_then_ok() {
    // Given
    let _temp = setup_config_dir();
    let _host = EnvGuard::set("SRS_SERVER_HOST", "::1");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_too_many_worker_threads_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _workers = EnvGuard::set("SRS_SERVER_WORKER_THREADS", "100000");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_no_overrides_when_load_then_shutdown_grace_is_one_second() {
    // Given
    let _temp = setup_config_dir();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.server.shutdown_grace_ms, 1_000);
    assert_eq!(config.server.shutdown_grace(), std::time::Duration::from_secs(1));
}

#[test]
#[serial]
fn given_shutdown_grace_env_when_load_then_overridden() {
    // Given
    let _temp = setup_config_dir();
    let _grace = EnvGuard::set("SRS_SERVER_SHUTDOWN_GRACE_MS", "0");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.server.shutdown_grace_ms, 0);
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_excessive_shutdown_grace_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _grace = EnvGuard::set("SRS_SERVER_SHUTDOWN_GRACE_MS", "600000");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("server.shutdown_grace_ms"));
}
