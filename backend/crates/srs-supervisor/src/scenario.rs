//! Scripted traffic against a launched service.

use crate::client::ExecOutcome;
use crate::error::{Result as SupervisorResult, SupervisorError};
use crate::supervisor::Supervisor;

use srs_core::{Command, Status};

use std::time::{Duration, Instant};

use tracing::info;

const ACCEPTED_NAME: &str = "test-name";
const ACCEPTED_ARGUMENTS: [&str; 2] = ["a", "b"];
const REJECTED_NAME: &str = "bad";
const EXPECTED_STATUS_ID: &str = "test-id";

/// What the smoke run observed
#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub accepted: Command,
    pub rejected: Command,
    pub rejection_status: u16,
    pub rejection_body: String,
    pub status: Status,
    pub elapsed: Duration,
}

impl SmokeReport {
    pub fn log_summary(&self) {
        info!("Smoke run passed in {:?}", self.elapsed);
        info!("  exec {:?} -> ok", self.accepted.name);
        info!(
            "  exec {:?} -> {} {:?}",
            self.rejected.name, self.rejection_status, self.rejection_body
        );
        info!(
            "  query -> id={} description={}",
            self.status.id, self.status.description
        );
    }
}

/// Run the exec/query checks against a ready service.
///
/// 1. `exec` with the expected name and two arguments must be accepted
/// 2. `exec` with another name must be rejected with a 5xx whose body quotes that name
/// 3. `query` must report the canonical status id
pub async fn run_smoke(supervisor: &Supervisor) -> SupervisorResult<SmokeReport> {
    let started = Instant::now();
    let client = supervisor.client();

    let accepted = Command::new(ACCEPTED_NAME).with_arguments(ACCEPTED_ARGUMENTS);
    match client.exec(&accepted).await? {
        ExecOutcome::Accepted => {}
        ExecOutcome::Rejected { status, body } => {
            return Err(SupervisorError::scenario(
                "exec-accepted",
                format!("HTTP {status}: {body}"),
            ));
        }
    }

    let rejected = Command::new(REJECTED_NAME);
    let (rejection_status, rejection_body) = match client.exec(&rejected).await? {
        ExecOutcome::Rejected { status, body } => (status, body),
        ExecOutcome::Accepted => {
            return Err(SupervisorError::scenario(
                "exec-rejected",
                format!("{REJECTED_NAME:?} was accepted"),
            ));
        }
    };
    if !(500..600).contains(&rejection_status) {
        return Err(SupervisorError::scenario(
            "exec-rejected",
            format!("expected a 5xx status, got {rejection_status}"),
        ));
    }
    if !rejection_body.contains(&format!("\"{REJECTED_NAME}\"")) {
        return Err(SupervisorError::scenario(
            "exec-rejected",
            format!("body does not quote {REJECTED_NAME:?}: {rejection_body}"),
        ));
    }

    let status = client.query().await?;
    if status.id != EXPECTED_STATUS_ID {
        return Err(SupervisorError::scenario(
            "query",
            format!("expected id {EXPECTED_STATUS_ID:?}, got {:?}", status.id),
        ));
    }

    Ok(SmokeReport {
        accepted,
        rejected,
        rejection_status,
        rejection_body,
        status,
        elapsed: started.elapsed(),
    })
}
