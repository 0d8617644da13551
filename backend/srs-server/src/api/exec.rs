use crate::api::Result as ApiResult;
use crate::app_state::AppState;

use srs_core::{Command, OK_REPLY};

use axum::{Json, extract::State};
use log::{debug, info};

/// POST /exec - validate and run a command
///
/// The body must be declared `application/json`; axum answers 415 otherwise,
/// 400 for malformed JSON and 422 when the shape does not match [`Command`].
pub async fn exec(
    State(state): State<AppState>,
    Json(command): Json<Command>,
) -> ApiResult<&'static str> {
    info!(
        "exec: {} ({} arguments)",
        command.name,
        command.arguments.len()
    );
    for (i, argument) in command.arguments.iter().enumerate() {
        debug!("  [{i}]={argument}");
    }

    state.exec.check(&command)?;

    Ok(OK_REPLY)
}
