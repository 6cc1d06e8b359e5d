use axum::{extract::State, Json};
use serde_derive::Serialize;
use serde_json::Value;

use query_engine_execution::query::run_statement;
use query_engine_sql::sql::statements;

use crate::{error::ServerError, state::ServerState};

#[derive(Serialize)]
pub struct VersionResponse {
    version: Value,
}

/// Retrieve the current version of the Snowflake instance, e.g. `{"version": "8.5.1"}`.
///
/// Failures report the full error chain and a backtrace, unlike the other routes.
pub async fn get_snowflake_version(
    State(state): State<ServerState>,
) -> Result<Json<VersionResponse>, ServerError> {
    let result = run_statement(
        state.warehouse.as_ref(),
        &state.metrics,
        &statements::current_version(),
    )
    .await
    .map_err(ServerError::with_traceback)?;

    match result.first_row().and_then(<[Value]>::first) {
        Some(version) => Ok(Json(VersionResponse {
            version: version.clone(),
        })),
        None => Err(ServerError::NotFound("Version not found".to_string())),
    }
}
