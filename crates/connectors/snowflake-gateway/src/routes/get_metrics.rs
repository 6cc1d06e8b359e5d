use axum::extract::State;

use crate::{error::ServerError, state::ServerState};

/// Render the gateway's metrics in the Prometheus text format.
pub async fn get_metrics(State(state): State<ServerState>) -> Result<String, ServerError> {
    prometheus::TextEncoder::new()
        .encode_to_string(&state.metrics_registry.gather())
        .map_err(|err| ServerError::Internal(err.to_string()))
}
