//! Build routers around a recording warehouse.

use std::sync::Arc;

use snowflake_gateway::{routes, state::ServerState};

use crate::warehouse::RecordingWarehouse;

/// Creates a router with a fresh state backed by the given warehouse.
pub fn create_router(warehouse: &RecordingWarehouse) -> axum::Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let state = ServerState::new(Arc::new(warehouse.clone())).unwrap();
    routes::create_router(state)
}
