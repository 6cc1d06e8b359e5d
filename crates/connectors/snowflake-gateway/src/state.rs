//! State shared by every request handler.
//!
//! This is initialized on startup and never mutated afterwards.

use std::sync::Arc;

use thiserror::Error;

use query_engine_execution::metrics::Metrics;
use query_engine_execution::snowflake::Snowflake;
use query_engine_execution::Warehouse;
use snowflake_gateway_configuration::Configuration;

/// State for our gateway.
#[derive(Clone)]
pub struct ServerState {
    pub warehouse: Arc<dyn Warehouse>,
    pub metrics: Metrics,
    pub metrics_registry: prometheus::Registry,
}

impl ServerState {
    /// Wrap a warehouse and register the gateway's metrics in a fresh registry.
    pub fn new(warehouse: Arc<dyn Warehouse>) -> Result<Self, InitializationError> {
        let mut metrics_registry = prometheus::Registry::new();
        let metrics =
            Metrics::initialize(&mut metrics_registry).map_err(InitializationError::MetricsError)?;
        Ok(ServerState {
            warehouse,
            metrics,
            metrics_registry,
        })
    }
}

/// Create the Snowflake client from the runtime configuration and wrap it inside a server state.
pub fn create_state(configuration: &Configuration) -> Result<ServerState, InitializationError> {
    let snowflake = Snowflake::new(configuration.connection.clone())
        .map_err(InitializationError::WarehouseClient)?;
    ServerState::new(Arc::new(snowflake))
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to create the warehouse client: {0}")]
    WarehouseClient(query_engine_execution::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
