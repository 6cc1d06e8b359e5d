mod get_menu_items;
mod get_metrics;
mod get_query;
mod get_snowflake_version;
mod get_test;

use axum::{routing::get, Router};

use crate::state::ServerState;

pub use get_menu_items::get_menu_items;
pub use get_metrics::get_metrics;
pub use get_query::get_query;
pub use get_snowflake_version::get_snowflake_version;
pub use get_test::get_test;

pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/snowflake-version", get(get_snowflake_version))
        .route("/query", get(get_query))
        .route("/test", get(get_test))
        .route("/menu-items", get(get_menu_items))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}
