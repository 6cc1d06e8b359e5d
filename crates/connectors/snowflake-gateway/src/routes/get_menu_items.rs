use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

use query_engine_execution::query::run_statement;
use query_engine_sql::sql::statements;

use crate::{error::ServerError, state::ServerState};

#[derive(Deserialize)]
pub struct MenuItemsParams {
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    statements::DEFAULT_MENU_ITEMS_LIMIT
}

#[derive(Serialize)]
pub struct MenuItemsResponse {
    items: Vec<Map<String, Value>>,
}

/// Retrieve menu items from the Tasty Bytes `RAW_POS` schema, one object per row.
pub async fn get_menu_items(
    State(state): State<ServerState>,
    params: Result<Query<MenuItemsParams>, QueryRejection>,
) -> Result<Json<MenuItemsResponse>, ServerError> {
    let Query(MenuItemsParams { limit }) = params?;

    let result = run_statement(
        state.warehouse.as_ref(),
        &state.metrics,
        &statements::menu_items(limit),
    )
    .await?;

    Ok(Json(MenuItemsResponse {
        items: result.into_records(),
    }))
}
