use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use query_engine_execution::query::run_statement;
use query_engine_sql::sql::{statements, string::Statement};

use crate::{error::ServerError, state::ServerState};

#[derive(Deserialize)]
pub struct QueryParams {
    #[serde(default = "default_sql")]
    sql: String,
}

fn default_sql() -> String {
    statements::DEFAULT_QUERY_SQL.to_string()
}

#[derive(Serialize)]
pub struct QueryResponse {
    data: Vec<Vec<Value>>,
}

/// Run the caller's SQL exactly as given and return every row positionally.
pub async fn get_query(
    State(state): State<ServerState>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<QueryResponse>, ServerError> {
    let Query(QueryParams { sql }) = params?;

    let result = run_statement(
        state.warehouse.as_ref(),
        &state.metrics,
        &Statement::raw(sql),
    )
    .await?;

    Ok(Json(QueryResponse {
        data: result.into_positional_rows(),
    }))
}
