//! Execute a single statement against the warehouse.

use tracing::{info_span, Instrument};

use query_engine_sql::sql::string::Statement;

use crate::error::Error;
use crate::metrics::Metrics;
use crate::result::QueryResult;
use crate::warehouse::Warehouse;

/// Open a session, run one statement, and close the session again.
///
/// The session is closed whether or not the statement succeeded. A failure to close is logged
/// and does not replace the statement's own outcome.
pub async fn run_statement(
    warehouse: &dyn Warehouse,
    metrics: &Metrics,
    statement: &Statement,
) -> Result<QueryResult, Error> {
    let timer = metrics.query_duration_seconds.start_timer();
    let result = execute_in_new_session(warehouse, metrics, statement).await;
    timer.observe_duration();

    match &result {
        Ok(rows) => {
            metrics.query_total.inc();
            tracing::debug!(rows = rows.rows.len(), "statement completed");
        }
        Err(_) => metrics.query_error_total.inc(),
    }

    result
}

async fn execute_in_new_session(
    warehouse: &dyn Warehouse,
    metrics: &Metrics,
    statement: &Statement,
) -> Result<QueryResult, Error> {
    let mut session = warehouse
        .connect()
        .instrument(info_span!("Connect to warehouse"))
        .await?;
    metrics.session_total.inc();

    let result = session
        .execute(statement)
        .instrument(info_span!("Execute statement", sql = %statement))
        .await;

    if let Err(err) = session
        .close()
        .instrument(info_span!("Close session"))
        .await
    {
        tracing::warn!(body = %err, "unable to close warehouse session");
    }

    result
}
