//! The seam between the gateway and the data source.

use async_trait::async_trait;

use query_engine_sql::sql::string::Statement;

use crate::error::Error;
use crate::result::QueryResult;

/// Something that can open warehouse sessions.
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Open a brand-new session. Sessions are never reused.
    async fn connect(&self) -> Result<Box<dyn Session>, Error>;
}

/// A logged-in session, owned by a single request.
#[async_trait]
pub trait Session: Send {
    /// Run a statement and collect its full result set.
    async fn execute(&mut self, statement: &Statement) -> Result<QueryResult, Error>;

    /// Release the session on the warehouse side. Closing twice is a no-op.
    async fn close(&mut self) -> Result<(), Error>;
}
