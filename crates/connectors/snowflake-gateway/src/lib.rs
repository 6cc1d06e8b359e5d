//! An HTTP gateway that runs SQL statements against a Snowflake warehouse.
//!
//! Every request opens its own warehouse session, runs a single statement, and closes the
//! session before responding.

pub mod error;
pub mod routes;
pub mod state;
