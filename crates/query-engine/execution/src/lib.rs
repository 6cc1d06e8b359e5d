//! Query execution against a Snowflake warehouse.
//!
//! [`warehouse`] defines the seam between the gateway and the data source, [`snowflake`]
//! implements it over the warehouse's HTTP session protocol, and [`query`] runs one statement
//! inside a freshly opened session.

pub mod error;
pub mod metrics;
pub mod query;
pub mod result;
pub mod snowflake;
mod temporal;
pub mod warehouse;

pub use error::Error;
pub use result::{Column, QueryResult};
pub use warehouse::{Session, Warehouse};
