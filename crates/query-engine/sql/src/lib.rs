//! SQL statements issued by the gateway.

pub mod sql;
