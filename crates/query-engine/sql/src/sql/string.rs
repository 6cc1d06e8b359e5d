//! Type definitions of a low-level SQL string representation.

use std::fmt;

/// A single SQL statement, sent to the warehouse exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
}

impl Statement {
    /// Wrap SQL text without inspecting or rewriting it.
    pub fn raw(sql: impl Into<String>) -> Self {
        Statement { sql: sql.into() }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
