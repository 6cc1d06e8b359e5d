//! Warehouse connection settings.

use crate::values::Secret;

pub const DEFAULT_USER_VARIABLE: &str = "SNOWFLAKE_USER";
pub const DEFAULT_PASSWORD_VARIABLE: &str = "SNOWFLAKE_PASSWORD";
pub const DEFAULT_ACCOUNT_VARIABLE: &str = "SNOWFLAKE_ACCOUNT";
pub const DEFAULT_WAREHOUSE_VARIABLE: &str = "SNOWFLAKE_WAREHOUSE";
pub const DEFAULT_DATABASE_VARIABLE: &str = "SNOWFLAKE_DATABASE";
pub const DEFAULT_SCHEMA_VARIABLE: &str = "SNOWFLAKE_SCHEMA";

/// Where each of the six connection fields comes from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DatabaseConnectionSettings {
    /// Login name of the principal.
    pub user: Secret,
    /// Password of the principal.
    pub password: Secret,
    /// Account identifier, e.g. `xy12345.eu-west-1`.
    pub account: Secret,
    /// Virtual warehouse that runs the statements.
    pub warehouse: Secret,
    /// Default database (catalog) of the session.
    pub database: Secret,
    /// Default schema (namespace) of the session.
    pub schema: Secret,
}

impl DatabaseConnectionSettings {
    /// Settings that read every field from its conventional `SNOWFLAKE_*` variable.
    pub fn from_default_variables() -> Self {
        Self {
            user: Secret::FromEnvironment {
                variable: DEFAULT_USER_VARIABLE.into(),
            },
            password: Secret::FromEnvironment {
                variable: DEFAULT_PASSWORD_VARIABLE.into(),
            },
            account: Secret::FromEnvironment {
                variable: DEFAULT_ACCOUNT_VARIABLE.into(),
            },
            warehouse: Secret::FromEnvironment {
                variable: DEFAULT_WAREHOUSE_VARIABLE.into(),
            },
            database: Secret::FromEnvironment {
                variable: DEFAULT_DATABASE_VARIABLE.into(),
            },
            schema: Secret::FromEnvironment {
                variable: DEFAULT_SCHEMA_VARIABLE.into(),
            },
        }
    }
}
