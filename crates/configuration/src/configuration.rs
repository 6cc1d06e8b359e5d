//! Runtime configuration of the gateway.

use std::fmt;

use crate::connection_settings::DatabaseConnectionSettings;
use crate::environment::Environment;
use crate::error::Error;
use crate::values::Secret;

/// The 'Configuration' type collects all the information necessary to serve queries at runtime.
///
/// It is produced once, at start-up, from 'DatabaseConnectionSettings' using
/// 'make_runtime_configuration', and shared read-only between requests.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    pub connection: ConnectionParameters,
}

/// Resolved connection fields. Any of them may be absent; whoever opens a session decides
/// which ones it cannot do without.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionParameters {
    pub user: Option<String>,
    pub password: Option<String>,
    pub account: Option<String>,
    pub warehouse: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
}

impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("account", &self.account)
            .field("warehouse", &self.warehouse)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .finish()
    }
}

/// Resolve connection settings against the environment.
///
/// A variable that is not set leaves its field empty rather than failing, so the gateway can
/// still start and answer requests that never reach the warehouse.
pub fn make_runtime_configuration(
    settings: &DatabaseConnectionSettings,
    environment: &impl Environment,
) -> Result<Configuration, Error> {
    let connection = ConnectionParameters {
        user: resolve_optional(&settings.user, environment)?,
        password: resolve_optional(&settings.password, environment)?,
        account: resolve_optional(&settings.account, environment)?,
        warehouse: resolve_optional(&settings.warehouse, environment)?,
        database: resolve_optional(&settings.database, environment)?,
        schema: resolve_optional(&settings.schema, environment)?,
    };
    Ok(Configuration { connection })
}

fn resolve_optional(
    secret: &Secret,
    environment: &impl Environment,
) -> Result<Option<String>, Error> {
    match secret.resolve(environment) {
        Ok(value) => Ok(Some(value)),
        Err(Error::MissingEnvironmentVariable(variable)) => {
            tracing::warn!(%variable, "connection setting is not configured");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use similar_asserts::assert_eq;

    use super::*;
    use crate::connection_settings::{
        DEFAULT_ACCOUNT_VARIABLE, DEFAULT_DATABASE_VARIABLE, DEFAULT_PASSWORD_VARIABLE,
        DEFAULT_SCHEMA_VARIABLE, DEFAULT_USER_VARIABLE, DEFAULT_WAREHOUSE_VARIABLE,
    };
    use crate::environment::Variable;

    #[test]
    fn resolves_every_field_from_the_environment() {
        let environment: HashMap<Variable, String> = HashMap::from([
            (DEFAULT_USER_VARIABLE.into(), "alice".to_string()),
            (DEFAULT_PASSWORD_VARIABLE.into(), "hunter2".to_string()),
            (DEFAULT_ACCOUNT_VARIABLE.into(), "xy12345".to_string()),
            (DEFAULT_WAREHOUSE_VARIABLE.into(), "COMPUTE_WH".to_string()),
            (DEFAULT_DATABASE_VARIABLE.into(), "TASTY_BYTES".to_string()),
            (DEFAULT_SCHEMA_VARIABLE.into(), "RAW_POS".to_string()),
        ]);

        let configuration = make_runtime_configuration(
            &DatabaseConnectionSettings::from_default_variables(),
            &environment,
        )
        .unwrap();

        assert_eq!(
            configuration.connection,
            ConnectionParameters {
                user: Some("alice".into()),
                password: Some("hunter2".into()),
                account: Some("xy12345".into()),
                warehouse: Some("COMPUTE_WH".into()),
                database: Some("TASTY_BYTES".into()),
                schema: Some("RAW_POS".into()),
            }
        );
    }

    #[test]
    fn missing_variables_leave_fields_empty() {
        let environment: HashMap<Variable, String> =
            HashMap::from([(DEFAULT_ACCOUNT_VARIABLE.into(), "xy12345".to_string())]);

        let configuration = make_runtime_configuration(
            &DatabaseConnectionSettings::from_default_variables(),
            &environment,
        )
        .unwrap();

        assert_eq!(configuration.connection.account.as_deref(), Some("xy12345"));
        assert_eq!(configuration.connection.user, None);
        assert_eq!(configuration.connection.schema, None);
    }

    #[test]
    fn plain_secrets_do_not_touch_the_environment() {
        let settings = DatabaseConnectionSettings {
            user: "bob".into(),
            password: "s3cret".into(),
            ..DatabaseConnectionSettings::from_default_variables()
        };

        let environment: HashMap<Variable, String> = HashMap::new();
        let configuration = make_runtime_configuration(&settings, &environment).unwrap();

        assert_eq!(configuration.connection.user.as_deref(), Some("bob"));
        assert_eq!(configuration.connection.password.as_deref(), Some("s3cret"));
        assert!(!format!("{:?}", configuration.connection).contains("s3cret"));
    }
}
