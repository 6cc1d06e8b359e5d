//! Configuration for the Snowflake query gateway.
//!
//! Connection settings are described as secrets which either hold a value directly or name an
//! environment variable. They are resolved once, at start-up, into the runtime
//! [`Configuration`] which is then handed to whatever opens warehouse sessions.

pub mod configuration;
pub mod connection_settings;
pub mod environment;
pub mod error;
pub mod values;

pub use configuration::{make_runtime_configuration, Configuration, ConnectionParameters};
pub use connection_settings::DatabaseConnectionSettings;
pub use environment::{load_dotenv, Environment, ProcessEnvironment, Variable};
pub use error::Error;
