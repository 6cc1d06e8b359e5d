//! Errors that can occur while loading or resolving configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::environment::Variable;

#[derive(Debug, Error)]
pub enum Error {
    #[error("environment variable {0} is not set")]
    MissingEnvironmentVariable(Variable),
    #[error("environment variable {0} is not valid unicode")]
    InvalidEnvironmentVariable(Variable),
    #[error("unable to load environment file {}: {source}", path.display())]
    DotEnv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}
