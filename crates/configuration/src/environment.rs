//! Access to the environment the gateway runs in.
//!
//! The process environment is abstracted behind [`Environment`] so tests can supply variables
//! from a `HashMap` instead of mutating the real environment.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// The name of an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(String);

impl Variable {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Variable {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Variable(name) = self;
        write!(f, "{name}")
    }
}

/// A source of environment variables.
pub trait Environment {
    fn read(&self, variable: &Variable) -> Result<String, Error>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        match std::env::var(variable.as_str()) {
            Ok(value) => Ok(value),
            Err(std::env::VarError::NotPresent) => {
                Err(Error::MissingEnvironmentVariable(variable.clone()))
            }
            Err(std::env::VarError::NotUnicode(_)) => {
                Err(Error::InvalidEnvironmentVariable(variable.clone()))
            }
        }
    }
}

impl Environment for HashMap<Variable, String> {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        self.get(variable)
            .cloned()
            .ok_or_else(|| Error::MissingEnvironmentVariable(variable.clone()))
    }
}

impl<Env: Environment> Environment for &Env {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        (*self).read(variable)
    }
}

/// Load variables from a `.env` file into the process environment.
///
/// Variables that are already set are left untouched. Without an explicit path, a missing
/// `.env` file in the working directory (or its parents) is not an error.
pub fn load_dotenv(path: Option<&Path>) -> Result<Option<PathBuf>, Error> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|()| Some(path.to_path_buf()))
            .map_err(|source| Error::DotEnv {
                path: path.to_path_buf(),
                source,
            }),
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::DotEnv {
                path: PathBuf::from(".env"),
                source,
            }),
        },
    }
}
