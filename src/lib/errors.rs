use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors raised while querying or validating the host installation configuration.
#[derive(Debug, Error)]
pub enum HostConfigError {
    /// None of the candidate interpreters could be started.
    #[error("No Python interpreter found on PATH (tried: {tried})")]
    InterpreterUnavailable { tried: String },
    /// The interpreter started but could not be run to completion.
    #[error("Failed to run interpreter `{interpreter}`: {source}")]
    InterpreterSpawn {
        interpreter: String,
        #[source]
        source: io::Error,
    },
    /// The configuration query exited unsuccessfully.
    #[error("Interpreter `{interpreter}` failed to report its configuration (exit={exit_code:?}): {stderr}")]
    QueryFailed {
        interpreter: String,
        exit_code: Option<i32>,
        stderr: String,
    },
    /// The reported snapshot could not be read as a configuration document.
    #[error("Failed to parse host configuration: {source}")]
    Parse {
        #[source]
        source: ConfigLoaderError,
    },
    /// A required snapshot field is missing.
    #[error("Host configuration is missing `{field}`")]
    MissingField { field: &'static str },
    /// A snapshot field failed validation.
    #[error("Host configuration has invalid `{field}`: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    /// The host does not define the requested installation scheme.
    #[error("Installation scheme `{scheme}` is not defined by the host")]
    UnknownScheme { scheme: String },
}

impl HostConfigError {
    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(source: ConfigLoaderError) -> Self {
        Self::Parse { source }
    }
}

/// Failures of the executable resolution step.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No candidate location holds the executable.
    #[error("Executable not found: {primary}")]
    NotFound { primary: PathBuf },
    /// A candidate directory could not be derived from the host configuration.
    #[error(transparent)]
    Host(#[from] HostConfigError),
}

/// Failures while handing control to the resolved executable.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to replace the current process with {path}: {source}")]
    Replace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to spawn {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to wait for {path}: {source}")]
    Wait {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Process replacement is not supported on this platform ({path})")]
    ReplaceUnsupported { path: PathBuf },
}
