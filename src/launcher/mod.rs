//! Process handoff to the resolved executable.
//!
//! Unix replaces the current process image, so on success nothing after the
//! handoff runs. Platforms without `exec` spawn the executable with inherited
//! stdio, wait for it, and forward its exit code.
mod exit;

use std::{
    convert::Infallible,
    ffi::OsString,
    path::Path,
    process::{self, Command, ExitStatus},
};

use crate::lib::{errors::LaunchError, telemetry};

pub use exit::LaunchExit;

/// How control is transferred to the resolved executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// Replace the current process image (`exec`).
    Replace,
    /// Spawn a child, wait for it, and forward its exit code.
    SpawnAndWait,
}

impl Handoff {
    /// Variant supported by the platform this binary was built for.
    pub fn for_host() -> Self {
        if cfg!(unix) {
            Handoff::Replace
        } else {
            Handoff::SpawnAndWait
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handoff::Replace => "replace",
            Handoff::SpawnAndWait => "spawn_and_wait",
        }
    }

    /// Run `path` with `args`. `Replace` returns only on failure.
    pub fn handoff(self, path: &Path, args: &[OsString]) -> Result<ChildExit, LaunchError> {
        telemetry::emit_handoff(self.as_str(), path, args);
        match self {
            Handoff::Replace => match replace_process(path, args)? {},
            Handoff::SpawnAndWait => spawn_and_wait(path, args),
        }
    }
}

/// Exit code forwarded from the child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit(i32);

impl ChildExit {
    pub fn code(&self) -> i32 {
        self.0
    }

    /// Terminate this process with the child's exit code.
    pub fn terminate(self) -> ! {
        process::exit(self.0)
    }

    fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self(128 + signal);
            }
        }
        Self(1)
    }
}

#[cfg(unix)]
fn replace_process(path: &Path, args: &[OsString]) -> Result<Infallible, LaunchError> {
    use std::os::unix::process::CommandExt;

    let source = Command::new(path).args(args).exec();
    Err(LaunchError::Replace {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(not(unix))]
fn replace_process(path: &Path, _args: &[OsString]) -> Result<Infallible, LaunchError> {
    Err(LaunchError::ReplaceUnsupported {
        path: path.to_path_buf(),
    })
}

fn spawn_and_wait(path: &Path, args: &[OsString]) -> Result<ChildExit, LaunchError> {
    let mut child = Command::new(path)
        .args(args)
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            path: path.to_path_buf(),
            source,
        })?;
    let status = child.wait().map_err(|source| LaunchError::Wait {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ChildExit::from_status(status))
}
