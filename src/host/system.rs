use std::{
    env, io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::{debug, info};

use crate::lib::errors::HostConfigError;

use super::{HostPlatform, HostSnapshot, InstallConfig, InstallScheme};

/// Program run by the host interpreter to report its installation configuration as JSON.
pub const QUERY_PROGRAM: &str = include_str!("query.py");

/// Interpreters tried in order; each is looked up on PATH by the spawn primitive.
#[cfg(windows)]
const INTERPRETERS: &[&str] = &["python", "py"];
#[cfg(not(windows))]
const INTERPRETERS: &[&str] = &["python3", "python"];

/// Exit codes of launchers that exist on PATH without a usable interpreter
/// behind them: 127 from pyenv-style shims, 9009 from the Windows Store alias.
const NOT_INSTALLED_EXIT_CODES: &[i32] = &[127, 9009];

/// Provider backed by the installation configuration of the host interpreter.
#[derive(Debug, Clone)]
pub struct SystemInstallConfig {
    snapshot: HostSnapshot,
    launcher_dir: Option<PathBuf>,
}

impl SystemInstallConfig {
    /// Query the first available host interpreter about `package`.
    pub fn discover(package: &str) -> Result<Self, HostConfigError> {
        Self::discover_with(INTERPRETERS, package)
    }

    /// Like [`SystemInstallConfig::discover`] with an explicit interpreter list.
    pub fn discover_with(interpreters: &[&str], package: &str) -> Result<Self, HostConfigError> {
        let snapshot = query_snapshot(interpreters, package)?;
        let launcher_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Ok(Self::new(snapshot, launcher_dir))
    }

    /// `launcher_dir` stands in for the package root when the host cannot locate the package.
    pub fn new(snapshot: HostSnapshot, launcher_dir: Option<PathBuf>) -> Self {
        Self {
            snapshot,
            launcher_dir,
        }
    }
}

impl InstallConfig for SystemInstallConfig {
    fn scripts_dir(&self, scheme: &InstallScheme) -> Result<PathBuf, HostConfigError> {
        self.snapshot.scripts_dir(scheme)
    }

    fn preferred_user_scheme(&self) -> Option<InstallScheme> {
        self.snapshot.preferred_user_scheme()
    }

    fn executable_suffix(&self) -> &str {
        self.snapshot.executable_suffix()
    }

    fn platform(&self) -> &HostPlatform {
        self.snapshot.platform()
    }

    fn package_root(&self) -> Option<PathBuf> {
        self.snapshot
            .package_root()
            .or_else(|| self.launcher_dir.clone())
    }
}

fn query_snapshot(interpreters: &[&str], package: &str) -> Result<HostSnapshot, HostConfigError> {
    for interpreter in interpreters {
        let Some(document) = run_query(interpreter, package)? else {
            debug!(
                target: "pymermaider_launcher::host",
                interpreter,
                "Interpreter not available; trying the next one"
            );
            continue;
        };

        info!(
            target: "pymermaider_launcher::host",
            interpreter,
            "Loaded host installation configuration"
        );
        return HostSnapshot::from_json(&document);
    }

    Err(HostConfigError::InterpreterUnavailable {
        tried: interpreters.join(", "),
    })
}

/// `Ok(None)` when the interpreter does not exist or is not really installed.
fn run_query(interpreter: &str, package: &str) -> Result<Option<String>, HostConfigError> {
    let output = match Command::new(interpreter)
        .arg("-c")
        .arg(QUERY_PROGRAM)
        .arg(package)
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) => output,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(HostConfigError::InterpreterSpawn {
                interpreter: interpreter.to_string(),
                source,
            })
        }
    };

    if let Some(exit_code) = output
        .status
        .code()
        .filter(|code| NOT_INSTALLED_EXIT_CODES.contains(code))
    {
        debug!(
            target: "pymermaider_launcher::host",
            interpreter,
            exit_code,
            "Interpreter exited as not installed"
        );
        return Ok(None);
    }

    if !output.status.success() {
        return Err(HostConfigError::QueryFailed {
            interpreter: interpreter.to_string(),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
}
