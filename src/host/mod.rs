//! Host installation configuration: schemes, platform facts, and the provider seam.
//!
//! The resolver never talks to the interpreter directly. It reads everything
//! through [`InstallConfig`], which production code backs with a snapshot
//! reported by the host interpreter and tests back with fakes.
mod snapshot;
mod system;

use std::{fmt, path::PathBuf};

use crate::lib::errors::HostConfigError;

pub use snapshot::HostSnapshot;
pub use system::{SystemInstallConfig, QUERY_PROGRAM};

/// Named installation layout whose scripts directory may hold the executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallScheme {
    /// Whatever scheme the running installation context uses.
    Active,
    /// Per-user scheme on Windows.
    NtUser,
    /// Per-user scheme of a macOS framework build.
    OsxFrameworkUser,
    /// Generic POSIX per-user scheme.
    PosixUser,
    /// Scheme name reported by the host's preferred-scheme query.
    Named(String),
}

impl InstallScheme {
    /// Host name of the scheme; `None` for the active context.
    pub fn scheme_name(&self) -> Option<&str> {
        match self {
            InstallScheme::Active => None,
            InstallScheme::NtUser => Some("nt_user"),
            InstallScheme::OsxFrameworkUser => Some("osx_framework_user"),
            InstallScheme::PosixUser => Some("posix_user"),
            InstallScheme::Named(name) => Some(name.as_str()),
        }
    }
}

impl fmt::Display for InstallScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme_name().unwrap_or("<active>"))
    }
}

/// Platform facts needed to pick a user scheme when the host cannot say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    /// `os.name` of the host (`posix`, `nt`).
    pub os_name: String,
    /// `sys.platform` of the host (`linux`, `darwin`, `win32`).
    pub platform: String,
    /// Whether the interpreter is a macOS framework build.
    pub framework: bool,
}

impl HostPlatform {
    pub fn is_windows(&self) -> bool {
        self.os_name == "nt"
    }

    pub fn is_darwin_framework(&self) -> bool {
        self.platform == "darwin" && self.framework
    }

    /// User scheme for hosts without a preferred-scheme query.
    pub fn fallback_user_scheme(&self) -> InstallScheme {
        if self.is_windows() {
            InstallScheme::NtUser
        } else if self.is_darwin_framework() {
            InstallScheme::OsxFrameworkUser
        } else {
            InstallScheme::PosixUser
        }
    }
}

/// Read-only view of the host installation configuration.
pub trait InstallConfig {
    /// Scripts directory of the given scheme.
    fn scripts_dir(&self, scheme: &InstallScheme) -> Result<PathBuf, HostConfigError>;
    /// Preferred per-user scheme, if the host exposes that query.
    fn preferred_user_scheme(&self) -> Option<InstallScheme>;
    /// Suffix the host appends to executable names (empty on POSIX).
    fn executable_suffix(&self) -> &str;
    fn platform(&self) -> &HostPlatform;
    /// Directory of the installed package, if known.
    fn package_root(&self) -> Option<PathBuf>;

    /// Preferred user scheme, falling back to the platform default.
    fn user_scheme(&self) -> InstallScheme {
        self.preferred_user_scheme()
            .unwrap_or_else(|| self.platform().fallback_user_scheme())
    }
}
