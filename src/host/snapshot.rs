use std::{collections::BTreeMap, path::PathBuf};

use base64::Engine;
use serde::Deserialize;
use tracing::error;

use crate::lib::errors::HostConfigError;

use super::{HostPlatform, InstallConfig, InstallScheme};

/// Installation configuration reported by the host interpreter.
///
/// Paths travel as base64 of the host's filesystem bytes, so directories that
/// are not valid UTF-8 survive the trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSnapshot {
    pub exe_suffix: String,
    /// Scripts directory of the active installation context.
    pub scripts: PathBuf,
    /// Scripts directory of every scheme the host defines.
    pub schemes: BTreeMap<String, PathBuf>,
    pub preferred_user_scheme: Option<String>,
    pub platform: HostPlatform,
    pub package_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawHostSnapshot {
    exe_suffix: Option<String>,
    scripts: Option<String>,
    schemes: Option<BTreeMap<String, String>>,
    preferred_user_scheme: Option<String>,
    os_name: Option<String>,
    platform: Option<String>,
    framework: Option<bool>,
    package_dir: Option<String>,
}

impl HostSnapshot {
    /// Parse and validate the JSON document printed by the query program.
    pub fn from_json(document: &str) -> Result<Self, HostConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Json));
        let document = builder.build().map_err(|err| {
            let error = HostConfigError::from_parse_error(err);
            error!(
                target: "pymermaider_launcher::host",
                reason = %error,
                "Failed to read host configuration"
            );
            error
        })?;

        let raw: RawHostSnapshot = document.try_deserialize().map_err(|err| {
            let error = HostConfigError::from_parse_error(err);
            error!(
                target: "pymermaider_launcher::host",
                reason = %error,
                "Failed to deserialize host configuration"
            );
            error
        })?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawHostSnapshot) -> Result<Self, HostConfigError> {
        let exe_suffix = raw.exe_suffix.ok_or(HostConfigError::MissingField {
            field: "exe_suffix",
        })?;
        validate_suffix(&exe_suffix)?;

        let scripts = non_empty(raw.scripts).ok_or(HostConfigError::MissingField {
            field: "scripts",
        })?;
        let scripts = decode_path("scripts", &scripts)?;
        let os_name = non_empty(raw.os_name).ok_or(HostConfigError::MissingField {
            field: "os_name",
        })?;
        let platform = non_empty(raw.platform).ok_or(HostConfigError::MissingField {
            field: "platform",
        })?;

        let schemes = raw
            .schemes
            .unwrap_or_default()
            .into_iter()
            .filter(|(_, dir)| !dir.is_empty())
            .map(|(name, dir)| Ok((name, decode_path("schemes", &dir)?)))
            .collect::<Result<_, HostConfigError>>()?;
        let package_dir = non_empty(raw.package_dir)
            .map(|dir| decode_path("package_dir", &dir))
            .transpose()?;

        Ok(Self {
            exe_suffix,
            scripts,
            schemes,
            preferred_user_scheme: non_empty(raw.preferred_user_scheme),
            platform: HostPlatform {
                os_name,
                platform,
                framework: raw.framework.unwrap_or(false),
            },
            package_dir,
        })
    }
}

impl InstallConfig for HostSnapshot {
    fn scripts_dir(&self, scheme: &InstallScheme) -> Result<PathBuf, HostConfigError> {
        match scheme.scheme_name() {
            None => Ok(self.scripts.clone()),
            Some(name) => {
                self.schemes
                    .get(name)
                    .cloned()
                    .ok_or_else(|| HostConfigError::UnknownScheme {
                        scheme: name.to_string(),
                    })
            }
        }
    }

    fn preferred_user_scheme(&self) -> Option<InstallScheme> {
        self.preferred_user_scheme
            .as_ref()
            .map(|name| InstallScheme::Named(name.clone()))
    }

    fn executable_suffix(&self) -> &str {
        &self.exe_suffix
    }

    fn platform(&self) -> &HostPlatform {
        &self.platform
    }

    fn package_root(&self) -> Option<PathBuf> {
        self.package_dir.clone()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn decode_path(field: &'static str, encoded: &str) -> Result<PathBuf, HostConfigError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|err| HostConfigError::InvalidField {
            field,
            message: format!("path is not base64-encoded: {err}"),
        })?;
    path_from_bytes(field, bytes)
}

#[cfg(unix)]
fn path_from_bytes(_field: &'static str, bytes: Vec<u8>) -> Result<PathBuf, HostConfigError> {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};

    Ok(PathBuf::from(OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
fn path_from_bytes(field: &'static str, bytes: Vec<u8>) -> Result<PathBuf, HostConfigError> {
    String::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|err| HostConfigError::InvalidField {
            field,
            message: format!("path is not valid UTF-8: {err}"),
        })
}

fn validate_suffix(suffix: &str) -> Result<(), HostConfigError> {
    if suffix.contains(['/', '\\']) {
        return Err(HostConfigError::InvalidField {
            field: "exe_suffix",
            message: format!("`{suffix}` must not contain path separators"),
        });
    }
    Ok(())
}
