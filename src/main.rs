//! Entry point for the pymermaider launcher.
use std::{env, ffi::OsString, process::ExitCode};

use anyhow::Context;
use pymermaider_launcher::{
    host::SystemInstallConfig,
    launcher::{ChildExit, Handoff, LaunchExit},
    lib::telemetry,
    resolver::{resolve_executable, TARGET_BASE_NAME},
};

fn main() -> ExitCode {
    match bootstrap() {
        Ok(exit) => exit.terminate(),
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<ChildExit, LaunchExit> {
    telemetry::init_tracing().map_err(LaunchExit::from_error)?;
    let forwarded: Vec<OsString> = env::args_os().skip(1).collect();

    let host = SystemInstallConfig::discover(TARGET_BASE_NAME)
        .context("failed to read the host installation configuration")
        .map_err(LaunchExit::from_error)?;
    let resolved = resolve_executable(&host, TARGET_BASE_NAME)
        .with_context(|| format!("failed to locate the {TARGET_BASE_NAME} executable"))
        .map_err(LaunchExit::from_error)?;
    telemetry::emit_resolved(&resolved);

    Handoff::for_host()
        .handoff(resolved.path(), &forwarded)
        .with_context(|| format!("failed to launch {}", resolved.path().display()))
        .map_err(LaunchExit::from_error)
}
