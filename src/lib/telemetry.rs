//! Telemetry initialization and structured launcher events.

use std::{ffi::OsString, path::Path};

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use crate::resolver::{CandidateKind, ResolvedExecutable};

/// Filter used when `RUST_LOG` is unset. The launcher stays silent on success.
const DEFAULT_FILTER: &str = "warn";

/// Initialize `tracing` with developer logs on stderr.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Record a single candidate probe.
pub fn emit_probe(kind: CandidateKind, path: &Path, found: bool) {
    debug!(
        target: "pymermaider_launcher::resolver",
        candidate = kind.as_str(),
        path = %path.display(),
        found,
        "Probed candidate executable"
    );
}

/// Record the resolution outcome.
pub fn emit_resolved(resolved: &ResolvedExecutable) {
    info!(
        target: "pymermaider_launcher::resolver",
        candidate = resolved.kind().as_str(),
        path = %resolved.path().display(),
        "Resolved executable"
    );
}

/// Record the handoff about to happen.
pub fn emit_handoff(mode: &'static str, path: &Path, args: &[OsString]) {
    debug!(
        target: "pymermaider_launcher::launcher",
        mode,
        path = %path.display(),
        arg_count = args.len(),
        "Handing off to resolved executable"
    );
}
