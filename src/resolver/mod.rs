//! Executable resolution across installation layouts.
//!
//! Candidates are probed in a fixed order and the first regular file wins:
//!
//! 1. the scripts directory of the active installation context,
//! 2. the scripts directory of the per-user scheme,
//! 3. `bin` next to the package root (`pip install --target` layouts).
//!
//! When nothing matches, the error names the first candidate so the user has a
//! concrete location to inspect.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    host::{InstallConfig, InstallScheme},
    lib::{
        errors::ResolveError,
        paths::{adjacent_bin_path, is_regular_file, target_filename},
        telemetry,
    },
};

/// Base name of the executable this launcher hands off to.
pub const TARGET_BASE_NAME: &str = "pymermaider";

/// Which installation layout a candidate path comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Standard,
    User,
    AdjacentBin,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Standard => "standard",
            CandidateKind::User => "user",
            CandidateKind::AdjacentBin => "adjacent_bin",
        }
    }
}

/// A location that may hold the executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub path: PathBuf,
}

/// The executable chosen for the handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
    kind: CandidateKind,
    path: PathBuf,
}

impl ResolvedExecutable {
    pub fn kind(&self) -> CandidateKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Find the executable, probing each candidate only if the previous one missed.
pub fn resolve_executable(
    config: &dyn InstallConfig,
    base_name: &str,
) -> Result<ResolvedExecutable, ResolveError> {
    let filename = target_filename(base_name, config.executable_suffix());

    let standard = standard_candidate(config, &filename)?;
    if let Some(found) = probe(&standard) {
        return Ok(found);
    }

    let user = user_candidate(config, &filename)?;
    if let Some(found) = probe(&user) {
        return Ok(found);
    }

    if let Some(found) = adjacent_candidate(config, &filename).and_then(|c| probe(&c)) {
        return Ok(found);
    }

    Err(ResolveError::NotFound {
        primary: standard.path,
    })
}

/// Every candidate in probe order, without touching the filesystem.
pub fn candidate_paths(
    config: &dyn InstallConfig,
    base_name: &str,
) -> Result<Vec<Candidate>, ResolveError> {
    let filename = target_filename(base_name, config.executable_suffix());
    let mut candidates = vec![
        standard_candidate(config, &filename)?,
        user_candidate(config, &filename)?,
    ];
    candidates.extend(adjacent_candidate(config, &filename));
    Ok(candidates)
}

fn standard_candidate(
    config: &dyn InstallConfig,
    filename: &str,
) -> Result<Candidate, ResolveError> {
    Ok(Candidate {
        kind: CandidateKind::Standard,
        path: config.scripts_dir(&InstallScheme::Active)?.join(filename),
    })
}

fn user_candidate(config: &dyn InstallConfig, filename: &str) -> Result<Candidate, ResolveError> {
    let scheme = config.user_scheme();
    debug!(
        target: "pymermaider_launcher::resolver",
        scheme = %scheme,
        "Selected user installation scheme"
    );
    Ok(Candidate {
        kind: CandidateKind::User,
        path: config.scripts_dir(&scheme)?.join(filename),
    })
}

fn adjacent_candidate(config: &dyn InstallConfig, filename: &str) -> Option<Candidate> {
    let Some(package_root) = config.package_root() else {
        debug!(
            target: "pymermaider_launcher::resolver",
            "Package root unknown; skipping adjacent bin directory"
        );
        return None;
    };
    Some(Candidate {
        kind: CandidateKind::AdjacentBin,
        path: adjacent_bin_path(&package_root, filename),
    })
}

fn probe(candidate: &Candidate) -> Option<ResolvedExecutable> {
    let found = is_regular_file(&candidate.path);
    telemetry::emit_probe(candidate.kind, &candidate.path, found);
    found.then(|| ResolvedExecutable {
        kind: candidate.kind,
        path: candidate.path.clone(),
    })
}
