//! Shared path helpers for candidate construction and probing.

use std::path::{Path, PathBuf};

/// Directory name used for executables installed next to a package.
pub const ADJACENT_BIN_DIR: &str = "bin";

/// Join the base name with the host's executable suffix (for example `.exe`).
pub fn target_filename(base_name: &str, exe_suffix: &str) -> String {
    format!("{base_name}{exe_suffix}")
}

/// Returns true if the path exists and is a regular file (symlinks are followed).
pub fn is_regular_file(path: &Path) -> bool {
    path.metadata()
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

/// `<package-root>/../bin/<filename>`.
pub fn adjacent_bin_path(package_root: &Path, filename: &str) -> PathBuf {
    package_root
        .parent()
        .unwrap_or(package_root)
        .join(ADJACENT_BIN_DIR)
        .join(filename)
}
