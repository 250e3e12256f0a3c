use std::{
    fs,
    os::unix::{ffi::OsStrExt, fs::PermissionsExt},
    path::{Path, PathBuf},
    process::Command,
};

use base64::Engine;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_pymermaider-launcher");
pub const TARGET_NAME: &str = "pymermaider";

/// Prints `$0` and every argument on its own line, then exits with `FAKE_TARGET_EXIT`.
const FAKE_TARGET: &str = r#"#!/bin/sh
printf 'argv0=%s\n' "$0"
for arg in "$@"; do
    printf '%s\n' "$arg"
done
exit "${FAKE_TARGET_EXIT:-0}"
"#;

/// Temporary installation with a fake `python3` on PATH reporting its layout.
pub struct FakeHost {
    temp: TempDir,
    snapshot: Value,
}

impl FakeHost {
    pub fn new() -> Self {
        let temp = tempdir().expect("can create temp directory");
        for dir in ["interp", "scripts", "user/bin", "target/pymermaider", "target/bin"] {
            fs::create_dir_all(temp.path().join(dir)).expect("can create layout dir");
        }
        let root = temp.path();
        let snapshot = json!({
            "exe_suffix": "",
            "scripts": encode_path(&root.join("scripts")),
            "schemes": {
                "posix_prefix": encode_path(&root.join("scripts")),
                "posix_user": encode_path(&root.join("user/bin")),
            },
            "preferred_user_scheme": "posix_user",
            "os_name": "posix",
            "platform": "linux",
            "framework": false,
            "package_dir": encode_path(&root.join("target/pymermaider")),
        });
        Self { temp, snapshot }
    }

    pub fn scripts(&self) -> PathBuf {
        self.temp.path().join("scripts")
    }

    pub fn user(&self) -> PathBuf {
        self.temp.path().join("user/bin")
    }

    pub fn adjacent_bin(&self) -> PathBuf {
        self.temp.path().join("target/bin")
    }

    pub fn set_snapshot_field(&mut self, key: &str, value: Value) {
        self.snapshot[key] = value;
    }

    /// Install the fake target as `<dir>/<filename>`.
    pub fn install(&self, dir: &Path, filename: &str) -> PathBuf {
        let path = dir.join(filename);
        write_executable(&path, FAKE_TARGET);
        path
    }

    /// Launcher command wired to this host; call after the layout is final.
    pub fn launcher(&self) -> Command {
        let interp = self.temp.path().join("interp");
        let snapshot_path = self.temp.path().join("snapshot.json");
        fs::write(&snapshot_path, self.snapshot.to_string()).expect("can write snapshot");
        write_executable(
            &interp.join("python3"),
            &format!("#!/bin/sh\ncat '{}'\n", snapshot_path.display()),
        );

        let mut command = Command::new(BINARY_PATH);
        command
            .env("PATH", format!("{}:/usr/bin:/bin", interp.display()))
            .env_remove("RUST_LOG")
            .env_remove("FAKE_TARGET_EXIT");
        command
    }
}

/// Paths in a host snapshot are base64 of their raw bytes.
pub fn encode_path(path: &Path) -> String {
    base64::engine::general_purpose::STANDARD.encode(path.as_os_str().as_bytes())
}

pub fn write_executable(path: &Path, content: &str) {
    fs::write(path, content).expect("can write executable");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("can mark file executable");
}

/// Split the fake target's stdout into `argv0` and the forwarded arguments.
pub fn observed(stdout: &[u8]) -> (String, Vec<String>) {
    let text = String::from_utf8_lossy(stdout);
    let mut lines = text.lines().map(str::to_string);
    let argv0 = lines
        .next()
        .and_then(|line| line.strip_prefix("argv0=").map(str::to_string))
        .expect("fake target prints argv0 first");
    (argv0, lines.collect())
}

/// True when a real `python3` is on the inherited PATH.
pub fn host_python_available() -> bool {
    Command::new("python3")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Launcher command using the real host interpreter from the inherited PATH.
pub fn launcher_with_host_python(cwd: &Path) -> Command {
    let mut command = Command::new(BINARY_PATH);
    command.current_dir(cwd).env_remove("RUST_LOG");
    command
}
