use std::fs;

use tempfile::tempdir;

use crate::common::{
    host_python_available, launcher_with_host_python, write_executable, TARGET_NAME,
};

#[test]
fn working_directory_cannot_supply_the_package_or_host_modules() {
    if !host_python_available() {
        eprintln!("Skipping working-directory test because python3 is not on PATH");
        return;
    }

    let cwd = tempdir().expect("can create temp directory");
    let package = cwd.path().join(TARGET_NAME);
    fs::create_dir(&package).expect("can create package dir");
    fs::write(package.join("__init__.py"), "").expect("can write __init__.py");
    fs::create_dir(cwd.path().join("bin")).expect("can create bin");
    write_executable(
        &cwd.path().join("bin").join(TARGET_NAME),
        "#!/bin/sh\necho 'working directory binary ran'\n",
    );
    for module in ["json", "base64", "sysconfig"] {
        fs::write(
            cwd.path().join(format!("{module}.py")),
            "print('shadowed stdlib module')\nraise SystemExit(1)\n",
        )
        .expect("can write shadowing module");
    }

    let output = launcher_with_host_python(cwd.path())
        .output()
        .expect("launcher should run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stdout.contains("working directory binary ran"),
        "binary from the working directory must not run: {stdout}"
    );
    assert!(
        !stdout.contains("shadowed stdlib module") && !stderr.contains("shadowed stdlib module"),
        "query must not import modules from the working directory"
    );
    assert!(
        !stderr.contains("host installation configuration"),
        "host query should succeed: {stderr}"
    );
}
