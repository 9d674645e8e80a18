//! Shared test helpers and utilities

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Get the path to the rudev binary under test
pub(crate) fn rudev_binary() -> String {
    env!("CARGO_BIN_EXE_rudev").to_string()
}

/// Command for the binary under test, with the ambient override variables
/// scrubbed so a developer's own environment cannot point a fixture run at
/// a real checkout or interpreter
pub(crate) fn rudev_command() -> Command {
    let mut cmd = Command::new(rudev_binary());
    cmd.env_remove("RUBATO_ROOT");
    cmd.env_remove("RUBATO_PYTHON");
    cmd.env_remove("PYTHON");
    cmd
}

/// Create a minimal rubato checkout in `temp`.
///
/// The tree carries a setup.py, a small package with one hand-written C++
/// source, two demo programs, and a Sphinx source directory — enough for
/// every command to find its inputs.
#[allow(dead_code)]
pub(crate) fn create_test_checkout(temp: &TempDir) -> PathBuf {
    let root = temp.path().to_path_buf();

    fs::write(
        root.join("setup.py"),
        "from setuptools import setup\nsetup()\n",
    )
    .expect("Failed to write setup.py");

    let pkg = root.join("rubato");
    fs::create_dir_all(pkg.join("c_src")).expect("Failed to create package tree");
    fs::create_dir_all(pkg.join("tests")).expect("Failed to create tests dir");
    fs::write(pkg.join("game.py"), "class Game: ...\n").expect("Failed to write module");
    fs::write(pkg.join("c_src/PixelEditor.cpp"), "// hand-written\n")
        .expect("Failed to write C++ source");
    fs::write(pkg.join("tests/test_game.py"), "def test_game(): ...\n")
        .expect("Failed to write test module");

    let demo = root.join("demo");
    fs::create_dir_all(demo.join("platformer")).expect("Failed to create demo dir");
    fs::write(demo.join("asteroids.py"), "print('asteroids')\n").expect("Failed to write demo");
    fs::write(demo.join("platformer/main.py"), "print('platformer')\n")
        .expect("Failed to write demo");

    let docs = root.join("docs/source");
    fs::create_dir_all(&docs).expect("Failed to create docs source");
    fs::write(docs.join("conf.py"), "project = 'rubato'\n").expect("Failed to write conf.py");

    root
}

/// Write an executable stub tool that journals its arguments.
///
/// The stub appends one line per invocation (its name and arguments) to the
/// file named by the `RUDEV_JOURNAL` environment variable, then runs any
/// extra script text (e.g. a conditional `exit 1`).
#[allow(dead_code)]
#[cfg(unix)]
pub(crate) fn write_stub_tool(dir: &Path, name: &str, extra: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let script = format!("#!/bin/sh\necho \"{name} $*\" >> \"$RUDEV_JOURNAL\"\n{extra}\n");
    fs::write(&path, script).expect("Failed to write stub tool");

    let mut perms = fs::metadata(&path)
        .expect("Failed to stat stub tool")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to mark stub executable");

    path
}

/// Read the journal written by stub tools, one invocation per line
#[allow(dead_code)]
pub(crate) fn read_journal(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
