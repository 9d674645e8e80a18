//! Setup command
//!
//! Prepare a fresh checkout for development: sync the git submodules (demo
//! assets and docs theme live in submodules), then editable-install the
//! package with its dev extras so the toolchain modules (pytest, pylint,
//! Sphinx, build, twine) are importable.

use anyhow::Result;
use rudev::runner::{Pipeline, RunOptions};
use rudev::{Project, Python};
use std::process::Command;

/// Sync submodules and editable-install the package with dev extras
pub(crate) fn run(project: &Project, python: &Python, opts: &RunOptions) -> Result<()> {
    let mut submodules = Command::new("git");
    submodules.args(["submodule", "update", "--init", "--recursive"]);
    submodules.current_dir(project.root());

    let mut install = python.module("pip");
    install.args(["install", "-e", ".[dev]"]);
    install.current_dir(project.root());

    Pipeline::new()
        .step("sync submodules", submodules)
        .step("install dev environment", install)
        .run(opts)?;
    Ok(())
}
