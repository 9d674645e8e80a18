//! Artifact deletion commands
//!
//! `delete-bin`, `delete-c`, and `delete-build` remove the extension
//! build's droppings: compiled binaries, Cython-generated sources, and the
//! setuptools scratch directory.

use anyhow::{Context, Result};
use rudev::runner::RunOptions;
use rudev::{Project, artifacts};

/// Delete compiled extension binaries under the package tree
pub(crate) fn delete_bin(project: &Project, opts: &RunOptions) -> Result<()> {
    let report = artifacts::remove_compiled_binaries(&project.package_dir())
        .context("Failed to delete compiled binaries")?;
    if !opts.quiet {
        println!("delete-bin: {}", report.summary());
    }
    Ok(())
}

/// Delete Cython-generated C/C++ sources under the package tree
pub(crate) fn delete_c(project: &Project, opts: &RunOptions) -> Result<()> {
    let report = artifacts::remove_generated_sources(&project.package_dir())
        .context("Failed to delete generated sources")?;
    if !opts.quiet {
        println!("delete-c: {}", report.summary());
    }
    Ok(())
}

/// Delete the setuptools scratch directory
pub(crate) fn delete_build(project: &Project, opts: &RunOptions) -> Result<()> {
    let build_dir = project.build_dir();
    let report = artifacts::clear_dir(&build_dir)
        .with_context(|| format!("Failed to delete {}", build_dir.display()))?;
    if !opts.quiet {
        println!("delete-build: {}", report.summary());
    }
    Ok(())
}
