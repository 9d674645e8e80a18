//! Packaging commands
//!
//! `pypi-build` produces the distributable artifacts (sdist + wheel) with
//! `python -m build`, and `pypi-publish-wheels` uploads everything in
//! `dist/` through twine. The build always starts from cleared `build/` and
//! `dist/` directories so old artifacts cannot leak into a release.

use anyhow::{Context, Result};
use rudev::runner::{RunOptions, Step};
use rudev::{Project, Python, VERSION_ENV_VAR, artifacts, env_vars};
use std::fs;

/// Build sdist and wheel into `dist/`.
///
/// `version` stamps the release; it is exported as `RUBATO_VERSION` for
/// setup.py. When absent, an already-set environment value is inherited
/// and setup.py otherwise falls back to its 0.0.0 default.
pub(crate) fn build(
    project: &Project,
    python: &Python,
    version: Option<&str>,
    opts: &RunOptions,
) -> Result<()> {
    artifacts::clear_dir(&project.build_dir())
        .context("Failed to clear build/ before packaging")?;
    artifacts::clear_dir(&project.dist_dir()).context("Failed to clear dist/ before packaging")?;

    let mut cmd = python.module("build");
    cmd.current_dir(project.root());
    if let Some(version) = version {
        cmd.env(VERSION_ENV_VAR, version);
    } else if let Some(env_version) = env_vars::package_version() {
        cmd.env(VERSION_ENV_VAR, env_version);
    }

    Step::new("build distributions", cmd).run(opts)?;
    Ok(())
}

/// Upload the artifacts in `dist/` to the package index.
pub(crate) fn publish_wheels(project: &Project, python: &Python, opts: &RunOptions) -> Result<()> {
    let dist_dir = project.dist_dir();
    let mut artifacts: Vec<_> = fs::read_dir(&dist_dir)
        .with_context(|| format!("No dist directory at {}; run pypi-build first", dist_dir.display()))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    artifacts.sort();

    if artifacts.is_empty() {
        anyhow::bail!(
            "nothing to publish: {} is empty; run pypi-build first",
            dist_dir.display()
        );
    }

    let mut cmd = python.module("twine");
    cmd.arg("upload");
    cmd.args(&artifacts);
    cmd.current_dir(project.root());

    Step::new("twine upload", cmd).run(opts)?;
    Ok(())
}
