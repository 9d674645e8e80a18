//! Lint command
//!
//! Static-analysis pass over the package tree: `python -m pylint rubato`.

use anyhow::Result;
use rudev::runner::{RunOptions, Step};
use rudev::{PACKAGE_NAME, Project, Python};
use std::process::Command;

/// Lint the package tree
pub(crate) fn run(project: &Project, python: &Python, opts: &RunOptions) -> Result<()> {
    Step::new("pylint", command(project, python)).run(opts)?;
    Ok(())
}

/// The pylint invocation, reusable by the aggregate pipeline
pub(crate) fn command(project: &Project, python: &Python) -> Command {
    let mut cmd = python.module("pylint");
    cmd.arg(PACKAGE_NAME);
    cmd.current_dir(project.root());
    cmd
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn command_lints_the_package() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("setup.py"), "").unwrap();
        fs::create_dir_all(temp.path().join("rubato")).unwrap();
        let project = Project::discover_from(temp.path()).unwrap();
        let python = Python::from_path(PathBuf::from("python3"));

        let cmd = command(&project, &python);
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args, ["-m", "pylint", "rubato"]);
        assert_eq!(cmd.get_current_dir(), Some(project.root()));
    }
}
