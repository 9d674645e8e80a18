//! Project layout discovery
//!
//! The tool can be invoked from any subdirectory of the engine repository.
//! The project root is the nearest ancestor containing both `setup.py` and
//! the `rubato/` package directory. Every other path the pipeline steps
//! touch is derived from the root here, so the directory layout is defined
//! in exactly one place.

use crate::{PACKAGE_NAME, env_vars};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while locating the engine repository
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(
        "not inside a rubato checkout: no ancestor of {start} contains both setup.py and the {PACKAGE_NAME}/ package"
    )]
    NotFound { start: String },

    #[error("RUBATO_ROOT points at {root}, which is not a rubato checkout")]
    BadOverride { root: String },

    #[error("could not determine current directory: {0}")]
    CurrentDir(#[from] std::io::Error),
}

/// Handle on a located engine repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Locate the project from the current directory.
    /// Priority: `RUBATO_ROOT` env var -> upward search from the cwd.
    pub fn discover() -> Result<Self, ProjectError> {
        if let Some(root) = env_vars::project_root() {
            let root = PathBuf::from(root);
            if Self::is_project_root(&root) {
                return Ok(Self { root });
            }
            return Err(ProjectError::BadOverride {
                root: root.display().to_string(),
            });
        }

        Self::discover_from(&env::current_dir()?)
    }

    /// Locate the project by walking upward from `start`.
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut dir = Some(start);
        while let Some(candidate) = dir {
            if Self::is_project_root(candidate) {
                return Ok(Self {
                    root: candidate.to_path_buf(),
                });
            }
            dir = candidate.parent();
        }

        Err(ProjectError::NotFound {
            start: start.display().to_string(),
        })
    }

    fn is_project_root(dir: &Path) -> bool {
        dir.join("setup.py").is_file() && dir.join(PACKAGE_NAME).is_dir()
    }

    /// Repository root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The Python package tree (`rubato/`)
    #[must_use]
    pub fn package_dir(&self) -> PathBuf {
        self.root.join(PACKAGE_NAME)
    }

    /// The test suite directory (`rubato/tests`)
    #[must_use]
    pub fn tests_dir(&self) -> PathBuf {
        self.package_dir().join("tests")
    }

    /// The bundled demo programs (`demo/`)
    #[must_use]
    pub fn demo_dir(&self) -> PathBuf {
        self.root.join("demo")
    }

    /// Sphinx source directory (`docs/source`)
    #[must_use]
    pub fn docs_source_dir(&self) -> PathBuf {
        self.root.join("docs").join("source")
    }

    /// Saved documentation output (`docs/build/html`)
    #[must_use]
    pub fn docs_build_dir(&self) -> PathBuf {
        self.root.join("docs").join("build")
    }

    /// Throwaway output for validation builds (`build/docs-test`)
    #[must_use]
    pub fn docs_scratch_dir(&self) -> PathBuf {
        self.build_dir().join("docs-test")
    }

    /// setuptools scratch directory (`build/`)
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    /// Distributable artifacts (`dist/`)
    #[must_use]
    pub fn dist_dir(&self) -> PathBuf {
        self.root.join("dist")
    }

    /// The extension build entry point (`setup.py`)
    #[must_use]
    pub fn setup_py(&self) -> PathBuf {
        self.root.join("setup.py")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_checkout(root: &Path) {
        fs::write(root.join("setup.py"), "from setuptools import setup\n").unwrap();
        fs::create_dir_all(root.join(PACKAGE_NAME)).unwrap();
    }

    #[test]
    fn discovers_from_root() {
        let temp = TempDir::new().unwrap();
        create_checkout(temp.path());

        let project = Project::discover_from(temp.path()).unwrap();
        assert_eq!(project.root(), temp.path());
    }

    #[test]
    fn discovers_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        create_checkout(temp.path());
        let nested = temp.path().join(PACKAGE_NAME).join("utils");
        fs::create_dir_all(&nested).unwrap();

        let project = Project::discover_from(&nested).unwrap();
        assert_eq!(project.root(), temp.path());
    }

    #[test]
    fn setup_py_alone_is_not_enough() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("setup.py"), "").unwrap();

        let result = Project::discover_from(temp.path());
        assert!(matches!(result, Err(ProjectError::NotFound { .. })));
    }

    #[test]
    fn package_dir_alone_is_not_enough() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(PACKAGE_NAME)).unwrap();

        let result = Project::discover_from(temp.path());
        assert!(matches!(result, Err(ProjectError::NotFound { .. })));
    }

    #[test]
    fn derived_paths() {
        let temp = TempDir::new().unwrap();
        create_checkout(temp.path());

        let project = Project::discover_from(temp.path()).unwrap();
        assert_eq!(project.package_dir(), temp.path().join("rubato"));
        assert_eq!(project.tests_dir(), temp.path().join("rubato/tests"));
        assert_eq!(project.demo_dir(), temp.path().join("demo"));
        assert_eq!(project.docs_source_dir(), temp.path().join("docs/source"));
        assert_eq!(project.docs_build_dir(), temp.path().join("docs/build"));
        assert_eq!(project.docs_scratch_dir(), temp.path().join("build/docs-test"));
        assert_eq!(project.dist_dir(), temp.path().join("dist"));
        assert_eq!(project.setup_py(), temp.path().join("setup.py"));
    }
}
