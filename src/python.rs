//! Python interpreter discovery
//!
//! Every toolchain the pipeline drives (Cython via setup.py, pytest, pylint,
//! Sphinx, build, twine, pip) runs inside one Python environment, so tools
//! are invoked as interpreter modules (`python -m pytest`) rather than as
//! bare executables. Only setup.py and the demo programs run as scripts.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A located Python interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Python {
    path: PathBuf,
}

impl Python {
    /// Find the interpreter to use.
    ///
    /// Priority order:
    /// 1. `RUBATO_PYTHON` environment variable
    /// 2. `PYTHON` environment variable
    /// 3. `python3` in PATH
    /// 4. `python` in PATH
    pub fn locate() -> Result<Self> {
        Self::find_interpreter().context(
            "Python interpreter not found. Set RUBATO_PYTHON or PYTHON, \
             or put python3 on PATH.",
        )
    }

    fn find_interpreter() -> Result<Self> {
        for var in [crate::env_vars::rubato_python(), crate::env_vars::python()] {
            if let Some(override_path) = var {
                let path = PathBuf::from(override_path);
                if path.exists() {
                    return Ok(Self { path });
                }
                anyhow::bail!(
                    "configured Python interpreter does not exist: {}",
                    path.display()
                );
            }
        }

        for name in ["python3", "python"] {
            if let Some(path) = Self::find_in_path(name) {
                return Ok(Self { path });
            }
        }

        anyhow::bail!("no python3 or python executable found in PATH")
    }

    /// Resolve an executable name through `which`
    fn find_in_path(name: &str) -> Option<PathBuf> {
        if let Ok(output) = Command::new("which").arg(name).output()
            && output.status.success()
        {
            let path_str = String::from_utf8_lossy(&output.stdout);
            let path = PathBuf::from(path_str.trim());
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Wrap an already-resolved interpreter path (used by tests)
    #[must_use]
    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Interpreter executable path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Command for `python -m <module>`
    #[must_use]
    pub fn module(&self, module: &str) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.arg("-m").arg(module);
        cmd
    }

    /// Command for `python <script>`
    #[must_use]
    pub fn script(&self, script: &Path) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.arg(script);
        cmd
    }
}
