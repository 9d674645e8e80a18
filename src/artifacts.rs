//! Build artifact cleanup
//!
//! The extension build scatters outputs through the package tree: compiled
//! binaries (`.so`/`.pyd`/`.dll`) next to their modules, and Cython-generated
//! C/C++ next to the sources they were transpiled from. The walkers here
//! classify and remove those, and clear whole output directories so no stale
//! file survives a rebuild.
//!
//! Hand-written C++ (the `c_src` sources) must survive `delete-c`. Cython
//! always writes the generated file next to its input, so a `.c`/`.cpp` with
//! a same-stem `.py` or `.pyx` sibling is generated; one without is not.

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// File extensions of compiled extension modules
const BINARY_EXTENSIONS: &[&str] = &["so", "pyd", "dll"];

/// What a cleanup pass removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanReport {
    /// Number of files removed
    pub files: usize,
    /// Total bytes reclaimed
    pub bytes: u64,
}

impl CleanReport {
    /// Fold another report into this one
    pub fn absorb(&mut self, other: Self) {
        self.files += other.files;
        self.bytes += other.bytes;
    }

    /// One-line summary for the user
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "removed {} file(s), reclaimed {}",
            self.files,
            human_bytes(self.bytes)
        )
    }
}

/// Convert bytes to human-readable format using binary units (1 KiB = 1024 bytes).
/// Examples: 512 -> "512 B", 1024 -> "1.0 KiB", 1048576 -> "1.0 MiB"
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_bytes(size: u64) -> String {
    const UNIT: f64 = 1024.0;
    const UNITS: &[char] = &['K', 'M', 'G', 'T', 'P', 'E'];

    if size < 1024 {
        return format!("{size} B");
    }

    let size_f = size as f64;
    let mut div = UNIT;
    let mut exp = 0;

    while size_f / (div * UNIT) >= 1.0 && exp < UNITS.len() - 1 {
        div *= UNIT;
        exp += 1;
    }

    let unit = UNITS.get(exp).copied().unwrap_or('?');
    format!("{:.1} {unit}iB", size_f / div)
}

/// Delete compiled extension binaries under `package_dir`.
pub fn remove_compiled_binaries(package_dir: &Path) -> std::io::Result<CleanReport> {
    remove_matching(package_dir, |path| {
        path.extension()
            .is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
    })
}

/// Delete Cython-generated C/C++ sources under `package_dir`.
///
/// `.c` files are always generated output in this tree. `.cpp` files are
/// only removed when a same-stem Cython input sits next to them.
pub fn remove_generated_sources(package_dir: &Path) -> std::io::Result<CleanReport> {
    remove_matching(package_dir, |path| is_generated_source(path))
}

/// Whether `path` is a transpiler output rather than a hand-written source
#[must_use]
pub fn is_generated_source(path: &Path) -> bool {
    match path.extension().map(|ext| ext.to_string_lossy()) {
        Some(ext) if ext == "c" => true,
        Some(ext) if ext == "cpp" => has_cython_sibling(path),
        _ => false,
    }
}

fn has_cython_sibling(path: &Path) -> bool {
    ["py", "pyx"]
        .iter()
        .any(|src_ext| path.with_extension(src_ext).is_file())
}

/// Walk `dir` and delete every file matching `predicate`.
/// A missing directory is not an error.
fn remove_matching<F>(dir: &Path, predicate: F) -> std::io::Result<CleanReport>
where
    F: Fn(&Path) -> bool,
{
    let mut report = CleanReport::default();

    if !dir.exists() {
        return Ok(report);
    }

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::other)?;
        let path = entry.path();

        if entry.file_type().is_file() && predicate(path) {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            fs::remove_file(path)?;
            report.files += 1;
            report.bytes += size;
        }
    }

    Ok(report)
}

/// Recursively delete a directory and everything in it.
/// Idempotent: a missing directory yields an empty report.
pub fn clear_dir(dir: &Path) -> std::io::Result<CleanReport> {
    let mut report = CleanReport::default();

    if !dir.exists() {
        return Ok(report);
    }

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::other)?;
        if entry.file_type().is_file() {
            report.files += 1;
            report.bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }

    fs::remove_dir_all(dir)?;
    Ok(report)
}
