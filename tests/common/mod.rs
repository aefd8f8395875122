//! Shared test helpers for the typedecl integration tests.
//!
//! Import from any integration test file with:
//!   `#[path = "common/mod.rs"] mod common;`
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Absolute path of a module under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Set up a throwaway crate named `name` with the given `src/` files.
///
/// Returns (TempDir, crate_root). Hold the TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn setup_crate(name: &str, files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();
    fs::write(
        root.join("Cargo.toml"),
        format!("[package]\nname = \"{name}\"\nversion = \"0.1.0\"\nedition = \"2021\"\n"),
    )
    .unwrap();
    for (path, content) in files {
        let file = root.join("src").join(path);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(file, content).unwrap();
    }
    (dir, root)
}
