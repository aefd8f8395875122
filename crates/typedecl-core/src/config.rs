//! Configuration file loading for typedecl.
//!
//! Reads `typedecl.json` from a directory and provides typed access to the
//! scanner settings. Falls back to defaults when the file is missing or
//! cannot be parsed. [`ScanConfig::discover`] finds the file for a module by
//! walking up to the enclosing crate root.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "typedecl.json";
const MANIFEST_FILE: &str = "Cargo.toml";

/// What to do with an initializer the scanner has no rule for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedPolicy {
    /// Abort loudly; silently skipping would hide undeclared values.
    #[default]
    Panic,
    /// Return `ScanError::UnsupportedDeclarationShape`.
    Error,
}

/// Scanner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Look up struct definitions brought in with `use` in other files.
    #[serde(default = "default_true")]
    pub follow_imports: bool,
    #[serde(default)]
    pub unsupported: UnsupportedPolicy,
}

fn default_true() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_imports: true,
            unsupported: UnsupportedPolicy::default(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from `typedecl.json` inside `dir`.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse typedecl config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Configuration for the module at `module_path`: the nearest
    /// `typedecl.json` in the module's directory or above it, not looking
    /// past the first directory holding a `Cargo.toml`.
    pub fn discover(module_path: &Path) -> Self {
        for dir in module_path.ancestors() {
            if dir.join(CONFIG_FILE).is_file() {
                tracing::debug!(dir = %dir.display(), "using typedecl config");
                return Self::load(dir);
            }
            if dir.join(MANIFEST_FILE).is_file() {
                break;
            }
        }
        Self::default()
    }
}
