//! Map between module paths, source files, and qualified module names.
//!
//! Handles:
//! - `foo.rs` → the file itself
//! - `foo/` → `foo/mod.rs`, or the sibling `foo.rs` (Rust 2018+)
//! - a crate directory → `src/lib.rs`, then `src/main.rs`
//! - `mod foo;` inside a module → `foo.rs` (preferred) or `foo/mod.rs`

use std::path::{Path, PathBuf};

use super::helpers::crate_name;

/// File names that stand for their directory rather than a module of their own.
const DIR_MODULE_FILES: &[&str] = &["mod", "lib", "main"];

/// Find the source file for a module given as a file, module directory,
/// or crate directory.
pub fn locate_module(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return (path.extension().is_some_and(|e| e == "rs")).then(|| path.to_path_buf());
    }

    if path.is_dir() {
        let mod_rs = path.join("mod.rs");
        if mod_rs.is_file() {
            return Some(mod_rs);
        }
        if path.join("Cargo.toml").is_file() {
            for root in ["src/lib.rs", "src/main.rs"] {
                let candidate = path.join(root);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
    }

    let sibling = path.with_extension("rs");
    if sibling.is_file() {
        return Some(sibling);
    }

    // A crate's `src/` directory.
    if path.is_dir() {
        for root in ["lib.rs", "main.rs"] {
            let candidate = path.join(root);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Walk up from `file` to the nearest manifest with a `[package]`,
/// returning the crate directory and its crate name.
pub fn find_crate_root(file: &Path) -> Option<(PathBuf, String)> {
    for dir in file.ancestors().skip(1) {
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        if !dir.join("Cargo.toml").is_file() {
            continue;
        }
        if let Some(name) = crate_name(dir) {
            return Some((dir.to_path_buf(), name));
        }
    }
    None
}

/// The name of the module a file defines: its stem, or its directory's
/// name for `mod.rs`, `lib.rs`, and `main.rs`.
pub fn module_name(file: &Path) -> String {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    if !DIR_MODULE_FILES.contains(&stem.as_str()) {
        return stem;
    }
    file.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or(stem)
}

/// Qualified name of the module defined by `file`.
///
/// `<crate>/src/feature/flags.rs` → `my_crate::feature::flags`;
/// a file outside any crate's `src/` → [`module_name`].
pub fn qualified_module_name(file: &Path) -> String {
    if let Some((root, name)) = find_crate_root(file) {
        if let Ok(relative) = file.strip_prefix(root.join("src")) {
            let mut segments = vec![name];
            let components: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect();
            for (i, component) in components.iter().enumerate() {
                let is_last = i + 1 == components.len();
                if !is_last {
                    segments.push(component.clone());
                    continue;
                }
                let stem = component.strip_suffix(".rs").unwrap_or(component);
                let is_crate_root = i == 0 && (stem == "lib" || stem == "main");
                if stem != "mod" && !is_crate_root {
                    segments.push(stem.to_string());
                }
            }
            return segments.join("::");
        }
    }
    module_name(file)
}

/// Directory holding the child modules of the module defined by `file`.
pub fn module_dir(file: &Path) -> PathBuf {
    let parent = file.parent().unwrap_or(Path::new("")).to_path_buf();
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    if DIR_MODULE_FILES.contains(&stem.as_str()) {
        parent
    } else {
        parent.join(stem)
    }
}

/// Resolve `mod name;` declared by a module whose children live in `dir`.
/// Prefers `name.rs` over `name/mod.rs`.
pub fn resolve_mod_to_path(dir: &Path, name: &str) -> Option<PathBuf> {
    let as_file = dir.join(format!("{name}.rs"));
    if as_file.is_file() {
        return Some(as_file);
    }
    let as_mod = dir.join(name).join("mod.rs");
    as_mod.is_file().then_some(as_mod)
}

/// Source file of the module `target` (e.g. `imported::kinds`), found from
/// a module `anchor` whose qualified name is `anchor_name`.
///
/// Only modules under the same root as the anchor can be found: the crate
/// for files in a crate's `src/`, otherwise the anchor module itself.
pub fn module_file_for_path(anchor: &Path, anchor_name: &str, target: &str) -> Option<PathBuf> {
    let root_name = anchor_name.split("::").next().unwrap_or(anchor_name);
    let (root_file, root_dir) = match find_crate_root(anchor) {
        Some((root, name)) if name == root_name && anchor.starts_with(root.join("src")) => {
            let src = root.join("src");
            let file = ["lib.rs", "main.rs"]
                .iter()
                .map(|f| src.join(f))
                .find(|f| f.is_file())?;
            (file, src)
        }
        _ => (anchor.to_path_buf(), module_dir(anchor)),
    };

    if target == root_name {
        return Some(root_file);
    }
    let rest = target.strip_prefix(root_name)?.strip_prefix("::")?;

    let mut dir = root_dir;
    let mut file = None;
    for segment in rest.split("::") {
        file = Some(resolve_mod_to_path(&dir, segment)?);
        dir = dir.join(segment);
    }
    file
}
