//! Helper functions for Rust resolution: `use` expansion, path absolutizing,
//! and crate manifests.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// The names a module brings into scope, and what they resolve to.
#[derive(Debug, Clone, Default)]
pub struct ModuleScope {
    /// Qualified name of the module, e.g. `my_crate::feature`.
    pub module: String,
    /// Types defined at the module's top level.
    pub local_types: Vec<String>,
    /// Child modules declared with `mod`.
    pub child_mods: Vec<String>,
    /// `use` bindings: local name → absolute path.
    pub imports: HashMap<String, String>,
}

impl ModuleScope {
    pub fn new(
        module: impl Into<String>,
        local_types: Vec<String>,
        child_mods: Vec<String>,
        uses: &[String],
    ) -> Self {
        let mut scope = ModuleScope {
            module: module.into(),
            local_types,
            child_mods,
            imports: HashMap::new(),
        };
        let mut imports = HashMap::new();
        for arg in uses {
            for (alias, path) in expand_use(arg) {
                imports.insert(alias, scope.absolutize_use(&path));
            }
        }
        scope.imports = imports;
        scope
    }

    /// Resolve a path as written in the module body to an absolute path.
    /// Paths that name nothing known to the module are returned unchanged.
    pub fn resolve(&self, path: &str) -> String {
        let (head, rest) = split_head(path);
        if rest.is_none() && self.local_types.iter().any(|t| t == head) {
            return format!("{}::{head}", self.module);
        }
        if let Some(target) = self.imports.get(head) {
            return join(target, rest);
        }
        self.absolutize_use(path)
    }

    /// Rewrite `crate::`, `self::`, `super::` and child module prefixes.
    fn absolutize_use(&self, path: &str) -> String {
        let (head, rest) = split_head(path);
        match head {
            "crate" => join(crate_root(&self.module), rest),
            "self" => join(&self.module, rest),
            "super" => {
                let mut module = self.module.as_str();
                let mut remaining = rest;
                module = parent_module(module);
                while let Some(r) = remaining {
                    let (next, after) = split_head(r);
                    if next != "super" {
                        break;
                    }
                    module = parent_module(module);
                    remaining = after;
                }
                join(module, remaining)
            }
            _ if self.child_mods.iter().any(|m| m == head) => {
                format!("{}::{path}", self.module)
            }
            _ => path.to_string(),
        }
    }
}

fn split_head(path: &str) -> (&str, Option<&str>) {
    match path.split_once("::") {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

fn join(prefix: &str, rest: Option<&str>) -> String {
    match rest {
        Some(rest) if !prefix.is_empty() => format!("{prefix}::{rest}"),
        Some(rest) => rest.to_string(),
        None => prefix.to_string(),
    }
}

fn crate_root(module: &str) -> &str {
    module.split("::").next().unwrap_or(module)
}

fn parent_module(module: &str) -> &str {
    module.rsplit_once("::").map(|(p, _)| p).unwrap_or("")
}

/// Expand the argument of a `use` declaration into `(local name, path)`
/// bindings. Globs and `as _` imports bind nothing.
///
/// `super::{kinds::Kind, Other as Renamed}` →
/// `[("Kind", "super::kinds::Kind"), ("Renamed", "super::Other")]`
pub fn expand_use(argument: &str) -> Vec<(String, String)> {
    let mut compact = argument.split_whitespace().collect::<Vec<_>>().join(" ");
    for (from, to) in [
        (" ::", "::"),
        (":: ", "::"),
        (" {", "{"),
        ("{ ", "{"),
        (" }", "}"),
        ("} ", "}"),
        (" ,", ","),
        (", ", ","),
    ] {
        compact = compact.replace(from, to);
    }
    let mut bindings = Vec::new();
    expand_into("", &compact, &mut bindings);
    bindings
}

fn expand_into(prefix: &str, tree: &str, out: &mut Vec<(String, String)>) {
    let tree = tree.trim_start_matches("::");
    if let Some(open) = tree.find('{') {
        let base = tree[..open].trim_end_matches("::");
        let inner = tree[open + 1..].strip_suffix('}').unwrap_or(&tree[open + 1..]);
        let prefix = join_use(prefix, base);
        for item in split_top_level(inner) {
            if item == "self" {
                if let Some(name) = prefix.rsplit("::").next() {
                    out.push((name.to_string(), prefix.clone()));
                }
            } else {
                expand_into(&prefix, item, out);
            }
        }
        return;
    }
    if tree.is_empty() || tree.ends_with('*') {
        return;
    }

    let (path, alias) = match tree.split_once(" as ") {
        Some((path, alias)) => (path, Some(alias)),
        None => (tree, None),
    };
    let full = join_use(prefix, path);
    let name = match alias {
        Some("_") => return,
        Some(alias) => alias.to_string(),
        None => full.rsplit("::").next().unwrap_or(&full).to_string(),
    };
    out.push((name, full));
}

fn join_use(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}::{path}"),
    }
}

/// Split on commas that are not nested inside braces.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&list[start..]);
    items.into_iter().filter(|s| !s.is_empty()).collect()
}

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
}

/// Crate name from `<root>/Cargo.toml`, with `-` mapped to `_`.
/// `None` for virtual workspace manifests and unreadable files.
pub fn crate_name(root: &Path) -> Option<String> {
    let manifest_path = root.join("Cargo.toml");
    let content = std::fs::read_to_string(&manifest_path).ok()?;
    let manifest: Manifest = match toml::from_str(&content) {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(
                path = %manifest_path.display(),
                error = %e,
                "failed to parse Cargo manifest"
            );
            return None;
        }
    };
    Some(manifest.package?.name.replace('-', "_"))
}
