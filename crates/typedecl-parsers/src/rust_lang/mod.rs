mod helpers;
pub mod mod_resolution;

use std::collections::HashMap;
use std::path::Path;

use typedecl_core::ScanError;

use crate::frontend::{
    Initializer, LoadedModule, ModuleLoader, ResolvedType, StructDefinition, ValueDeclaration,
};
use crate::treesitter::{SyntaxModule, TreeSitterParser, TypeDefinition, TypeExpr, TypeKind};
pub use helpers::{crate_name, expand_use, ModuleScope};
use mod_resolution::{locate_module, module_file_for_path, qualified_module_name};

/// Tree-sitter front end for Rust modules.
///
/// Each load parses with a fresh parser, so one frontend can serve any
/// number of scans.
#[derive(Debug, Clone)]
pub struct RustFrontend {
    follow_imports: bool,
}

impl Default for RustFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl RustFrontend {
    pub fn new() -> Self {
        RustFrontend {
            follow_imports: true,
        }
    }

    /// Whether struct definitions brought in with `use` are looked up in
    /// the files that define them.
    pub fn with_follow_imports(mut self, follow: bool) -> Self {
        self.follow_imports = follow;
        self
    }

    /// Describe `source` as the module `qualified_name` stored at `path`.
    ///
    /// `path` is only used to follow imports and for error messages.
    pub fn parse_module(
        &self,
        path: &Path,
        qualified_name: &str,
        source: &str,
    ) -> Result<LoadedModule, ScanError> {
        let syntax = extract(path, source)?;
        if syntax.has_errors {
            tracing::warn!(
                path = %path.display(),
                "syntax errors in scanned module, declarations may be missing"
            );
        }

        let scope = module_scope(qualified_name, &syntax);
        let declarations: Vec<ValueDeclaration> = syntax
            .declarations
            .iter()
            .map(|raw| ValueDeclaration {
                name: raw.name.clone(),
                kind: raw.kind,
                line: raw.line,
                resolved_type: raw.ty.as_ref().map(|t| resolve_type(t, &scope)),
                scopes: raw.scopes.clone(),
                initializer: raw.initializer.clone(),
            })
            .collect();

        let mut structs = HashMap::new();
        let mut imported: HashMap<String, Option<SyntaxModule>> = HashMap::new();
        for decl in &declarations {
            let type_path = match &decl.initializer {
                Some(Initializer::Struct { type_path, .. }) => type_path,
                Some(Initializer::Call { callee, .. }) => callee,
                _ => continue,
            };
            if structs.contains_key(type_path) {
                continue;
            }
            let found =
                self.find_struct(path, &syntax, &scope, type_path, &mut imported);
            if let Some(def) = found {
                structs.insert(type_path.clone(), def);
            }
        }

        tracing::debug!(
            path = %path.display(),
            module = qualified_name,
            declarations = declarations.len(),
            structs = structs.len(),
            "loaded module"
        );

        Ok(LoadedModule {
            path: path.to_path_buf(),
            qualified_name: qualified_name.to_string(),
            declarations,
            structs,
        })
    }

    /// Look up the struct named by `type_path` in this module, or in the
    /// module it is imported from.
    fn find_struct(
        &self,
        path: &Path,
        syntax: &SyntaxModule,
        scope: &ModuleScope,
        type_path: &str,
        imported: &mut HashMap<String, Option<SyntaxModule>>,
    ) -> Option<StructDefinition> {
        if !type_path.contains("::") {
            if let Some(def) = syntax.find_struct(type_path) {
                return Some(struct_definition(def, &scope.module));
            }
        }
        if !self.follow_imports {
            return None;
        }

        let absolute = scope.resolve(type_path);
        let (module, name) = absolute.rsplit_once("::")?;
        if module == scope.module {
            return syntax
                .find_struct(name)
                .map(|def| struct_definition(def, module));
        }

        let other = imported.entry(module.to_string()).or_insert_with(|| {
            let file = module_file_for_path(path, &scope.module, module)?;
            let source = std::fs::read_to_string(&file).ok()?;
            tracing::debug!(path = %file.display(), module, "following import");
            extract(&file, &source).ok()
        });
        other
            .as_ref()?
            .find_struct(name)
            .map(|def| struct_definition(def, module))
    }
}

impl ModuleLoader for RustFrontend {
    fn load(&self, module_path: &Path) -> Result<LoadedModule, ScanError> {
        let file = locate_module(module_path)
            .ok_or_else(|| ScanError::module_load(module_path, "no Rust module at this path"))?;
        let source =
            std::fs::read_to_string(&file).map_err(|e| ScanError::module_load(&file, e))?;
        let qualified_name = qualified_module_name(&file);
        self.parse_module(&file, &qualified_name, &source)
    }
}

fn extract(path: &Path, source: &str) -> Result<SyntaxModule, ScanError> {
    TreeSitterParser::new()
        .and_then(|mut parser| parser.extract(source))
        .map_err(|e| ScanError::module_load(path, e))
}

fn module_scope(qualified_name: &str, syntax: &SyntaxModule) -> ModuleScope {
    ModuleScope::new(
        qualified_name,
        syntax.types.iter().map(|t| t.name.clone()).collect(),
        syntax.mods.clone(),
        &syntax.uses,
    )
}

fn resolve_type(ty: &TypeExpr, scope: &ModuleScope) -> ResolvedType {
    match ty {
        TypeExpr::Path(path) => ResolvedType::Named(scope.resolve(path)),
        TypeExpr::Sequence(elem) => ResolvedType::Sequence(Box::new(resolve_type(elem, scope))),
        TypeExpr::Other(text) => ResolvedType::Other(text.clone()),
    }
}

fn struct_definition(def: &TypeDefinition, module: &str) -> StructDefinition {
    debug_assert_eq!(def.kind, TypeKind::Struct);
    StructDefinition {
        name: def.name.clone(),
        qualified_name: format!("{module}::{}", def.name),
        fields: def.fields.clone(),
        tuple_fields: def.tuple_fields,
    }
}

#[cfg(test)]
mod tests;
