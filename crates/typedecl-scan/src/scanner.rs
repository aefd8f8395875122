//! Finds every top-level declaration of a type in a module.

use std::path::Path;

use typedecl_core::{Collection, Match, ScanConfig, ScanError, UnsupportedPolicy};
use typedecl_parsers::frontend::{
    FieldValue, Initializer, LoadedModule, ResolvedType, Scope, ValueDeclaration,
};
use typedecl_parsers::{ModuleLoader, RustFrontend};

const TAG: &str = "typedecl";
const IDENTIFIER: &str = "identifier";

/// Scans modules for declarations of a type.
///
/// ```ignore
/// let flags = Scanner::new().scan("src/feature", "feature::Flag")?;
/// ```
pub struct Scanner<L = RustFrontend> {
    loader: L,
    config: ScanConfig,
}

impl Default for Scanner<RustFrontend> {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner<RustFrontend> {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        let loader = RustFrontend::new().with_follow_imports(config.follow_imports);
        Scanner { loader, config }
    }
}

/// One accepted declaration, before the collection is assembled.
struct Found {
    matched: Match,
    type_name: String,
    field_name: Option<String>,
}

impl<L: ModuleLoader> Scanner<L> {
    pub fn with_loader(loader: L, config: ScanConfig) -> Self {
        Scanner { loader, config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Collect the top-level declarations in `module_path` whose type ends
    /// with `type_name` (`"feature::Flag"`, `"Flag"`, or `"feature.Flag"`).
    ///
    /// Matches are sorted by name. Finding nothing is not an error.
    ///
    /// # Panics
    ///
    /// On an initializer the scanner cannot turn into a value, unless the
    /// config's `unsupported` policy is [`UnsupportedPolicy::Error`].
    pub fn scan(
        &self,
        module_path: impl AsRef<Path>,
        type_name: &str,
    ) -> Result<Collection, ScanError> {
        let wanted = wanted_name(type_name);
        let module = self.loader.load(module_path.as_ref())?;

        let mut found = Vec::new();
        for decl in &module.declarations {
            let Some(ty) = &decl.resolved_type else {
                continue;
            };
            if !declared_name(ty).ends_with(&wanted) {
                continue;
            }
            if !is_top_level(decl) {
                tracing::debug!(name = %decl.name, line = decl.line, "skipping non top-level declaration");
                continue;
            }
            if ty.is_sequence() {
                tracing::debug!(name = %decl.name, line = decl.line, "skipping sequence declaration");
                continue;
            }

            let (value, field_name) = self.value_of(&module, decl)?;
            found.push(Found {
                matched: Match::new(decl.name.clone(), value),
                type_name: ty.qualified_name(),
                field_name,
            });
        }

        found.sort_by(|a, b| a.matched.name.cmp(&b.matched.name));
        Ok(assemble(&module, found))
    }

    /// Canonical value of an accepted declaration, plus the identifier
    /// field name for struct values.
    fn value_of(
        &self,
        module: &LoadedModule,
        decl: &ValueDeclaration,
    ) -> Result<(String, Option<String>), ScanError> {
        match &decl.initializer {
            Some(Initializer::Literal(text)) => Ok((text.clone(), None)),
            Some(Initializer::Struct { type_path, fields }) => {
                struct_value(module, decl, type_path, fields)
            }
            Some(Initializer::Call { callee, arguments }) => {
                let is_newtype = module
                    .struct_definition(callee)
                    .is_some_and(|def| def.is_newtype());
                match arguments.as_slice() {
                    [Initializer::Literal(text)] if is_newtype => Ok((text.clone(), None)),
                    _ => self.unsupported(decl, "call_expression", format!("{callee}(..)")),
                }
            }
            Some(Initializer::Other { kind, text }) => self.unsupported(decl, kind, text.clone()),
            None => self.unsupported(decl, "missing_initializer", decl.name.clone()),
        }
    }

    fn unsupported<T>(
        &self,
        decl: &ValueDeclaration,
        kind: &str,
        text: String,
    ) -> Result<T, ScanError> {
        let err = ScanError::UnsupportedDeclarationShape {
            declaration: decl.name.clone(),
            kind: kind.to_string(),
            text,
        };
        match self.config.unsupported {
            UnsupportedPolicy::Panic => panic!("{err}"),
            UnsupportedPolicy::Error => Err(err),
        }
    }
}

/// Find every top-level declaration of `type_name` in the module at
/// `module_path`.
///
/// Settings come from the nearest `typedecl.json` up to the module's crate
/// root (see [`ScanConfig::discover`]), or the defaults when there is none.
///
/// # Panics
///
/// On an initializer that cannot be turned into a value, unless the
/// discovered config says otherwise; see [`Scanner::scan`].
pub fn all(module_path: impl AsRef<Path>, type_name: &str) -> Result<Collection, ScanError> {
    let module_path = module_path.as_ref();
    Scanner::with_config(ScanConfig::discover(module_path)).scan(module_path, type_name)
}

/// `feature.Flag<'static>` and `feature::Flag` name the same type.
fn wanted_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.trim().replace('.', "::")
}

fn declared_name(ty: &ResolvedType) -> String {
    match ty {
        ResolvedType::Sequence(elem) => declared_name(elem),
        other => other.qualified_name(),
    }
}

fn is_top_level(decl: &ValueDeclaration) -> bool {
    matches!(decl.scopes.as_slice(), [Scope::File])
}

fn struct_value(
    module: &LoadedModule,
    decl: &ValueDeclaration,
    type_path: &str,
    fields: &[FieldValue],
) -> Result<(String, Option<String>), ScanError> {
    let def = module
        .struct_definition(type_path)
        .ok_or_else(|| ScanError::UnknownStructType {
            declaration: decl.name.clone(),
            type_name: type_path.to_string(),
        })?;

    let tagged: Vec<&str> = def
        .fields
        .iter()
        .filter(|f| f.attributes.iter().any(|a| a.has_argument(TAG, IDENTIFIER)))
        .map(|f| f.name.as_str())
        .collect();
    let field = match tagged.as_slice() {
        [field] => *field,
        [] => {
            return Err(ScanError::MissingIdentifierTag {
                type_name: def.qualified_name.clone(),
            })
        }
        _ => {
            return Err(ScanError::AmbiguousIdentifierTag {
                type_name: def.qualified_name.clone(),
                fields: tagged.iter().map(|f| f.to_string()).collect(),
            })
        }
    };

    let value = fields
        .iter()
        .find(|f| f.name == field)
        .and_then(|f| f.value.as_ref());
    match value {
        Some(Initializer::Literal(text)) => Ok((text.clone(), Some(field.to_string()))),
        _ => Err(ScanError::IdentifierValueNotLiteral {
            declaration: decl.name.clone(),
            field: field.to_string(),
        }),
    }
}

fn assemble(module: &LoadedModule, found: Vec<Found>) -> Collection {
    let Some(first) = found.first() else {
        return Collection::default();
    };
    let type_name = first.type_name.clone();
    let field_name = first.field_name.clone();

    if let Some(other) = found
        .iter()
        .find(|f| f.type_name != type_name || f.field_name != field_name)
    {
        tracing::warn!(
            module = %module.qualified_name,
            first = %type_name,
            other = %other.type_name,
            "declarations of different types matched, using the first"
        );
    }

    Collection {
        type_name,
        field_name,
        matches: found.into_iter().map(|f| f.matched).collect(),
    }
}
