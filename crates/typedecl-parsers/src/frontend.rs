use std::collections::HashMap;
use std::path::{Path, PathBuf};

use typedecl_core::ScanError;

/// The front end the scanner consumes: load a module and describe its value
/// declarations with resolved types and initializer expressions.
///
/// Implementors must be `Send + Sync`; separate loads share no mutable state.
pub trait ModuleLoader: Send + Sync {
    /// Load the module at `module_path` (a `.rs` file, a module directory,
    /// or a crate directory).
    fn load(&self, module_path: &Path) -> Result<LoadedModule, ScanError>;
}

/// Everything the scanner needs to know about one module.
#[derive(Debug, Clone, Default)]
pub struct LoadedModule {
    /// The source file that was parsed.
    pub path: PathBuf,
    /// Qualified module name, e.g. `my_crate::feature` or `full`.
    pub qualified_name: String,
    /// Every `const`, `static`, and `let` in the file, at any depth.
    pub declarations: Vec<ValueDeclaration>,
    /// Struct definitions keyed by the path used to name them in
    /// initializers (`FlagStruct`, `kinds::Kind`).
    pub structs: HashMap<String, StructDefinition>,
}

impl LoadedModule {
    pub fn struct_definition(&self, type_path: &str) -> Option<&StructDefinition> {
        self.structs.get(type_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Const,
    Static,
    Let,
}

/// A lexical scope enclosing a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The module's own file, always the outermost scope.
    File,
    Function,
    Closure,
    Block,
    Impl,
    Trait,
    /// An inline `mod name { ... }` block.
    Module,
    /// `extern` blocks and anything else that introduces items.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueDeclaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// 1-based line of the declaration.
    pub line: u32,
    pub resolved_type: Option<ResolvedType>,
    /// Enclosing scopes, innermost first; ends with [`Scope::File`].
    pub scopes: Vec<Scope>,
    pub initializer: Option<Initializer>,
}

/// A declared type after resolving `use` imports and module paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// A named type, e.g. `full::Flag`.
    Named(String),
    /// Arrays, slices, and `Vec`-like containers of an element type.
    Sequence(Box<ResolvedType>),
    /// Anything else, as written in source.
    Other(String),
}

impl ResolvedType {
    pub fn qualified_name(&self) -> String {
        match self {
            ResolvedType::Named(name) | ResolvedType::Other(name) => name.clone(),
            ResolvedType::Sequence(elem) => format!("[{}]", elem.qualified_name()),
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, ResolvedType::Sequence(_))
    }
}

/// The expression a declaration is initialized with.
#[derive(Debug, Clone, PartialEq)]
pub enum Initializer {
    /// Exact source text of a literal, quotes and escapes included.
    Literal(String),
    /// `Type { field: value, .. }`.
    Struct {
        type_path: String,
        fields: Vec<FieldValue>,
    },
    /// `callee(arg, ...)`, which covers tuple struct constructors.
    Call {
        callee: String,
        arguments: Vec<Initializer>,
    },
    /// Any other expression.
    Other { kind: String, text: String },
}

impl Initializer {
    pub fn kind(&self) -> &str {
        match self {
            Initializer::Literal(_) => "literal",
            Initializer::Struct { .. } => "struct_expression",
            Initializer::Call { .. } => "call_expression",
            Initializer::Other { kind, .. } => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub name: String,
    /// `None` for shorthand initializers (`Kind { name }`).
    pub value: Option<Initializer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDefinition {
    pub name: String,
    /// Qualified name of the struct, e.g. `imported::kinds::Kind`.
    pub qualified_name: String,
    /// Named fields; empty for tuple and unit structs.
    pub fields: Vec<FieldDefinition>,
    /// Number of positional fields for tuple structs.
    pub tuple_fields: usize,
}

impl StructDefinition {
    pub fn is_newtype(&self) -> bool {
        self.fields.is_empty() && self.tuple_fields == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

/// An outer attribute such as `#[typedecl(identifier)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// `typedecl`
    pub path: String,
    /// `["identifier"]`
    pub arguments: Vec<String>,
}

impl Attribute {
    /// Parse the inside of `#[...]`. Only list-style attributes keep their
    /// arguments; `#[path = "..."]` keeps the unquoted value.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Some(open) = text.find('(') {
            let close = text.rfind(')').unwrap_or(text.len());
            let inner = if open < close { &text[open + 1..close] } else { "" };
            return Self {
                path: text[..open].trim().to_string(),
                arguments: inner
                    .split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(str::to_string)
                    .collect(),
            };
        }
        if let Some((path, value)) = text.split_once('=') {
            return Self {
                path: path.trim().to_string(),
                arguments: vec![value.trim().trim_matches('"').to_string()],
            };
        }
        Self {
            path: text.to_string(),
            arguments: vec![],
        }
    }

    pub fn has_argument(&self, path: &str, argument: &str) -> bool {
        self.path == path && self.arguments.iter().any(|a| a == argument)
    }
}
