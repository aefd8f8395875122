use std::path::PathBuf;

/// Errors that can occur while scanning a module for declarations.
///
/// Every variant aborts the scan; no partial [`Collection`](crate::Collection)
/// is returned alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to load module {}: {reason}", path.display())]
    ModuleLoad { path: PathBuf, reason: String },

    #[error("no struct field tagged with #[typedecl(identifier)] found on {type_name}")]
    MissingIdentifierTag { type_name: String },

    #[error("struct {type_name} has more than one field tagged with #[typedecl(identifier)]: {}", fields.join(", "))]
    AmbiguousIdentifierTag {
        type_name: String,
        fields: Vec<String>,
    },

    #[error("struct identifier value not a literal: {declaration}.{field}")]
    IdentifierValueNotLiteral { declaration: String, field: String },

    #[error("definition of struct {type_name} used by {declaration} not found")]
    UnknownStructType {
        declaration: String,
        type_name: String,
    },

    #[error("unsupported initializer for {declaration} ({kind}), please file a bug report with example code: `{text}`")]
    UnsupportedDeclarationShape {
        declaration: String,
        kind: String,
        text: String,
    },
}

impl ScanError {
    pub fn module_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ScanError::ModuleLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
