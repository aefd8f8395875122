//! Syntax extraction from a tree-sitter parse of one Rust file.
//!
//! Produces owned, module-context-free data: declared types are kept as
//! written ([`TypeExpr`]) and are qualified later by
//! [`rust_lang`](crate::rust_lang).

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, QueryCursor, Tree};

use crate::frontend::{
    Attribute, DeclarationKind, FieldDefinition, FieldValue, Initializer, Scope,
};
use crate::queries;

/// Containers whose single type argument is their element type.
const SEQUENCE_TYPES: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashSet",
    "BTreeSet",
    "BinaryHeap",
];

const LITERAL_KINDS: &[&str] = &[
    "string_literal",
    "raw_string_literal",
    "char_literal",
    "integer_literal",
    "float_literal",
    "boolean_literal",
];

pub struct TreeSitterParser {
    parser: Parser,
    language: Language,
}

impl TreeSitterParser {
    pub fn new() -> Result<Self, ParseError> {
        let language: Language = tree_sitter_rust::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        Ok(Self { parser, language })
    }

    pub fn parse(&mut self, source: &[u8]) -> Result<Tree, ParseError> {
        self.parser.parse(source, None).ok_or(ParseError::ParseFailed)
    }

    /// Parse `source` and extract declarations, type definitions, `use`
    /// declarations, and child module names.
    pub fn extract(&mut self, source: &str) -> Result<SyntaxModule, ParseError> {
        let query = queries::declaration_query(&self.language).map_err(ParseError::Query)?;
        let tree = self.parse(source.as_bytes())?;
        let bytes = source.as_bytes();
        let root = tree.root_node();

        let mut module = SyntaxModule {
            has_errors: root.has_error(),
            ..SyntaxModule::default()
        };

        let mut cursor = QueryCursor::new();
        let capture_names = query.capture_names();
        let mut matches = cursor.matches(&query, root, bytes);

        while let Some(m) = matches.next() {
            let mut name = None;
            let mut decl = None;
            let mut type_def = None;

            for cap in m.captures {
                match capture_names[cap.index as usize] {
                    "decl.name" | "type.name" => name = Some(node_text(cap.node, bytes)),
                    "decl.const" => decl = Some((cap.node, DeclarationKind::Const)),
                    "decl.static" => decl = Some((cap.node, DeclarationKind::Static)),
                    "decl.let" => decl = Some((cap.node, DeclarationKind::Let)),
                    "type.struct" | "type.enum" | "type.alias" | "type.union" => {
                        type_def = Some(cap.node)
                    }
                    _ => {}
                }
            }

            let Some(name) = name else { continue };
            if let Some((node, kind)) = decl {
                module.declarations.push(extract_declaration(node, kind, name, bytes));
            } else if let Some(node) = type_def {
                if node.parent().map(|p| p.kind()) != Some("source_file") {
                    continue;
                }
                module.types.push(extract_type_definition(node, name, bytes));
            }
        }

        let mut walker = root.walk();
        for item in root.named_children(&mut walker) {
            match item.kind() {
                "use_declaration" => {
                    if let Some(arg) = item.child_by_field_name("argument") {
                        module.uses.push(node_text(arg, bytes).to_string());
                    }
                }
                "mod_item" => {
                    if let Some(n) = item.child_by_field_name("name") {
                        module.mods.push(node_text(n, bytes).to_string());
                    }
                }
                _ => {}
            }
        }

        Ok(module)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("language error: {0}")]
    Language(String),
    #[error("query error: {0}")]
    Query(String),
    #[error("parse failed")]
    ParseFailed,
}

/// Context-free syntax of one file.
#[derive(Debug, Clone, Default)]
pub struct SyntaxModule {
    pub declarations: Vec<RawDeclaration>,
    /// Top-level type definitions.
    pub types: Vec<TypeDefinition>,
    /// Arguments of top-level `use` declarations, as written.
    pub uses: Vec<String>,
    /// Names of top-level `mod` items.
    pub mods: Vec<String>,
    pub has_errors: bool,
}

impl SyntaxModule {
    pub fn find_struct(&self, name: &str) -> Option<&TypeDefinition> {
        self.types
            .iter()
            .find(|t| t.kind == TypeKind::Struct && t.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawDeclaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub line: u32,
    pub ty: Option<TypeExpr>,
    pub scopes: Vec<Scope>,
    pub initializer: Option<Initializer>,
}

/// A declared type as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Flag`, `feature::Flag`
    Path(String),
    Sequence(Box<TypeExpr>),
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Struct,
    Enum,
    Alias,
    Union,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    pub fields: Vec<FieldDefinition>,
    pub tuple_fields: usize,
}

fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn extract_declaration(
    node: Node<'_>,
    kind: DeclarationKind,
    name: &str,
    source: &[u8],
) -> RawDeclaration {
    RawDeclaration {
        name: name.to_string(),
        kind,
        line: node.start_position().row as u32 + 1,
        ty: node
            .child_by_field_name("type")
            .map(|t| type_expr(t, source)),
        scopes: enclosing_scopes(node),
        initializer: node
            .child_by_field_name("value")
            .map(|v| initializer(v, source)),
    }
}

/// Walk the ancestry of `node`, innermost scope first.
fn enclosing_scopes(node: Node<'_>) -> Vec<Scope> {
    let mut scopes = Vec::new();
    let mut current = node.parent();
    while let Some(n) = current {
        let scope = match n.kind() {
            "source_file" => Some(Scope::File),
            "function_item" => Some(Scope::Function),
            "closure_expression" => Some(Scope::Closure),
            "block" => Some(Scope::Block),
            "impl_item" => Some(Scope::Impl),
            "trait_item" => Some(Scope::Trait),
            "mod_item" => Some(Scope::Module),
            "foreign_mod_item" => Some(Scope::Other),
            _ => None,
        };
        scopes.extend(scope);
        current = n.parent();
    }
    scopes
}

fn type_expr(node: Node<'_>, source: &[u8]) -> TypeExpr {
    let text = || node_text(node, source).to_string();
    match node.kind() {
        "type_identifier" | "scoped_type_identifier" => TypeExpr::Path(normalize_path(&text())),
        "array_type" => match node.child_by_field_name("element") {
            Some(elem) => TypeExpr::Sequence(Box::new(type_expr(elem, source))),
            None => TypeExpr::Other(text()),
        },
        "reference_type" => match node.child_by_field_name("type").map(|t| type_expr(t, source)) {
            Some(seq @ TypeExpr::Sequence(_)) => seq,
            _ => TypeExpr::Other(text()),
        },
        "generic_type" => {
            let base = node
                .child_by_field_name("type")
                .map(|b| normalize_path(node_text(b, source)))
                .unwrap_or_default();
            let base_name = base.rsplit("::").next().unwrap_or(&base);
            let args: Vec<Node<'_>> = match node.child_by_field_name("type_arguments") {
                Some(list) => {
                    let mut walker = list.walk();
                    list.named_children(&mut walker)
                        .filter(|a| a.kind() != "lifetime")
                        .collect()
                }
                None => vec![],
            };
            if SEQUENCE_TYPES.contains(&base_name) && args.len() == 1 {
                TypeExpr::Sequence(Box::new(type_expr(args[0], source)))
            } else if base.is_empty() {
                TypeExpr::Other(text())
            } else {
                // `Feature<'static>` declares a `Feature`; arguments are dropped.
                TypeExpr::Path(base)
            }
        }
        _ => TypeExpr::Other(text()),
    }
}

/// `a :: b` → `a::b`, and drops a leading `::`.
pub fn normalize_path(path: &str) -> String {
    let compact: String = path.split_whitespace().collect::<Vec<_>>().join(" ");
    let compact = compact.replace(" ::", "::").replace(":: ", "::");
    compact.trim_start_matches("::").to_string()
}

fn initializer(node: Node<'_>, source: &[u8]) -> Initializer {
    let kind = node.kind();
    if LITERAL_KINDS.contains(&kind) {
        return Initializer::Literal(node_text(node, source).to_string());
    }
    match kind {
        "struct_expression" => {
            let type_path = node
                .child_by_field_name("name")
                .map(|n| normalize_path(node_text(n, source)))
                .unwrap_or_default();
            let mut fields = Vec::new();
            if let Some(body) = node.child_by_field_name("body") {
                let mut walker = body.walk();
                for child in body.named_children(&mut walker) {
                    match child.kind() {
                        "field_initializer" => {
                            let name = child
                                .child_by_field_name("field")
                                .map(|f| node_text(f, source).to_string())
                                .unwrap_or_default();
                            let value = child
                                .child_by_field_name("value")
                                .map(|v| initializer(v, source));
                            fields.push(FieldValue { name, value });
                        }
                        "shorthand_field_initializer" => fields.push(FieldValue {
                            name: node_text(child, source).to_string(),
                            value: None,
                        }),
                        _ => {}
                    }
                }
            }
            Initializer::Struct { type_path, fields }
        }
        "call_expression" => {
            let callee = node
                .child_by_field_name("function")
                .map(|f| normalize_path(node_text(f, source)))
                .unwrap_or_default();
            let mut arguments = Vec::new();
            if let Some(args) = node.child_by_field_name("arguments") {
                let mut walker = args.walk();
                for arg in args.named_children(&mut walker) {
                    if arg.kind() == "attribute_item" {
                        continue;
                    }
                    arguments.push(initializer(arg, source));
                }
            }
            Initializer::Call { callee, arguments }
        }
        _ => Initializer::Other {
            kind: kind.to_string(),
            text: node_text(node, source).to_string(),
        },
    }
}

fn extract_type_definition(node: Node<'_>, name: &str, source: &[u8]) -> TypeDefinition {
    let kind = match node.kind() {
        "struct_item" => TypeKind::Struct,
        "enum_item" => TypeKind::Enum,
        "union_item" => TypeKind::Union,
        _ => TypeKind::Alias,
    };
    let mut fields = Vec::new();
    let mut tuple_fields = 0;

    if kind == TypeKind::Struct {
        if let Some(body) = node.child_by_field_name("body") {
            let mut walker = body.walk();
            match body.kind() {
                "field_declaration_list" => {
                    // Attributes are siblings preceding the field they decorate.
                    let mut pending: Vec<Attribute> = Vec::new();
                    for child in body.named_children(&mut walker) {
                        match child.kind() {
                            "attribute_item" => pending.extend(attribute_of(child, source)),
                            "field_declaration" => {
                                let field_name = child
                                    .child_by_field_name("name")
                                    .map(|n| node_text(n, source).to_string())
                                    .unwrap_or_default();
                                fields.push(FieldDefinition {
                                    name: field_name,
                                    attributes: std::mem::take(&mut pending),
                                });
                            }
                            _ => {}
                        }
                    }
                }
                "ordered_field_declaration_list" => {
                    tuple_fields = body.children_by_field_name("type", &mut walker).count();
                }
                _ => {}
            }
        }
    }

    TypeDefinition {
        name: name.to_string(),
        kind,
        fields,
        tuple_fields,
    }
}

fn attribute_of(item: Node<'_>, source: &[u8]) -> Option<Attribute> {
    let mut walker = item.walk();
    let attr = item
        .named_children(&mut walker)
        .find(|c| c.kind() == "attribute")?;
    Some(Attribute::parse(node_text(attr, source)))
}
