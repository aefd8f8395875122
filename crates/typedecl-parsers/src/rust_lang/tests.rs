use super::*;
use crate::frontend::{DeclarationKind, Scope};
use std::fs;
use std::path::PathBuf;

fn parse(source: &str) -> LoadedModule {
    RustFrontend::new()
        .parse_module(Path::new("fixtures/full/mod.rs"), "full", source)
        .unwrap()
}

fn decl<'a>(module: &'a LoadedModule, name: &str) -> &'a ValueDeclaration {
    module
        .declarations
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| panic!("declaration {name} not found"))
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_local_type_is_qualified_with_module() {
    let module = parse(
        r#"
pub type Flag = &'static str;
pub const DEPLOY: Flag = "deploy";
pub static ALL: [Flag; 1] = [DEPLOY];
"#,
    );
    assert_eq!(module.qualified_name, "full");
    assert_eq!(
        decl(&module, "DEPLOY").resolved_type,
        Some(ResolvedType::Named("full::Flag".into()))
    );
    let all = decl(&module, "ALL").resolved_type.clone().unwrap();
    assert!(all.is_sequence());
    assert_eq!(all.qualified_name(), "[full::Flag]");
}

#[test]
fn test_imported_and_foreign_types() {
    let module = parse(
        r#"
use crate::levels::Level;
use std::borrow::Cow;
const LOW: Level = Level("low");
const TEXT: &'static str = "text";
const NAME: Cow<'static, str> = Cow::Borrowed("name");
fn build() {
    let untyped = 5;
}
"#,
    );
    assert_eq!(
        decl(&module, "LOW").resolved_type,
        Some(ResolvedType::Named("full::levels::Level".into()))
    );
    assert_eq!(
        decl(&module, "TEXT").resolved_type,
        Some(ResolvedType::Other("&'static str".into()))
    );
    assert_eq!(
        decl(&module, "NAME").resolved_type,
        Some(ResolvedType::Named("std::borrow::Cow".into()))
    );
    assert_eq!(decl(&module, "untyped").resolved_type, None);
    assert_eq!(decl(&module, "untyped").kind, DeclarationKind::Let);
}

#[test]
fn test_local_structs_are_collected_for_initializers() {
    let module = parse(
        r#"
pub struct FlagStruct {
    #[typedecl(identifier)]
    pub name: &'static str,
    pub default_on: bool,
}
pub struct Level(pub &'static str);
pub struct Unused { a: u8 }

pub static FLAG: FlagStruct = FlagStruct { name: "flag", default_on: true };
pub const LOW: Level = Level("low");
pub const MADE: Level = make_level();
"#,
    );
    let flag = module.struct_definition("FlagStruct").unwrap();
    assert_eq!(flag.qualified_name, "full::FlagStruct");
    assert!(flag.fields[0].attributes[0].has_argument("typedecl", "identifier"));

    let level = module.struct_definition("Level").unwrap();
    assert!(level.is_newtype());

    assert!(module.struct_definition("Unused").is_none());
    assert!(module.struct_definition("make_level").is_none());
}

#[test]
fn test_lifetime_parameterised_struct_is_qualified() {
    let module = parse(
        r#"
pub struct Feature<'a> {
    #[typedecl(identifier)]
    pub name: &'a str,
}
pub const CHECKOUT: Feature<'static> = Feature { name: "checkout" };
"#,
    );
    assert_eq!(
        decl(&module, "CHECKOUT").resolved_type,
        Some(ResolvedType::Named("full::Feature".into()))
    );
    let feature = module.struct_definition("Feature").unwrap();
    assert_eq!(feature.qualified_name, "full::Feature");
    assert_eq!(feature.fields[0].name, "name");
}

#[test]
fn test_nested_declarations_keep_scopes() {
    let module = parse(
        r#"
pub type Flag = &'static str;
impl Holder {
    const ASSOC: Flag = "assoc";
}
"#,
    );
    assert_eq!(decl(&module, "ASSOC").scopes, vec![Scope::Impl, Scope::File]);
}

#[test]
fn test_load_follows_imported_struct() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("imported");
    write(
        &dir.join("mod.rs"),
        r#"
mod kinds;
use self::kinds::Kind;

pub const FIRST: Kind = Kind { id: "first", weight: 1 };
"#,
    );
    write(
        &dir.join("kinds.rs"),
        r#"
pub struct Kind {
    #[typedecl(identifier)]
    pub id: &'static str,
    pub weight: u8,
}
"#,
    );

    let module = RustFrontend::new().load(&dir).unwrap();
    assert_eq!(module.path, dir.join("mod.rs"));
    assert_eq!(module.qualified_name, "imported");
    assert_eq!(
        decl(&module, "FIRST").resolved_type,
        Some(ResolvedType::Named("imported::kinds::Kind".into()))
    );
    let kind = module.struct_definition("Kind").unwrap();
    assert_eq!(kind.qualified_name, "imported::kinds::Kind");
    assert_eq!(kind.fields[0].name, "id");

    let without = RustFrontend::new()
        .with_follow_imports(false)
        .load(&dir)
        .unwrap();
    assert!(without.struct_definition("Kind").is_none());
}

#[test]
fn test_load_crate_module() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(
        &root.join("Cargo.toml"),
        "[package]\nname = \"flag-crate\"\nversion = \"0.1.0\"\n",
    );
    write(&root.join("src/lib.rs"), "pub mod feature;\npub mod levels;\n");
    write(
        &root.join("src/levels.rs"),
        "pub struct Level {\n    #[typedecl(identifier)]\n    pub name: &'static str,\n}\n",
    );
    write(
        &root.join("src/feature.rs"),
        r#"
use crate::levels::Level;
pub type Flag = &'static str;
pub const ON: Flag = "on";
pub const HIGH: Level = Level { name: "high" };
"#,
    );

    let module = RustFrontend::new().load(&root.join("src/feature.rs")).unwrap();
    assert_eq!(module.qualified_name, "flag_crate::feature");
    assert_eq!(
        decl(&module, "ON").resolved_type,
        Some(ResolvedType::Named("flag_crate::feature::Flag".into()))
    );
    let level = module.struct_definition("Level").unwrap();
    assert_eq!(level.qualified_name, "flag_crate::levels::Level");

    let lib = RustFrontend::new().load(root).unwrap();
    assert_eq!(lib.path, root.join("src/lib.rs"));
    assert_eq!(lib.qualified_name, "flag_crate");
}

#[test]
fn test_load_missing_module() {
    let err = RustFrontend::new()
        .load(&PathBuf::from("definitely/not/here"))
        .unwrap_err();
    assert!(matches!(err, ScanError::ModuleLoad { .. }));
    assert!(err.to_string().contains("definitely/not/here"));
}
