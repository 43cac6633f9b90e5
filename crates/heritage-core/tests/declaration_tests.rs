use super::*;
use heritage_common::Position;

const SOURCE: &str = "abstract class Base {\n  abstract doIt(): void;\n  run() {}\n}\n";

fn base_symbol() -> DocumentSymbol {
    let mut symbol = DocumentSymbol::new(
        "Base",
        SymbolKind::Class,
        Range::new(Position::new(0, 0), Position::new(3, 1)),
    );
    symbol.add_child(DocumentSymbol::new(
        "doIt",
        SymbolKind::Method,
        Range::new(Position::new(1, 2), Position::new(1, 24)),
    ));
    symbol.add_child(DocumentSymbol::new(
        "run",
        SymbolKind::Method,
        Range::new(Position::new(2, 2), Position::new(2, 10)),
    ));
    symbol
}

fn base() -> DeclarationRef {
    let line_map = LineMap::build(SOURCE);
    DeclarationRef::from_document_symbol("file:///base.ts", &base_symbol(), SOURCE, &line_map)
}

#[test]
fn test_from_document_symbol_slices_text() {
    let decl = base();

    assert_eq!(decl.name, "Base");
    assert!(decl.text.starts_with("abstract class Base {"));
    assert!(decl.text.ends_with('}'));
    assert_eq!(decl.members.len(), 2);
    assert_eq!(decl.members[0].text, "abstract doIt(): void;");
    assert_eq!(decl.members[1].text, "run() {}");
    assert_eq!(decl.members[1].uri, "file:///base.ts");
}

#[test]
fn test_key_is_stable_across_refetch() {
    assert_eq!(base().key(), base().key());
}

#[test]
fn test_key_differs_by_range() {
    let mut moved = base();
    moved.range = Range::new(Position::new(10, 0), Position::new(13, 1));

    assert_ne!(base().key(), moved.key());
}

#[test]
fn test_declaration_kind_rejects_non_types() {
    let mut decl = base();
    assert_eq!(decl.declaration_kind(), Ok(DeclarationKind::Class));

    decl.kind = SymbolKind::Function;
    let err = decl.declaration_kind().unwrap_err();
    assert_eq!(
        err,
        ResolveError::InvalidDeclarationKind {
            name: "Base".to_string(),
            kind: SymbolKind::Function,
        }
    );
    assert_eq!(err.to_string(), "`Base` is a function, expected a class or interface");
}

#[test]
fn test_member_lookup_uses_first_match() {
    let mut decl = base();
    let mut overload = decl.members[1].clone();
    overload.text = "run(x: number) {}".to_string();
    decl.members.push(overload);

    assert_eq!(decl.member("run").unwrap().text, "run() {}");
    assert!(decl.member("missing").is_none());
}

#[test]
fn test_has_modifier_requires_trailing_whitespace() {
    let decl = base();

    assert!(decl.members[0].has_modifier("abstract"));
    assert!(!decl.members[1].has_modifier("abstract"));

    let mut member = decl.members[1].clone();
    member.text = "abstractly() {}".to_string();
    assert!(!member.has_modifier("abstract"));

    member.text = "nonabstract run() {}".to_string();
    assert!(!member.has_modifier("abstract"));

    member.text = "protected abstract\n  run(): void;".to_string();
    assert!(member.has_modifier("abstract"));
}

#[test]
fn test_symbol_key_display() {
    let key = base().key();
    assert_eq!(key.to_string(), "class Base (file:///base.ts:1:1)");
}
