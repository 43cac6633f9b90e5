use super::*;
use heritage_common::Position;

#[test]
fn test_outline_class_with_members() {
    let text = "export abstract class Base {\n  abstract doIt(): void;\n  private count = 0;\n  run() {\n    return 1;\n  }\n}\n";
    let symbols = outline(text);

    assert_eq!(symbols.len(), 1);
    let base = &symbols[0];
    assert_eq!(base.name, "Base");
    assert_eq!(base.kind, SymbolKind::Class);
    assert_eq!(base.range.start, Position::new(0, 0));
    assert_eq!(base.range.end, Position::new(6, 1));
    assert_eq!(base.selection_range.start, Position::new(0, 22));

    let members: Vec<(&str, SymbolKind)> = base
        .children
        .iter()
        .map(|child| (child.name.as_str(), child.kind))
        .collect();
    assert_eq!(
        members,
        vec![
            ("doIt", SymbolKind::Method),
            ("count", SymbolKind::Property),
            ("run", SymbolKind::Method),
        ]
    );

    let run = &base.children[2];
    assert_eq!(run.range.start, Position::new(3, 2));
    assert_eq!(run.range.end, Position::new(5, 3));
}

#[test]
fn test_outline_member_range_includes_modifiers() {
    let text = "class A {\n  protected static make(): A;\n}\n";
    let symbols = outline(text);
    let make = &symbols[0].children[0];

    assert_eq!(make.name, "make");
    assert_eq!(make.range.start, Position::new(1, 2));
    assert_eq!(make.selection_range.start, Position::new(1, 19));
}

#[test]
fn test_outline_interfaces_and_constructor() {
    let text = "interface Shape {\n  area(): number;\n  name?: string\n}\n\nclass Square implements Shape {\n  constructor(side: number) {}\n  area() { return 1; }\n}\n";
    let symbols = outline(text);

    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols[0].kind, SymbolKind::Interface);
    assert_eq!(symbols[0].children.len(), 2);
    assert_eq!(symbols[0].children[1].name, "name");
    assert_eq!(symbols[0].children[1].kind, SymbolKind::Property);

    assert_eq!(symbols[1].name, "Square");
    assert_eq!(symbols[1].children[0].kind, SymbolKind::Constructor);
    assert_eq!(symbols[1].children[1].name, "area");
}

#[test]
fn test_outline_ignores_other_statements() {
    let text = "const x = 1;\nfunction f() {\n  class Inner {}\n}\n";
    assert!(outline(text).is_empty());
}

#[test]
fn test_fixture_sets_language_from_extension() {
    let snapshot = Fixture::new()
        .file("file:///a.ts", "class A {\n}\n")
        .file("file:///b.js", "class B {\n}\n")
        .file("file:///c.txt", "class C {\n}\n")
        .snapshot();

    let languages: Vec<Option<&str>> = snapshot
        .documents
        .iter()
        .map(|document| document.language_id.as_deref())
        .collect();
    assert_eq!(languages, vec![Some("typescript"), Some("javascript"), None]);
}

#[test]
fn test_fixture_links_heritage_names() {
    let snapshot = Fixture::new()
        .file("file:///base.ts", "class Base {\n}\n")
        .file("file:///derived.ts", "class Derived extends Base {\n}\n")
        .snapshot();

    assert_eq!(snapshot.definitions.len(), 1);
    let link = &snapshot.definitions[0];
    assert_eq!(link.uri, "file:///derived.ts");
    assert_eq!(
        link.range,
        Range::new(Position::new(0, 22), Position::new(0, 26))
    );
    assert_eq!(link.targets.len(), 1);
    assert_eq!(link.targets[0].uri, "file:///base.ts");
    assert_eq!(link.targets[0].range.start, Position::new(0, 0));
}

#[test]
fn test_fixture_prefers_local_declarations() {
    let snapshot = Fixture::new()
        .file("file:///other.ts", "class Base {\n}\n")
        .file(
            "file:///main.ts",
            "class Base {\n}\nclass Derived extends Base {\n}\n",
        )
        .snapshot();

    let link = snapshot
        .definitions
        .iter()
        .find(|link| link.uri == "file:///main.ts")
        .expect("link in main.ts");
    assert_eq!(link.targets.len(), 1);
    assert_eq!(link.targets[0].uri, "file:///main.ts");
}

#[test]
fn test_fixture_does_not_link_declaration_name() {
    let snapshot = Fixture::new()
        .file("file:///a.ts", "class A {\n}\n")
        .snapshot();
    assert!(snapshot.definitions.is_empty());
}
