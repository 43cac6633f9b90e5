use super::*;
use crate::fixture::Fixture;
use crate::workspace::{DefinitionLink, InMemoryWorkspace};
use heritage_common::SymbolKind;

const SHAPES: &str = "interface Shape {\n  area(): number;\n}\n\nclass Square implements Shape {\n  area() { return 1; }\n}\n";

fn resolver(workspace: InMemoryWorkspace) -> DeclarationResolver {
    DeclarationResolver::new(Arc::new(workspace))
}

#[tokio::test]
async fn test_definitions_at_resolves_heritage_reference() {
    let resolver = resolver(Fixture::new().file("file:///shapes.ts", SHAPES).build());

    // `Shape` in `class Square implements Shape {`
    let found = resolver
        .definitions_at("file:///shapes.ts", Position::new(4, 25))
        .await
        .expect("lookup");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Shape");
    assert_eq!(found[0].kind, SymbolKind::Interface);
    assert_eq!(found[0].members[0].name, "area");
}

#[tokio::test]
async fn test_definitions_at_without_definition_is_empty() {
    let resolver = resolver(Fixture::new().file("file:///shapes.ts", SHAPES).build());

    let found = resolver
        .definitions_at("file:///shapes.ts", Position::new(1, 3))
        .await
        .expect("lookup");
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_definitions_at_skips_unlisted_targets() {
    let mut workspace = Fixture::new().file("file:///shapes.ts", SHAPES).build();
    workspace.add_definition(DefinitionLink {
        uri: "file:///shapes.ts".to_string(),
        range: Range::new(Position::new(1, 2), Position::new(1, 6)),
        targets: vec![Location::new(
            "file:///lib.d.ts",
            Range::new(Position::new(10, 0), Position::new(12, 1)),
        )],
    });
    let resolver = resolver(workspace);

    let found = resolver
        .definitions_at("file:///shapes.ts", Position::new(1, 3))
        .await
        .expect("lookup");
    assert!(found.is_empty());
}

/// Reports every document as holding one function and one class, both
/// spanning the same range.
struct FunctionAndClass;

#[async_trait]
impl LanguageServices for FunctionAndClass {
    async fn list_type_declarations(&self, uri: &str) -> Result<Vec<DeclarationRef>, ServiceError> {
        let range = Range::new(Position::new(0, 0), Position::new(0, 10));
        let declaration = |name: &str, kind| DeclarationRef {
            name: name.to_string(),
            kind,
            uri: uri.to_string(),
            range,
            text: String::new(),
            members: Vec::new(),
        };
        Ok(vec![
            declaration("make", SymbolKind::Function),
            declaration("Made", SymbolKind::Class),
        ])
    }

    async fn resolve_definitions(
        &self,
        uri: &str,
        _position: Position,
    ) -> Result<Vec<Location>, ServiceError> {
        Ok(vec![Location::new(
            uri,
            Range::new(Position::new(0, 0), Position::new(0, 10)),
        )])
    }

    async fn find_declaration_at(
        &self,
        uri: &str,
        range: Range,
    ) -> Result<Option<DeclarationRef>, ServiceError> {
        let declarations = self.list_type_declarations(uri).await?;
        Ok(declarations.into_iter().find(|d| d.range == range))
    }
}

#[tokio::test]
async fn test_definitions_at_skips_non_type_targets() {
    let resolver = DeclarationResolver::new(Arc::new(FunctionAndClass));

    let found = resolver
        .definitions_at("file:///a.ts", Position::new(0, 0))
        .await
        .expect("lookup");
    assert!(found.is_empty());
}

struct Unavailable;

#[async_trait]
impl LanguageServices for Unavailable {
    async fn list_type_declarations(&self, uri: &str) -> Result<Vec<DeclarationRef>, ServiceError> {
        Err(ServiceError::new("listTypeDeclarations", uri, "server not running"))
    }

    async fn resolve_definitions(
        &self,
        uri: &str,
        _position: Position,
    ) -> Result<Vec<Location>, ServiceError> {
        Err(ServiceError::new("resolveDefinitions", uri, "server not running"))
    }
}

#[tokio::test]
async fn test_definitions_at_propagates_service_errors() {
    let resolver = DeclarationResolver::new(Arc::new(Unavailable));

    let err = resolver
        .definitions_at("file:///a.ts", Position::new(0, 0))
        .await
        .expect_err("service is down");
    assert_eq!(err.operation, "resolveDefinitions");
    assert_eq!(err.uri, "file:///a.ts");
    assert_eq!(
        err.to_string(),
        "resolveDefinitions failed for file:///a.ts: server not running"
    );
}

#[tokio::test]
async fn test_default_find_declaration_at_lists_document() {
    let workspace = Fixture::new().file("file:///shapes.ts", SHAPES).build();
    let square = workspace
        .declaration("file:///shapes.ts", "Square")
        .expect("Square");

    let found = workspace
        .find_declaration_at("file:///shapes.ts", square.range)
        .await
        .expect("lookup");
    assert_eq!(found.map(|d| d.name), Some("Square".to_string()));
    assert_eq!(workspace.stats().symbol_listings, 1);
    assert_eq!(workspace.language_id("file:///shapes.ts").as_deref(), Some("typescript"));
}

#[test]
fn test_language_id_defaults_to_unknown() {
    assert_eq!(Unavailable.language_id("file:///a.ts"), None);
}

#[tokio::test]
async fn test_target_lookups_are_memoized_until_cleared() {
    let workspace = Arc::new(Fixture::new().file("file:///shapes.ts", SHAPES).build());
    let resolver = DeclarationResolver::new(workspace.clone());

    for character in [24, 26, 28] {
        let found = resolver
            .definitions_at("file:///shapes.ts", Position::new(4, character))
            .await
            .expect("lookup");
        assert_eq!(found.len(), 1);
    }
    assert_eq!(workspace.stats().definition_lookups, 3);
    assert_eq!(workspace.stats().symbol_listings, 1);

    resolver.clear();
    resolver
        .definitions_at("file:///shapes.ts", Position::new(4, 24))
        .await
        .expect("lookup");
    assert_eq!(workspace.stats().symbol_listings, 2);
}

#[tokio::test]
async fn test_failed_target_lookup_is_retried() {
    let resolver = DeclarationResolver::new(Arc::new(FlakyListing::default()));

    let first = resolver
        .definitions_at("file:///a.ts", Position::new(0, 0))
        .await;
    assert!(first.is_err());

    let second = resolver
        .definitions_at("file:///a.ts", Position::new(0, 0))
        .await
        .expect("second attempt");
    assert_eq!(second.len(), 1);
}

/// Fails the first symbol listing, then reports one class.
#[derive(Default)]
struct FlakyListing {
    listings: std::sync::atomic::AtomicUsize,
}

#[async_trait]
impl LanguageServices for FlakyListing {
    async fn list_type_declarations(&self, uri: &str) -> Result<Vec<DeclarationRef>, ServiceError> {
        let attempt = self
            .listings
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if attempt == 0 {
            return Err(ServiceError::new("listTypeDeclarations", uri, "busy"));
        }
        Ok(vec![DeclarationRef {
            name: "A".to_string(),
            kind: SymbolKind::Class,
            uri: uri.to_string(),
            range: Range::new(Position::new(0, 0), Position::new(1, 1)),
            text: "class A {\n}".to_string(),
            members: Vec::new(),
        }])
    }

    async fn resolve_definitions(
        &self,
        uri: &str,
        _position: Position,
    ) -> Result<Vec<Location>, ServiceError> {
        Ok(vec![Location::new(
            uri,
            Range::new(Position::new(0, 0), Position::new(1, 1)),
        )])
    }
}
