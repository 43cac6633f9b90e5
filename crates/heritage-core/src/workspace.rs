//! In-memory language services.
//!
//! [`InMemoryWorkspace`] answers symbol listings and definition lookups from
//! a [`WorkspaceSnapshot`]: documents with their text and document-symbol
//! trees, plus the definition links a language server reported for them.
//! It backs the CLI and the test suites.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use heritage_common::{DocumentSymbol, LineMap, Location, Position, Range};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::declaration::DeclarationRef;
use crate::error::ServiceError;
use crate::services::LanguageServices;

/// Serialized form of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    #[serde(default)]
    pub documents: Vec<SnapshotDocument>,
    #[serde(default)]
    pub definitions: Vec<DefinitionLink>,
}

impl WorkspaceSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub symbols: Vec<DocumentSymbol>,
}

/// A reference range in `uri` and the locations it is defined at.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DefinitionLink {
    pub uri: String,
    pub range: Range,
    pub targets: Vec<Location>,
}

/// Counters of service calls, for cache diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceStats {
    pub symbol_listings: usize,
    pub definition_lookups: usize,
}

struct Document {
    language_id: Option<String>,
    declarations: Vec<DeclarationRef>,
}

/// Language services backed by a snapshot held in memory.
#[derive(Default)]
pub struct InMemoryWorkspace {
    documents: FxHashMap<String, Document>,
    /// Insertion order of `documents`.
    order: Vec<String>,
    definitions: Vec<DefinitionLink>,
    symbol_listings: AtomicUsize,
    definition_lookups: AtomicUsize,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: WorkspaceSnapshot) -> Self {
        let mut workspace = Self::new();
        for document in snapshot.documents {
            workspace.add_document(document);
        }
        for link in snapshot.definitions {
            workspace.add_definition(link);
        }
        workspace
    }

    /// Add (or replace) a document. Its class and interface declarations are
    /// flattened out of the symbol tree, looking through namespaces and
    /// modules.
    pub fn add_document(&mut self, document: SnapshotDocument) {
        let line_map = LineMap::build(&document.text);
        let mut declarations = Vec::new();
        collect_declarations(
            &document.uri,
            &document.symbols,
            &document.text,
            &line_map,
            &mut declarations,
        );

        if !self.documents.contains_key(&document.uri) {
            self.order.push(document.uri.clone());
        }
        self.documents.insert(
            document.uri,
            Document {
                language_id: document.language_id,
                declarations,
            },
        );
    }

    pub fn add_definition(&mut self, link: DefinitionLink) {
        self.definitions.push(link);
    }

    /// Document uris, in the order they were added.
    pub fn document_uris(&self) -> &[String] {
        &self.order
    }

    /// Declarations of a document, without counting a service call.
    pub fn declarations(&self, uri: &str) -> Vec<DeclarationRef> {
        self.documents
            .get(uri)
            .map(|document| document.declarations.clone())
            .unwrap_or_default()
    }

    /// First declaration of a document with the given name.
    pub fn declaration(&self, uri: &str, name: &str) -> Option<DeclarationRef> {
        self.documents
            .get(uri)?
            .declarations
            .iter()
            .find(|declaration| declaration.name == name)
            .cloned()
    }

    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            symbol_listings: self.symbol_listings.load(Ordering::SeqCst),
            definition_lookups: self.definition_lookups.load(Ordering::SeqCst),
        }
    }
}

fn collect_declarations(
    uri: &str,
    symbols: &[DocumentSymbol],
    source: &str,
    line_map: &LineMap,
    out: &mut Vec<DeclarationRef>,
) {
    for symbol in symbols {
        if symbol.kind.is_class_or_interface() {
            out.push(DeclarationRef::from_document_symbol(
                uri, symbol, source, line_map,
            ));
        } else if symbol.kind.is_container() {
            collect_declarations(uri, &symbol.children, source, line_map, out);
        }
    }
}

#[async_trait]
impl LanguageServices for InMemoryWorkspace {
    async fn list_type_declarations(&self, uri: &str) -> Result<Vec<DeclarationRef>, ServiceError> {
        self.symbol_listings.fetch_add(1, Ordering::SeqCst);
        trace!(uri, "list_type_declarations");
        Ok(self.declarations(uri))
    }

    async fn resolve_definitions(
        &self,
        uri: &str,
        position: Position,
    ) -> Result<Vec<Location>, ServiceError> {
        self.definition_lookups.fetch_add(1, Ordering::SeqCst);
        let targets: Vec<Location> = self
            .definitions
            .iter()
            .filter(|link| link.uri == uri && link.range.contains(position))
            .flat_map(|link| link.targets.iter().cloned())
            .collect();
        trace!(uri, targets = targets.len(), "resolve_definitions");
        Ok(targets)
    }

    fn language_id(&self, uri: &str) -> Option<String> {
        self.documents.get(uri)?.language_id.clone()
    }
}

#[cfg(test)]
#[path = "../tests/workspace_tests.rs"]
mod workspace_tests;
