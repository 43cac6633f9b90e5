//! Type hierarchy resolver and override/implement classifier.
//!
//! Given the class and interface declarations of a document, the resolver
//! discovers each declaration's super class and super interfaces by scanning
//! its heritage clauses, resolves those references through external language
//! services, and classifies every member that re-declares a member of an
//! ancestor as an override or an implementation.
//!
//! - `scanner`: lexical heritage clause scanning
//! - `services`: external language services and the declaration resolver
//! - `cache`: pass-scoped, single-flight resolution cache
//! - `hierarchy`: hierarchy graph construction
//! - `classifier`: override/implement classification
//! - `pass`: one analysis pass over a document
//! - `workspace`: in-memory language services fed from a snapshot

pub mod cache;
pub mod classifier;
pub mod declaration;
pub mod error;
pub mod hierarchy;
pub mod pass;
pub mod scanner;
pub mod services;
pub mod workspace;

#[cfg(any(test, feature = "test-support"))]
pub mod fixture;

pub use cache::ResolutionCache;
pub use classifier::{Classification, ClassificationRecord, classify};
pub use declaration::{DeclarationKind, DeclarationRef, MemberRef, SymbolKey};
pub use error::{ResolveError, ServiceError};
pub use hierarchy::{HierarchyBuilder, HierarchyNode};
pub use pass::{AnalysisPass, DocumentAnalysis, RootAnalysis};
pub use scanner::{HeritageClauses, scan_heritage};
pub use services::{DeclarationResolver, LanguageServices};
pub use workspace::{DefinitionLink, InMemoryWorkspace, SnapshotDocument, WorkspaceSnapshot};
