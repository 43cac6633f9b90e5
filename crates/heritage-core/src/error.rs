//! Error types for hierarchy resolution.
//!
//! An unresolved reference is deliberately absent from this taxonomy: a
//! heritage clause whose target cannot be found simply contributes no
//! ancestor.

use heritage_common::SymbolKind;

use crate::declaration::SymbolKey;

/// Failure reported by one of the external language services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed for {uri}: {message}")]
pub struct ServiceError {
    /// The service operation that failed, e.g. `resolveDefinitions`.
    pub operation: &'static str,
    pub uri: String,
    pub message: String,
}

impl ServiceError {
    pub fn new(operation: &'static str, uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation,
            uri: uri.into(),
            message: message.into(),
        }
    }
}

/// Failure of a single `resolve` call.
///
/// Errors are `Clone` because one in-flight resolution publishes its result
/// to every requester that waited on the same key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Only classes and interfaces take part in a type hierarchy.
    #[error("`{name}` is a {kind}, expected a class or interface")]
    InvalidDeclarationKind { name: String, kind: SymbolKind },

    /// Following heritage clauses led back to a declaration that is still
    /// being resolved.
    #[error("cyclic type hierarchy: {}", cycle_names(.cycle))]
    CyclicHierarchy { cycle: Vec<SymbolKey> },

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The resolution owning this key was dropped before it published.
    #[error("resolution of `{name}` was abandoned before completing")]
    Abandoned { name: String },
}

fn cycle_names(cycle: &[SymbolKey]) -> String {
    cycle
        .iter()
        .map(|key| key.name.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
