//! External language services and the declaration resolver adapter.
//!
//! The resolver never reads the file system or parses source. Everything it
//! knows about a workspace comes through [`LanguageServices`]: a
//! document-symbol listing and a go-to-definition lookup, as a language
//! server would provide them.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use futures::future::try_join_all;
use heritage_common::{Location, Position, Range};
use rustc_hash::FxHashMap;
use tokio::sync::OnceCell;
use tracing::{debug, trace};

use crate::declaration::DeclarationRef;
use crate::error::ServiceError;

/// The services the hierarchy resolver consumes.
///
/// `#[async_trait]` keeps the trait object safe so the builder can hold an
/// `Arc<dyn LanguageServices>`.
#[async_trait]
pub trait LanguageServices: Send + Sync {
    /// Class and interface declarations of a document, with their members.
    async fn list_type_declarations(&self, uri: &str) -> Result<Vec<DeclarationRef>, ServiceError>;

    /// Definition targets of whatever is written at `position`.
    async fn resolve_definitions(
        &self,
        uri: &str,
        position: Position,
    ) -> Result<Vec<Location>, ServiceError>;

    /// The declaration of `uri` whose range is exactly `range`.
    async fn find_declaration_at(
        &self,
        uri: &str,
        range: Range,
    ) -> Result<Option<DeclarationRef>, ServiceError> {
        let declarations = self.list_type_declarations(uri).await?;
        Ok(declarations
            .into_iter()
            .find(|declaration| declaration.range == range))
    }

    /// Language identifier of a document (`typescript`, `javascript`, ...),
    /// when known.
    fn language_id(&self, _uri: &str) -> Option<String> {
        None
    }
}

type TargetCell = Arc<OnceCell<Option<DeclarationRef>>>;

/// Turns a reference position into the declarations it refers to.
///
/// Target lookups are memoized per definition location until
/// [`clear`](Self::clear), so the symbol service sees each target at most
/// once per pass. Concurrent lookups of one location share a single call;
/// failed lookups are retried.
pub struct DeclarationResolver {
    services: Arc<dyn LanguageServices>,
    targets: Mutex<FxHashMap<Location, TargetCell>>,
}

impl DeclarationResolver {
    pub fn new(services: Arc<dyn LanguageServices>) -> Self {
        Self {
            services,
            targets: Mutex::default(),
        }
    }

    pub fn services(&self) -> &Arc<dyn LanguageServices> {
        &self.services
    }

    /// Forget memoized target lookups.
    pub fn clear(&self) {
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    async fn declaration_at(
        &self,
        location: &Location,
    ) -> Result<Option<DeclarationRef>, ServiceError> {
        let cell = Arc::clone(
            self.targets
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(location.clone())
                .or_default(),
        );
        let found = cell
            .get_or_try_init(|| {
                self.services
                    .find_declaration_at(&location.uri, location.range)
            })
            .await?;
        Ok(found.clone())
    }

    /// Class and interface declarations targeted by the reference at
    /// `position`.
    ///
    /// A position without a definition, or whose definition matches no
    /// listed declaration (a library without a symbol listing, say), yields
    /// an empty list. Targets that are neither classes nor interfaces are
    /// skipped.
    pub async fn definitions_at(
        &self,
        uri: &str,
        position: Position,
    ) -> Result<Vec<DeclarationRef>, ServiceError> {
        let locations = self.services.resolve_definitions(uri, position).await?;
        trace!(
            uri,
            line = position.line,
            character = position.character,
            targets = locations.len(),
            "definitions_at"
        );

        let lookups = locations
            .iter()
            .map(|location| self.declaration_at(location));
        let found = try_join_all(lookups).await?;

        Ok(found
            .into_iter()
            .flatten()
            .filter(|declaration| {
                let keep = declaration.kind.is_class_or_interface();
                if !keep {
                    debug!(
                        name = %declaration.name,
                        kind = %declaration.kind,
                        "definitions_at: skipping non-type target"
                    );
                }
                keep
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "../tests/services_tests.rs"]
mod services_tests;
