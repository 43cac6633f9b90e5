//! Hierarchy graph construction.
//!
//! [`HierarchyBuilder::resolve`] turns a declaration into a [`HierarchyNode`]
//! whose super classes and super interfaces are themselves fully resolved.
//! Construction is eager and recursive: heritage clause positions come from
//! the scanner, their targets from the [`DeclarationResolver`], and every
//! target is resolved in turn through the pass-scoped [`ResolutionCache`].

use std::sync::Arc;

use futures::future::{BoxFuture, try_join_all};
use heritage_common::{LineMap, Position};
use tracing::{debug, trace};

use crate::cache::{Claim, ResolutionCache};
use crate::declaration::{DeclarationKind, DeclarationRef, MemberRef, SymbolKey};
use crate::error::ResolveError;
use crate::scanner::{position_of, scan_heritage};
use crate::services::{DeclarationResolver, LanguageServices};

/// One declaration in a resolved type hierarchy.
#[derive(Debug)]
pub struct HierarchyNode {
    pub declaration: DeclarationRef,
    /// The `extends` target of a class.
    pub super_classes: Vec<Arc<HierarchyNode>>,
    /// `implements` targets of a class, or `extends` targets of an interface.
    pub super_interfaces: Vec<Arc<HierarchyNode>>,
}

impl HierarchyNode {
    pub fn key(&self) -> SymbolKey {
        self.declaration.key()
    }

    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    pub fn members(&self) -> &[MemberRef] {
        &self.declaration.members
    }

    pub fn is_interface(&self) -> bool {
        self.declaration.is_interface()
    }

    /// Direct ancestors: super classes first, then super interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &Arc<HierarchyNode>> {
        self.super_classes.iter().chain(self.super_interfaces.iter())
    }
}

/// Builds hierarchy graphs for one analysis pass at a time.
pub struct HierarchyBuilder {
    resolver: DeclarationResolver,
    cache: ResolutionCache,
}

impl HierarchyBuilder {
    pub fn new(services: Arc<dyn LanguageServices>) -> Self {
        Self {
            resolver: DeclarationResolver::new(services),
            cache: ResolutionCache::new(),
        }
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn services(&self) -> &Arc<dyn LanguageServices> {
        self.resolver.services()
    }

    /// Start a new analysis pass, retiring every node of the previous one.
    ///
    /// Takes `&mut self`: no resolution borrowing the builder can still be
    /// running when the cache is emptied.
    pub fn begin_pass(&mut self) {
        debug!(retired = self.cache.len(), "begin_pass");
        self.cache.clear();
        self.resolver.clear();
    }

    /// Resolve a class or interface declaration into its hierarchy node.
    ///
    /// Resolving the same declaration twice within a pass returns the same
    /// `Arc`.
    pub async fn resolve(
        &self,
        declaration: DeclarationRef,
    ) -> Result<Arc<HierarchyNode>, ResolveError> {
        self.resolve_from(declaration, None).await
    }

    fn resolve_from(
        &self,
        declaration: DeclarationRef,
        requester: Option<SymbolKey>,
    ) -> BoxFuture<'_, Result<Arc<HierarchyNode>, ResolveError>> {
        Box::pin(async move {
            let kind = declaration.declaration_kind()?;
            let key = declaration.key();

            match self.cache.claim(&key, requester.as_ref())? {
                Claim::Ready(node) => Ok(node),
                Claim::Wait(wait) => wait.wait().await,
                Claim::Owner(guard) => {
                    let result = self.build_node(declaration, kind, &key).await;
                    guard.complete(result)
                }
            }
        })
    }

    async fn build_node(
        &self,
        declaration: DeclarationRef,
        kind: DeclarationKind,
        key: &SymbolKey,
    ) -> Result<Arc<HierarchyNode>, ResolveError> {
        let clauses = scan_heritage(&declaration.text);
        let line_map = LineMap::build(&declaration.text);
        let positions = |offsets: &[usize]| -> Vec<Position> {
            offsets
                .iter()
                .map(|&offset| {
                    position_of(&line_map, &declaration.text, declaration.range.start, offset)
                })
                .collect()
        };

        let (class_refs, interface_refs) = match kind {
            DeclarationKind::Class => (
                positions(clauses.extends.as_slice()),
                positions(&clauses.implements),
            ),
            DeclarationKind::Interface => (Vec::new(), positions(&clauses.extends_list)),
        };
        trace!(
            name = %declaration.name,
            super_classes = class_refs.len(),
            super_interfaces = interface_refs.len(),
            "heritage clauses"
        );

        let (super_classes, super_interfaces) = futures::try_join!(
            self.resolve_references(&declaration.uri, class_refs, key),
            self.resolve_references(&declaration.uri, interface_refs, key),
        )?;

        debug!(
            name = %declaration.name,
            super_classes = super_classes.len(),
            super_interfaces = super_interfaces.len(),
            "resolved"
        );
        Ok(Arc::new(HierarchyNode {
            declaration,
            super_classes,
            super_interfaces,
        }))
    }

    /// Resolve every declaration referenced at `positions`, concurrently.
    async fn resolve_references(
        &self,
        uri: &str,
        positions: Vec<Position>,
        owner: &SymbolKey,
    ) -> Result<Vec<Arc<HierarchyNode>>, ResolveError> {
        let lookups = positions
            .into_iter()
            .map(|position| self.resolver.definitions_at(uri, position));
        let targets = try_join_all(lookups).await?;

        let resolutions = targets
            .into_iter()
            .flatten()
            .map(|target| self.resolve_from(target, Some(owner.clone())));
        try_join_all(resolutions).await
    }
}

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod hierarchy_tests;
