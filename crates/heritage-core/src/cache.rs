//! Pass-scoped resolution cache.
//!
//! Holds the canonical [`HierarchyNode`] per [`SymbolKey`] for one analysis
//! pass. Resolution is single-flight: the first requester of a key claims it
//! and does the work, later requesters wait on the in-flight entry and
//! receive the same `Arc`.
//!
//! ## Cycle detection
//!
//! Every claim made while resolving key `R` records the edge `R -> key` on
//! R's in-flight entry. A claim fails with `CyclicHierarchy` when `R` is
//! reachable from `key` through those edges. Because the edges cover both
//! keys a branch resolves itself and keys it waits on, this also catches a
//! cycle whose halves are being resolved by two concurrent branches, so a
//! wait never deadlocks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rustc_hash::{FxHashMap, FxHashSet};
use tokio::sync::watch;
use tracing::trace;

use crate::declaration::SymbolKey;
use crate::error::ResolveError;
use crate::hierarchy::HierarchyNode;

type Published = Option<Result<Arc<HierarchyNode>, ResolveError>>;

struct InFlight {
    sender: watch::Sender<Published>,
    /// Keys this resolution has requested so far.
    depends_on: FxHashSet<SymbolKey>,
}

#[derive(Default)]
struct CacheState {
    nodes: FxHashMap<SymbolKey, Arc<HierarchyNode>>,
    in_flight: FxHashMap<SymbolKey, InFlight>,
}

impl CacheState {
    /// Path `from -> ... -> to` through in-flight dependency edges.
    fn dependency_path(&self, from: &SymbolKey, to: &SymbolKey) -> Option<Vec<SymbolKey>> {
        let mut stack = vec![vec![from.clone()]];
        let mut visited: FxHashSet<&SymbolKey> = FxHashSet::default();

        while let Some(path) = stack.pop() {
            let last = path.last()?;
            if last == to {
                return Some(path);
            }
            let Some((last, entry)) = self.in_flight.get_key_value(last) else {
                continue;
            };
            if !visited.insert(last) {
                continue;
            }
            for next in &entry.depends_on {
                let mut extended = path.clone();
                extended.push(next.clone());
                stack.push(extended);
            }
        }

        None
    }
}

/// Outcome of [`ResolutionCache::claim`].
pub enum Claim<'a> {
    /// The key was resolved earlier in this pass.
    Ready(Arc<HierarchyNode>),
    /// Another resolution owns the key; wait for it to publish.
    Wait(InFlightWait),
    /// The caller owns the key and must publish through the guard.
    Owner(InFlightGuard<'a>),
}

/// Identity-keyed memo table for one analysis pass.
#[derive(Default)]
pub struct ResolutionCache {
    state: Mutex<CacheState>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn has(&self, key: &SymbolKey) -> bool {
        self.lock().nodes.contains_key(key)
    }

    pub fn get(&self, key: &SymbolKey) -> Option<Arc<HierarchyNode>> {
        self.lock().nodes.get(key).cloned()
    }

    /// Store a node under its own key, replacing any earlier node.
    pub fn put(&self, node: Arc<HierarchyNode>) {
        self.lock().nodes.insert(node.key(), node);
    }

    /// Number of resolved nodes.
    pub fn len(&self) -> usize {
        self.lock().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().nodes.is_empty()
    }

    /// Forget every node and in-flight entry. Pending waiters observe
    /// `Abandoned`.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.nodes.clear();
        state.in_flight.clear();
    }

    /// Claim `key` on behalf of the resolution of `requester` (`None` for a
    /// root resolution).
    pub fn claim(
        &self,
        key: &SymbolKey,
        requester: Option<&SymbolKey>,
    ) -> Result<Claim<'_>, ResolveError> {
        let mut state = self.lock();

        if let Some(node) = state.nodes.get(key) {
            trace!(key = %key, "cache hit");
            return Ok(Claim::Ready(Arc::clone(node)));
        }

        if let Some(requester) = requester {
            if let Some(mut cycle) = state.dependency_path(key, requester) {
                cycle.push(key.clone());
                return Err(ResolveError::CyclicHierarchy { cycle });
            }
            if let Some(entry) = state.in_flight.get_mut(requester) {
                entry.depends_on.insert(key.clone());
            }
        }

        if let Some(entry) = state.in_flight.get(key) {
            trace!(key = %key, "waiting on in-flight resolution");
            return Ok(Claim::Wait(InFlightWait {
                name: key.name.clone(),
                receiver: entry.sender.subscribe(),
            }));
        }

        let (sender, _) = watch::channel(None);
        state.in_flight.insert(
            key.clone(),
            InFlight {
                sender,
                depends_on: FxHashSet::default(),
            },
        );
        Ok(Claim::Owner(InFlightGuard {
            cache: self,
            key: key.clone(),
            published: false,
        }))
    }

    fn publish(&self, key: &SymbolKey, result: Result<Arc<HierarchyNode>, ResolveError>) {
        let sender = {
            let mut state = self.lock();
            let entry = state.in_flight.remove(key);
            for other in state.in_flight.values_mut() {
                other.depends_on.remove(key);
            }
            if let Ok(node) = &result {
                state.nodes.insert(key.clone(), Arc::clone(node));
            }
            entry.map(|entry| entry.sender)
        };

        if let Some(sender) = sender {
            sender.send_replace(Some(result));
        }
    }
}

/// Ownership of an in-flight key.
///
/// Dropping the guard without calling [`complete`](Self::complete) publishes
/// `Abandoned` so waiters never hang.
pub struct InFlightGuard<'a> {
    cache: &'a ResolutionCache,
    key: SymbolKey,
    published: bool,
}

impl InFlightGuard<'_> {
    pub fn key(&self) -> &SymbolKey {
        &self.key
    }

    /// Publish the result to the cache and to every waiter, then hand it
    /// back. Failures are not cached.
    pub fn complete(
        mut self,
        result: Result<Arc<HierarchyNode>, ResolveError>,
    ) -> Result<Arc<HierarchyNode>, ResolveError> {
        self.published = true;
        self.cache.publish(&self.key, result.clone());
        result
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.published {
            let name = self.key.name.clone();
            self.cache
                .publish(&self.key, Err(ResolveError::Abandoned { name }));
        }
    }
}

/// A pending wait on a key owned by another resolution.
pub struct InFlightWait {
    name: String,
    receiver: watch::Receiver<Published>,
}

impl InFlightWait {
    pub async fn wait(mut self) -> Result<Arc<HierarchyNode>, ResolveError> {
        let abandoned = || ResolveError::Abandoned {
            name: self.name.clone(),
        };
        match self.receiver.wait_for(Option::is_some).await {
            Ok(published) => (*published).clone().unwrap_or_else(|| Err(abandoned())),
            Err(_) => Err(abandoned()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/cache_tests.rs"]
mod cache_tests;
