//! Live search pipeline.
//!
//! Every call to [`SearchController::set_query`] starts a new generation.
//! A fetch only publishes its outcome while its generation is still the
//! current one; anything older is dropped on completion. Cancelling the
//! superseded fetch just saves work.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use jisho_types::{Entry, Query};
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::lookup::{LookupError, RemoteLookup};
use crate::romaji::{self, Suggestion};
use crate::state::SearchSnapshot;

const FIRST_PAGE: u32 = 1;

/// When a typed query is worth a fetch
#[derive(Debug, Clone, Copy)]
pub struct SearchPolicy {
    /// Non-blank queries with fewer characters clear results instead
    pub min_query_chars: usize,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self { min_query_chars: 1 }
    }
}

struct Inner {
    state: SearchSnapshot,
    in_flight: Option<CancellationToken>,
}

/// State shared with the fetch tasks
struct Shared {
    inner: Mutex<Inner>,
    tx: watch::Sender<SearchSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a fetch outcome if `generation` is still current
    fn complete(&self, generation: u64, result: Result<Vec<Entry>, LookupError>) {
        let mut inner = self.lock();

        if inner.state.generation != generation {
            tracing::debug!(
                generation,
                current = inner.state.generation,
                "Discarding stale search result"
            );
            return;
        }

        inner.in_flight = None;
        inner.state.pending = false;

        match result {
            Ok(entries) => {
                tracing::debug!(generation, count = entries.len(), "Search completed");
                inner.state.results = entries.into();
                inner.state.last_error = None;
            }
            Err(e) => {
                tracing::warn!(generation, "Search failed: {}", e);
                inner.state.results = Arc::default();
                inner.state.last_error = Some(e.to_string());
            }
        }

        self.publish(&inner);
    }

    /// Called with the lock held so observers see changes in order
    fn publish(&self, inner: &Inner) {
        self.tx.send_replace(inner.state.clone());
    }
}

/// Owns the query text, the latest results and the in-flight fetch
pub struct SearchController {
    shared: Arc<Shared>,
    lookup: Arc<dyn RemoteLookup>,
    policy: SearchPolicy,
    runtime: Handle,
}

impl SearchController {
    /// Create a controller spawning fetches on the current tokio runtime
    ///
    /// Fails when called outside a tokio runtime.
    pub fn new(
        lookup: Arc<dyn RemoteLookup>,
        policy: SearchPolicy,
    ) -> Result<Self, TryCurrentError> {
        Ok(Self::with_runtime(lookup, policy, Handle::try_current()?))
    }

    fn with_runtime(
        lookup: Arc<dyn RemoteLookup>,
        policy: SearchPolicy,
        runtime: Handle,
    ) -> Self {
        let (tx, _rx) = watch::channel(SearchSnapshot::default());

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state: SearchSnapshot::default(),
                    in_flight: None,
                }),
                tx,
            }),
            lookup,
            policy,
            runtime,
        }
    }

    /// Replace the query and start fetching for it
    ///
    /// The query is updated before this returns. Blank queries, and queries
    /// shorter than the policy minimum, clear the results without a fetch.
    pub fn set_query(&self, text: impl Into<String>, cursor_hint: Option<usize>) {
        let query = Query::new(text, cursor_hint);
        let mut inner = self.shared.lock();

        if let Some(token) = inner.in_flight.take() {
            token.cancel();
        }

        inner.state.generation += 1;
        inner.state.query = query.clone();
        let generation = inner.state.generation;

        if query.is_blank() || query.significant_len() < self.policy.min_query_chars {
            tracing::debug!(generation, "Query too short, clearing results");
            inner.state.results = Arc::default();
            inner.state.pending = false;
            inner.state.last_error = None;
            self.shared.publish(&inner);
            return;
        }

        let token = CancellationToken::new();
        inner.in_flight = Some(token.clone());
        inner.state.pending = true;
        self.shared.publish(&inner);
        drop(inner);

        tracing::debug!(generation, query = query.text(), "Issuing search");

        let shared = Arc::clone(&self.shared);
        let lookup = Arc::clone(&self.lookup);
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(generation, "Search cancelled");
                }
                result = lookup.fetch(query.text(), FIRST_PAGE) => {
                    shared.complete(generation, result);
                }
            }
        });
    }

    pub fn clear(&self) {
        self.set_query("", Some(0));
    }

    /// Search for a cross-reference target with the caret after it
    pub fn follow_reference(&self, target: &str) {
        self.set_query(target, Some(target.chars().count()));
    }

    /// Kana alternative for the current query
    pub fn suggestion(&self) -> Option<Suggestion> {
        romaji::suggest(self.shared.lock().state.query.text())
    }

    /// Search the kana suggestion instead; false when there is none
    pub fn accept_suggestion(&self) -> bool {
        match self.suggestion() {
            Some(suggestion) => {
                self.follow_reference(&suggestion.kana);
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.shared.lock().state.clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.shared.tx.subscribe()
    }

    pub fn query(&self) -> Query {
        self.shared.lock().state.query.clone()
    }

    pub fn results(&self) -> Arc<[Entry]> {
        Arc::clone(&self.shared.lock().state.results)
    }

    pub fn is_pending(&self) -> bool {
        self.shared.lock().state.pending
    }

    pub fn lookup(&self) -> &Arc<dyn RemoteLookup> {
        &self.lookup
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(token) = self.shared.lock().in_flight.take() {
            token.cancel();
        }
    }
}
