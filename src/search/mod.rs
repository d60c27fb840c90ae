//! Search session: turns `(text, category)` into a cancelable catalog request
//! and publishes the resulting [`SearchState`].

pub mod parser;
pub mod query;
pub mod ranking;

use std::sync::{
   Arc,
   atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;
use tokio::sync::{oneshot, watch};
use url::Url;

use crate::{
   fetch::{FetchHandle, FetchOutcome, Fetcher, spawn_fetch},
   types::{Category, SearchState},
};

struct InFlight {
   generation: u64,
   handle:     Option<FetchHandle>,
}

struct Inner {
   fetcher:    Arc<dyn Fetcher>,
   base_url:   Url,
   state:      watch::Sender<SearchState>,
   in_flight:  Mutex<Option<InFlight>>,
   generation: AtomicU64,
}

/// Owns the search lifecycle for one search bar.
///
/// At most one request is in flight. Starting a search cancels the previous
/// one, and a cancelled search never touches the state or calls its
/// completion callback. The session is the only writer of the state;
/// observers read it through [`SearchSession::state`] or
/// [`SearchSession::subscribe`].
pub struct SearchSession {
   inner: Arc<Inner>,
}

impl SearchSession {
   pub fn new(fetcher: Arc<dyn Fetcher>, base_url: Url) -> Self {
      let (state, _) = watch::channel(SearchState::NotSearchedYet);
      Self {
         inner: Arc::new(Inner {
            fetcher,
            base_url,
            state,
            in_flight: Mutex::new(None),
            generation: AtomicU64::new(0),
         }),
      }
   }

   pub fn state(&self) -> SearchState {
      self.inner.state.borrow().clone()
   }

   /// Receiver that observes every state transition.
   pub fn subscribe(&self) -> watch::Receiver<SearchState> {
      self.inner.state.subscribe()
   }

   /// Starts a search and returns immediately.
   ///
   /// Returns `false` without touching the state when `text` is blank. Otherwise
   /// the state is `Loading` by the time this returns, and `on_complete` is
   /// called once with `true` (results or no results) or `false` (request
   /// failed), unless a later search or [`cancel`](Self::cancel) supersedes
   /// this one first. Must be called from within a tokio runtime.
   pub fn perform_search<F>(&self, text: &str, category: Category, on_complete: F) -> bool
   where
      F: FnOnce(bool) + Send + 'static,
   {
      if text.trim().is_empty() {
         tracing::debug!("ignoring blank search text");
         return false;
      }

      let inner = &self.inner;
      let mut in_flight = inner.in_flight.lock();

      if let Some(previous) = in_flight.take() {
         tracing::debug!(generation = previous.generation, "superseding in-flight search");
         if let Some(handle) = previous.handle {
            handle.cancel();
         }
      }

      let generation = inner.generation.fetch_add(1, Ordering::Relaxed) + 1;

      inner.state.send_replace(SearchState::Loading);

      let url = match query::build_url(&inner.base_url, text, category) {
         Ok(url) => url,
         Err(e) => {
            tracing::warn!("failed to build search url: {e}");
            inner.state.send_replace(SearchState::NotSearchedYet);
            drop(in_flight);
            on_complete(false);
            return true;
         },
      };

      tracing::info!(generation, %category, %url, "starting search");

      *in_flight = Some(InFlight { generation, handle: None });

      let completion = Arc::clone(inner);
      let handle = spawn_fetch(Arc::clone(&inner.fetcher), url, move |outcome| {
         if let Some(success) = completion.complete(generation, outcome) {
            on_complete(success);
         }
      });

      if let Some(current) = in_flight.as_mut() {
         current.handle = Some(handle);
      }

      true
   }

   /// Runs a search and waits for its completion.
   ///
   /// Returns `None` when the text was blank or the search was superseded.
   pub async fn search(&self, text: &str, category: Category) -> Option<bool> {
      let (tx, rx) = oneshot::channel();
      let started = self.perform_search(text, category, move |success| {
         let _ = tx.send(success);
      });

      if !started {
         return None;
      }

      rx.await.ok()
   }

   /// Cancels the in-flight search, if any. A session left `Loading` goes back
   /// to `NotSearchedYet`; the cancelled search's callback is never called.
   pub fn cancel(&self) {
      let mut in_flight = self.inner.in_flight.lock();
      let Some(previous) = in_flight.take() else {
         return;
      };

      tracing::debug!(generation = previous.generation, "cancelling search");
      if let Some(handle) = previous.handle {
         handle.cancel();
      }

      self.inner.state.send_if_modified(|state| {
         if state.is_loading() {
            *state = SearchState::NotSearchedYet;
            true
         } else {
            false
         }
      });
   }
}

impl Drop for SearchSession {
   fn drop(&mut self) {
      if let Some(previous) = self.inner.in_flight.lock().take()
         && let Some(handle) = previous.handle
      {
         handle.cancel();
      }
   }
}

impl Inner {
   /// Applies a fetch outcome for `generation`. Returns the value to report to
   /// the caller, or `None` when the outcome belongs to a superseded search.
   fn complete(&self, generation: u64, outcome: FetchOutcome) -> Option<bool> {
      let response = match outcome {
         FetchOutcome::Cancelled => {
            tracing::debug!(generation, "search cancelled");
            return None;
         },
         FetchOutcome::Completed(response) => response.error_for_status(),
         FetchOutcome::Failed(e) => Err(e),
      };

      let (next, success) = match response {
         Ok(response) => {
            let mut results = parser::parse(&response.body);
            ranking::sort_results(&mut results);
            tracing::info!(generation, count = results.len(), "search completed");

            let next = if results.is_empty() {
               SearchState::NoResults
            } else {
               SearchState::Results(results)
            };
            (next, true)
         },
         Err(e) => {
            tracing::warn!(generation, "search failed: {e}");
            (SearchState::NotSearchedYet, false)
         },
      };

      let mut in_flight = self.in_flight.lock();
      match in_flight.as_ref() {
         Some(current) if current.generation == generation => {},
         _ => {
            tracing::debug!(generation, "discarding superseded response");
            return None;
         },
      }

      in_flight.take();
      self.state.send_replace(next);
      Some(success)
   }
}
