//! Per-session UI state for the search page.
//!
//! Every search takes a ticket carrying the session's next generation
//! number. A response is applied only when its ticket is still the latest
//! one issued for that session, so a slow earlier search can never
//! overwrite the result of a later one.

use crate::dispatch::{SearchOutcome, SearchQuery};
use crate::model::SearchMode;
use crate::Locale;
use parking_lot::RwLock;
use rand::{Rng, distributions::Alphanumeric, thread_rng};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

const MAX_SESSION_COUNT: usize = 4096;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionState {
    pub locale: Locale,
    pub query: String,
    pub mode: SearchMode,
    pub loading: bool,
    pub searched: bool,
    pub generation: u64,
    pub last_outcome: Option<SearchOutcome>,
    #[serde(skip)]
    last_seen: u64,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchTicket {
    pub session_id: String,
    pub generation: u64,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionState>>>,
    clock: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn snapshot(&self, session_id: &str) -> Option<SessionState> {
        self.inner.read().get(session_id).cloned()
    }

    /// Switches the session's locale. A change clears the shown result.
    pub fn set_locale(&self, session_id: &str, locale: Locale) {
        self.with_session(session_id, |state| {
            if state.locale != locale {
                state.locale = locale;
                state.last_outcome = None;
                state.searched = false;
            }
        });
    }

    /// Starts a search. Blank queries leave the state untouched and return `None`.
    pub fn begin_search(
        &self,
        session_id: &str,
        raw_query: &str,
        mode: SearchMode,
    ) -> Option<(SearchTicket, SearchQuery)> {
        let query = SearchQuery::parse(raw_query)?;
        let generation = self.with_session(session_id, |state| {
            state.generation += 1;
            state.query = query.as_str().to_string();
            state.mode = mode;
            state.loading = true;
            state.searched = true;
            state.last_outcome = None;
            state.generation
        });
        Some((
            SearchTicket {
                session_id: session_id.to_string(),
                generation,
            },
            query,
        ))
    }

    /// Applies `outcome` if `ticket` is still current. Returns whether it was applied.
    pub fn complete_search(&self, ticket: &SearchTicket, outcome: SearchOutcome) -> bool {
        let mut guard = self.inner.write();
        let Some(state) = guard.get_mut(&ticket.session_id) else {
            return false;
        };
        if state.generation != ticket.generation {
            debug!(
                session = %ticket.session_id,
                stale = ticket.generation,
                latest = state.generation,
                "Discarding stale search response"
            );
            return false;
        }
        state.loading = false;
        state.last_outcome = Some(outcome);
        true
    }

    fn with_session<R>(&self, session_id: &str, update: impl FnOnce(&mut SessionState) -> R) -> R {
        let now = self.clock.fetch_add(1, Ordering::Relaxed);
        let mut guard = self.inner.write();
        if guard.len() >= MAX_SESSION_COUNT && !guard.contains_key(session_id) {
            if let Some(oldest) = oldest_session_key(&guard) {
                guard.remove(&oldest);
            }
        }
        let state = guard.entry(session_id.to_string()).or_default();
        state.last_seen = now;
        update(state)
    }
}

fn oldest_session_key(sessions: &HashMap<String, SessionState>) -> Option<String> {
    sessions
        .iter()
        .min_by_key(|(_, state)| state.last_seen)
        .map(|(key, _)| key.clone())
}

pub fn generate_session_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResultGroups;

    fn outcome(query: &str) -> SearchOutcome {
        SearchOutcome {
            query: query.to_string(),
            mode: SearchMode::Online,
            locale: Locale::Es,
            source_label: "test".to_string(),
            groups: ResultGroups::single(query, Vec::new()),
            failure: None,
        }
    }

    #[test]
    fn blank_query_leaves_state_unchanged() {
        let store = SessionStore::new();
        let (ticket, _) = store.begin_search("s1", "flu", SearchMode::Online).unwrap();
        store.complete_search(&ticket, outcome("flu"));
        let before = store.snapshot("s1").unwrap();

        assert!(store.begin_search("s1", "   ", SearchMode::Offline).is_none());
        let after = store.snapshot("s1").unwrap();
        assert_eq!(after.generation, before.generation);
        assert_eq!(after.mode, SearchMode::Online);
        assert_eq!(after.last_outcome, before.last_outcome);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let store = SessionStore::new();
        let (first, _) = store.begin_search("s1", "first", SearchMode::Online).unwrap();
        let (second, _) = store.begin_search("s1", "second", SearchMode::Online).unwrap();

        assert!(store.complete_search(&second, outcome("second")));
        assert!(!store.complete_search(&first, outcome("first")));

        let state = store.snapshot("s1").unwrap();
        assert_eq!(state.last_outcome.unwrap().query, "second");
        assert!(!state.loading);
    }

    #[test]
    fn loading_flag_tracks_the_latest_request() {
        let store = SessionStore::new();
        let (first, query) = store.begin_search("s1", " asma ", SearchMode::Combined).unwrap();
        assert_eq!(query.as_str(), "asma");
        assert!(store.snapshot("s1").unwrap().loading);
        let (_second, _) = store.begin_search("s1", "tos", SearchMode::Combined).unwrap();
        store.complete_search(&first, outcome("asma"));
        assert!(store.snapshot("s1").unwrap().loading);
    }

    #[test]
    fn locale_change_clears_results() {
        let store = SessionStore::new();
        let (ticket, _) = store.begin_search("s1", "flu", SearchMode::Online).unwrap();
        store.complete_search(&ticket, outcome("flu"));

        store.set_locale("s1", Locale::Es);
        assert!(store.snapshot("s1").unwrap().last_outcome.is_some());

        store.set_locale("s1", Locale::Fr);
        let state = store.snapshot("s1").unwrap();
        assert_eq!(state.locale, Locale::Fr);
        assert!(state.last_outcome.is_none());
        assert!(!state.searched);
    }

    #[test]
    fn unknown_session_ticket_is_ignored() {
        let store = SessionStore::new();
        let ticket = SearchTicket {
            session_id: "ghost".to_string(),
            generation: 1,
        };
        assert!(!store.complete_search(&ticket, outcome("x")));
    }

    #[test]
    fn session_ids_are_alphanumeric() {
        let id = generate_session_id();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|ch| ch.is_ascii_alphanumeric()));
    }
}
