//! Place-search plumbing around an external geocoder.
//!
//! Nothing here performs I/O. The host feeds keystrokes and clock ticks into
//! a `SearchBox`, runs the released query against its `Geocoder`, and hands
//! the response back together with the token it was issued under. Responses
//! for any token but the newest are dropped.

use std::fmt;

use crate::cfg::SEARCH_DEBOUNCE_MS;
use crate::geo::LatLng;

/// One geocoder hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub label: String,
    pub coordinate: LatLng,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeocodeError {
    pub reason: String,
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "place search failed: {}", self.reason)
    }
}

impl std::error::Error for GeocodeError {}

/// Free-text query to ranked places.
pub trait Geocoder {
    fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError>;
}

/// Identifies one issued query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryToken(u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Pending,
    Ready,
    Failed(String),
}

/// Releases the most recent input once it has been quiet for `delay_ms`.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay_ms: u64,
    pending: Option<(String, u64)>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Record `query` typed at `now_ms`, replacing anything still waiting.
    pub fn input(&mut self, query: impl Into<String>, now_ms: u64) {
        self.pending = Some((query.into(), now_ms));
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// The waiting query, once `delay_ms` has elapsed since it was typed.
    pub fn poll(&mut self, now_ms: u64) -> Option<String> {
        let (_, since) = self.pending.as_ref()?;
        if now_ms.saturating_sub(*since) < self.delay_ms {
            return None;
        }
        self.pending.take().map(|(q, _)| q)
    }
}

/// Issues query tokens and accepts only the newest response.
#[derive(Clone, Debug, Default)]
pub struct SearchTracker {
    next: u64,
    active: Option<QueryToken>,
    status: SearchStatus,
    results: Vec<Place>,
}

impl SearchTracker {
    pub fn begin(&mut self) -> QueryToken {
        self.next += 1;
        let token = QueryToken(self.next);
        self.active = Some(token);
        self.status = SearchStatus::Pending;
        token
    }

    /// Store the response for `token`. Returns false when it is stale.
    pub fn resolve(&mut self, token: QueryToken, result: Result<Vec<Place>, GeocodeError>) -> bool {
        if self.active != Some(token) {
            tracing::debug!(token = token.0, "dropping stale search response");
            return false;
        }
        self.active = None;
        match result {
            Ok(places) => {
                self.results = places;
                self.status = SearchStatus::Ready;
            }
            Err(e) => {
                self.results.clear();
                self.status = SearchStatus::Failed(e.reason);
            }
        }
        true
    }

    /// Forget the in-flight query and any shown results.
    pub fn cancel(&mut self) {
        self.active = None;
        self.results.clear();
        self.status = SearchStatus::Idle;
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn results(&self) -> &[Place] {
        &self.results
    }
}

/// Search field state for one map.
#[derive(Clone, Debug)]
pub struct SearchBox {
    debouncer: Debouncer,
    tracker: SearchTracker,
    /// Text of the last query handed to the geocoder.
    released: Option<String>,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self {
            debouncer: Debouncer::new(SEARCH_DEBOUNCE_MS),
            tracker: SearchTracker::default(),
            released: None,
        }
    }
}

impl SearchBox {
    /// Text changed. Blank input cancels immediately; any other change
    /// makes the in-flight query and its results stale.
    pub fn input(&mut self, text: &str, now_ms: u64) {
        let query = text.trim();
        if self.released.as_deref() != Some(query) {
            self.released = None;
            self.tracker.cancel();
        }
        if query.is_empty() {
            self.debouncer.clear();
        } else {
            self.debouncer.input(query, now_ms);
        }
    }

    /// Query to send now, if the debounce period has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<(QueryToken, String)> {
        let query = self.debouncer.poll(now_ms)?;
        self.released = Some(query.clone());
        Some((self.tracker.begin(), query))
    }

    pub fn resolve(&mut self, token: QueryToken, result: Result<Vec<Place>, GeocodeError>) -> bool {
        self.tracker.resolve(token, result)
    }

    /// Poll and, if a query is due, run it synchronously against `geocoder`.
    pub fn run<G: Geocoder + ?Sized>(&mut self, geocoder: &G, now_ms: u64) -> bool {
        match self.poll(now_ms) {
            Some((token, query)) => self.resolve(token, geocoder.search(&query)),
            None => false,
        }
    }

    pub fn status(&self) -> &SearchStatus {
        self.tracker.status()
    }

    pub fn results(&self) -> &[Place] {
        self.tracker.results()
    }

    pub fn place(&self, index: usize) -> Option<&Place> {
        self.tracker.results().get(index)
    }
}
