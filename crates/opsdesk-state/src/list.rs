//! Generic paged list state and the fetch routine every list view shares.
//!
//! A fetch either replaces the list (page jumps, filter changes) or appends
//! to it (infinite scroll). Each Replace request supersedes everything issued
//! before it: a response that arrives for a superseded request is dropped
//! rather than overwriting newer data.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use opsdesk_client::ClientError;
use opsdesk_core::Paged;

use crate::notify::{Notice, Notifier};
use crate::status::LoadState;

/// How a fetched page is merged into the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchMode {
    /// Discard the current items.
    #[default]
    Replace,
    /// Extend the current items.
    Append,
}

/// Receipt for an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    mode: FetchMode,
    generation: u64,
}

/// Items, total and loading flag of one list.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    /// Items fetched so far.
    pub items: Vec<T>,

    /// Backend total for the current query.
    pub total: u64,

    /// True while a Replace request is in flight.
    pub loading: bool,

    /// Outcome of the last applied request.
    pub status: LoadState,

    generation: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            loading: false,
            status: LoadState::Idle,
            generation: 0,
        }
    }
}

impl<T> ListState<T> {
    /// Record that a request is about to be sent.
    pub fn begin(&mut self, mode: FetchMode) -> Ticket {
        if mode == FetchMode::Replace {
            self.generation += 1;
            self.loading = true;
        }
        self.status = LoadState::Loading;
        Ticket {
            mode,
            generation: self.generation,
        }
    }

    /// Merge a successful response. Returns false if the ticket is stale.
    pub fn apply(&mut self, ticket: Ticket, page: Paged<T>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        match ticket.mode {
            FetchMode::Replace => {
                self.items = page.items;
                self.loading = false;
            }
            FetchMode::Append => self.items.extend(page.items),
        }
        self.total = page.total;
        self.status = LoadState::Loaded;
        true
    }

    /// Record a failed response. Returns false if the ticket is stale.
    ///
    /// A failed Replace empties the list; a failed Append keeps the pages
    /// already loaded.
    pub fn fail(&mut self, ticket: Ticket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        if ticket.mode == FetchMode::Replace {
            self.items.clear();
            self.total = 0;
            self.loading = false;
        }
        self.status = LoadState::Error;
        true
    }

    /// Whether more items remain on the backend.
    pub fn has_more(&self) -> bool {
        (self.items.len() as u64) < self.total
    }
}

/// Shared handle to a [`ListState`].
pub struct ListHandle<T> {
    state: Arc<RwLock<ListState<T>>>,
}

impl<T> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for ListHandle<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(ListState::default())),
        }
    }
}

impl<T: Clone + Send + Sync> ListHandle<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> ListState<T> {
        self.state.read().await.clone()
    }

    /// Copy of the current items.
    pub async fn items(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }

    /// Backend total for the current query.
    pub async fn total(&self) -> u64 {
        self.state.read().await.total
    }

    /// Whether a Replace request is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Status of the last applied request.
    pub async fn status(&self) -> LoadState {
        self.state.read().await.status
    }

    /// Borrow the state for a derived computation.
    pub async fn read<R>(&self, f: impl FnOnce(&ListState<T>) -> R) -> R {
        f(&*self.state.read().await)
    }

    /// Run `request` and merge its result.
    ///
    /// `request` must be lazy (an un-polled future) so the request is
    /// registered before it is sent. Failures are logged and reported
    /// through `notifier` as "`what` failed".
    pub async fn load<F, R>(
        &self,
        mode: FetchMode,
        what: &str,
        notifier: &dyn Notifier,
        request: F,
    ) -> LoadState
    where
        F: Future<Output = Result<R, ClientError>>,
        R: Into<Paged<T>>,
    {
        let ticket = self.state.write().await.begin(mode);
        let result = request.await;

        let mut state = self.state.write().await;
        match result {
            Ok(page) => {
                let page = page.into();
                let count = page.items.len();
                if state.apply(ticket, page) {
                    debug!(what = %what, count, total = state.total, "List updated");
                } else {
                    debug!(what = %what, "Dropping superseded response");
                }
            }
            Err(e) => {
                if state.fail(ticket) {
                    warn!(what = %what, error = %e, "List fetch failed");
                    notifier.notify(Notice::error(format!("{what} failed, please retry")));
                } else {
                    debug!(what = %what, error = %e, "Ignoring failure of superseded request");
                }
            }
        }
        state.status
    }
}
