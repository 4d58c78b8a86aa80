//! Server-side state of the dashboard views that are mounted in a browser.
//!
//! Every page load of the listing mounts a new view with its own fetched
//! transactions and sort state. The page refers to its view by [ViewId] in the
//! htmx requests it sends, and drops it when the page is closed.

use std::{
    collections::HashMap,
    fmt::Display,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use serde::Deserialize;
use uuid::Uuid;

use crate::{
    Error,
    api::{ApiError, Balance, Transaction, TransactionsResponse},
    dashboard::sort::{SortColumn, SortState, sort_transactions},
};

/// How long a view may go without requests before it is evicted.
pub const VIEW_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Identifies one mounted dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ViewId(Uuid);

impl ViewId {
    fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ViewId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fetched balance and transactions of a view, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub balance: Balance,
    pub transactions: Vec<Transaction>,
    pub sort: SortState,
}

impl Dashboard {
    fn from_listing(listing: TransactionsResponse) -> Self {
        Self {
            balance: listing.balance,
            transactions: listing.transactions,
            sort: SortState::default(),
        }
    }

    /// The dashboard after the header of `column` has been activated.
    ///
    /// Sorting starts from the current display order.
    fn sorted_by(&self, column: SortColumn) -> Self {
        let sort = self.sort.activate(column);

        Self {
            balance: self.balance,
            transactions: sort_transactions(&self.transactions, sort),
            sort,
        }
    }
}

/// Where a view is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Mounted, the transactions have not been requested yet.
    Pending,
    /// The transactions are being fetched.
    Loading,
    /// The transactions were fetched.
    Ready(Dashboard),
    /// The transactions could not be fetched.
    Failed(ApiError),
}

/// What a load request should do next, see [ViewRegistry::begin_load].
#[derive(Debug)]
pub enum LoadStep {
    /// The caller must fetch the transactions and hand them to the ticket.
    Fetch(LoadTicket),
    /// The view has already been loaded, or is being loaded by another request.
    Render(ViewState),
}

/// The right to store the result of a view's one and only fetch.
///
/// If the ticket is dropped before [LoadTicket::finish] is called, e.g.
/// because the browser aborted the request, the view goes back to
/// [ViewState::Pending] so the next load request fetches again.
#[derive(Debug)]
pub struct LoadTicket {
    registry: ViewRegistry,
    view_id: ViewId,
    finished: bool,
}

impl LoadTicket {
    /// Store the result of the fetch and return the new state of the view.
    ///
    /// # Errors
    /// Returns [Error::ViewNotFound] if the view was disposed during the
    /// fetch, in which case `result` is discarded.
    pub fn finish(
        mut self,
        result: Result<TransactionsResponse, ApiError>,
    ) -> Result<ViewState, Error> {
        self.finished = true;
        self.registry.finish_load(self.view_id, result)
    }
}

impl Drop for LoadTicket {
    fn drop(&mut self) {
        if !self.finished {
            self.registry.abandon_load(self.view_id);
        }
    }
}

#[derive(Debug)]
struct ViewEntry {
    state: ViewState,
    last_seen: Instant,
}

impl ViewEntry {
    fn touch(&mut self) -> &mut ViewState {
        self.last_seen = Instant::now();
        &mut self.state
    }
}

/// The views mounted across all browsers.
///
/// Cloning is cheap, clones share the same views.
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    views: Arc<Mutex<HashMap<ViewId, ViewEntry>>>,
    idle_timeout: Duration,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new(VIEW_IDLE_TIMEOUT)
    }
}

impl ViewRegistry {
    /// Create an empty registry that evicts views idle for longer than `idle_timeout`.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            views: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ViewId, ViewEntry>>, Error> {
        self.views
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire view registry lock: {error}"))
            .map_err(|_| Error::ViewRegistryLock)
    }

    /// Register a new view in the [ViewState::Pending] state.
    ///
    /// Views that have been idle for too long are evicted first.
    pub fn mount(&self) -> Result<ViewId, Error> {
        let mut views = self.lock()?;

        let view_count = views.len();
        views.retain(|_, entry| entry.last_seen.elapsed() < self.idle_timeout);
        let evicted = view_count - views.len();

        if evicted > 0 {
            tracing::debug!("Evicted {evicted} idle dashboard views");
        }

        let view_id = ViewId::new_random();
        views.insert(
            view_id,
            ViewEntry {
                state: ViewState::Pending,
                last_seen: Instant::now(),
            },
        );

        tracing::debug!(mounted_views = views.len(), "Mounted dashboard view {view_id}");

        Ok(view_id)
    }

    /// Claim the fetch of a [ViewState::Pending] view.
    ///
    /// Only the first load request of a view gets a [LoadStep::Fetch], later
    /// requests get the view's current state.
    pub fn begin_load(&self, view_id: ViewId) -> Result<LoadStep, Error> {
        let mut views = self.lock()?;
        let state = views
            .get_mut(&view_id)
            .ok_or(Error::ViewNotFound(view_id))?
            .touch();

        if *state != ViewState::Pending {
            return Ok(LoadStep::Render(state.clone()));
        }

        *state = ViewState::Loading;

        Ok(LoadStep::Fetch(LoadTicket {
            registry: self.clone(),
            view_id,
            finished: false,
        }))
    }

    fn finish_load(
        &self,
        view_id: ViewId,
        result: Result<TransactionsResponse, ApiError>,
    ) -> Result<ViewState, Error> {
        let mut views = self.lock()?;

        let Some(entry) = views.get_mut(&view_id) else {
            tracing::debug!("Dashboard view {view_id} was disposed while loading, discarding result");
            return Err(Error::ViewNotFound(view_id));
        };

        let state = entry.touch();
        *state = match result {
            Ok(listing) => ViewState::Ready(Dashboard::from_listing(listing)),
            Err(error) => ViewState::Failed(error),
        };

        Ok(state.clone())
    }

    fn abandon_load(&self, view_id: ViewId) {
        let Ok(mut views) = self.lock() else {
            return;
        };

        if let Some(entry) = views.get_mut(&view_id) {
            if entry.state == ViewState::Loading {
                tracing::debug!("Load of dashboard view {view_id} was cancelled");
                entry.state = ViewState::Pending;
            }
        }
    }

    /// Activate the header of `column` in a view and return the view's new state.
    ///
    /// Views that are not [ViewState::Ready] are left as they are.
    pub fn sort(&self, view_id: ViewId, column: SortColumn) -> Result<ViewState, Error> {
        let mut views = self.lock()?;
        let state = views
            .get_mut(&view_id)
            .ok_or(Error::ViewNotFound(view_id))?
            .touch();

        if let ViewState::Ready(dashboard) = state {
            *dashboard = dashboard.sorted_by(column);
        }

        Ok(state.clone())
    }

    /// Drop the state of a view.
    ///
    /// Returns `false` if there was no such view.
    pub fn dispose(&self, view_id: ViewId) -> Result<bool, Error> {
        let removed = self.lock()?.remove(&view_id).is_some();

        if removed {
            tracing::debug!("Disposed dashboard view {view_id}");
        }

        Ok(removed)
    }

    /// The current state of a view.
    #[cfg(test)]
    pub fn get(&self, view_id: ViewId) -> Result<ViewState, Error> {
        self.lock()?
            .get(&view_id)
            .map(|entry| entry.state.clone())
            .ok_or(Error::ViewNotFound(view_id))
    }
}
