//! Catalog state store.
//!
//! Owns the session's [`CatalogState`] and applies the outcome of each load.
//! The state lives in a `watch` channel: readers take a snapshot or subscribe,
//! and each transition is published as one whole-state update.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::catalog::{
    CatalogError, CatalogGroup, CategoryFetcher, GroupCatalog, PRODUCT_FALLBACK_ERROR,
};
use crate::transport::Transport;

pub mod selectors;
pub mod state;

pub use selectors::DetailView;
pub use state::{CatalogState, LoadOutcome, Operation, StalePolicy};
use state::{OpTracker, Ticket};

struct Inner {
    fetcher: CategoryFetcher,
    groups: GroupCatalog,
    policy: StalePolicy,
    state: watch::Sender<CatalogState>,
    // Always locked before `state` is modified.
    tracker: Mutex<OpTracker>,
}

/// Cloneable handle to one session's catalog state.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<Inner>,
}

impl CatalogStore {
    pub fn new(transport: Arc<dyn Transport>, groups: GroupCatalog, policy: StalePolicy) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            inner: Arc::new(Inner {
                fetcher: CategoryFetcher::new(transport),
                groups,
                policy,
                state,
                tracker: Mutex::new(OpTracker::default()),
            }),
        }
    }

    pub fn groups(&self) -> &GroupCatalog {
        &self.inner.groups
    }

    pub fn stale_policy(&self) -> StalePolicy {
        self.inner.policy
    }

    pub fn snapshot(&self) -> CatalogState {
        self.inner.state.borrow().clone()
    }

    /// Run a projection against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Receiver that observes every subsequent transition.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.inner.state.subscribe()
    }

    fn tracker(&self) -> MutexGuard<'_, OpTracker> {
        self.inner.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, op: Operation) -> Ticket {
        let mut tracker = self.tracker();
        let ticket = tracker.issue(op);
        self.inner.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        ticket
    }

    fn finish(&self, ticket: Ticket, apply: impl FnOnce(&mut CatalogState)) -> LoadOutcome {
        let mut tracker = self.tracker();
        let latest = tracker.settle(ticket);
        let still_loading = tracker.any_in_flight();
        let outcome = if latest || self.inner.policy == StalePolicy::LastApplied {
            LoadOutcome::Applied
        } else {
            LoadOutcome::Discarded
        };
        self.inner.state.send_modify(|s| {
            if outcome == LoadOutcome::Applied {
                apply(s);
            }
            s.loading = still_loading;
        });
        if outcome == LoadOutcome::Discarded {
            debug!(op = %ticket.op, "stale completion discarded");
        }
        outcome
    }

    /// Load every category of `group` and replace that group's products.
    ///
    /// On failure the previous products stay in place and the error slot is
    /// set. The returned error reports this call's failure even when the
    /// result was discarded as stale.
    pub async fn load_group(&self, group: CatalogGroup) -> Result<LoadOutcome, CatalogError> {
        let ticket = self.begin(Operation::Group(group));
        let slugs = self.inner.groups.slugs(group);
        info!(%group, categories = slugs.len(), "loading catalog group");

        match self.inner.fetcher.fetch_category_group(slugs).await {
            Ok(products) => {
                let count = products.len();
                let outcome = self.finish(ticket, move |s| *s.products_mut(group) = products);
                info!(%group, products = count, ?outcome, "catalog group loaded");
                Ok(outcome)
            }
            Err(err) => {
                let message = err
                    .user_message()
                    .unwrap_or_else(|| group.fallback_error().to_string());
                warn!(%group, error = %err, "catalog group failed");
                self.finish(ticket, move |s| s.error = Some(message));
                Err(err)
            }
        }
    }

    /// Load one product into the detail slot.
    ///
    /// A failed load keeps whatever product the slot already held.
    pub async fn load_product(&self, id: u64) -> Result<LoadOutcome, CatalogError> {
        let ticket = self.begin(Operation::Product);
        info!(id, "loading product");

        match self.inner.fetcher.fetch_product(id).await {
            Ok(product) => {
                let outcome = self.finish(ticket, move |s| s.current_product = Some(product));
                info!(id, ?outcome, "product loaded");
                Ok(outcome)
            }
            Err(err) => {
                let message = err
                    .user_message()
                    .unwrap_or_else(|| PRODUCT_FALLBACK_ERROR.to_string());
                warn!(id, error = %err, "product failed");
                self.finish(ticket, move |s| s.error = Some(message));
                Err(err)
            }
        }
    }

    pub fn clear_current_product(&self) {
        self.inner.state.send_modify(|s| s.current_product = None);
    }

    /// Launch [`load_group`](Self::load_group) on the runtime and return
    /// immediately. There is no cancellation; dropping the handle detaches.
    pub fn spawn_load_group(
        &self,
        group: CatalogGroup,
    ) -> JoinHandle<Result<LoadOutcome, CatalogError>> {
        let store = self.clone();
        tokio::spawn(async move { store.load_group(group).await })
    }

    pub fn spawn_load_product(&self, id: u64) -> JoinHandle<Result<LoadOutcome, CatalogError>> {
        let store = self.clone();
        tokio::spawn(async move { store.load_product(id).await })
    }
}
