//! Permission initialization: fetch, derive, set.
//!
//! A failed or timed-out fetch never leaves a session fail-open: the store is
//! populated with an empty allow-list instead (default-deny).

use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::lookup::{LookupError, PermissionLookup};
use crate::permissions::{derive_allowed_paths, valid_permission_names};
use crate::store::{FetchTicket, PermissionStore};

/// What a permission fetch did to its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The store now holds this many allowed paths.
    Granted(usize),
    /// The lookup failed and the store was set to an empty allow-list.
    DefaultDeny,
    /// A reset or newer fetch happened first; the result was discarded.
    Superseded,
}

impl FetchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchOutcome::Granted(_) => "granted",
            FetchOutcome::DefaultDeny => "default_deny",
            FetchOutcome::Superseded => "superseded",
        }
    }
}

/// Fetches `role`'s permissions and derives its allowed paths.
#[instrument(skip(lookup))]
pub async fn load_allowed_paths(
    lookup: &dyn PermissionLookup,
    role: &str,
    timeout: Duration,
) -> Result<Vec<String>, LookupError> {
    let rows = tokio::time::timeout(timeout, lookup.permissions_for_role(role))
        .await
        .map_err(|_| LookupError::Timeout(timeout))??;

    let names = valid_permission_names(rows);
    Ok(derive_allowed_paths(&names))
}

/// Completes the fetch identified by `ticket`.
#[instrument(skip(store, lookup), fields(generation = ticket.generation()))]
pub async fn refresh_permissions(
    store: &RwLock<PermissionStore>,
    ticket: FetchTicket,
    lookup: &dyn PermissionLookup,
    role: &str,
    timeout: Duration,
) -> FetchOutcome {
    let (paths, outcome) = match load_allowed_paths(lookup, role, timeout).await {
        Ok(paths) => {
            let count = paths.len();
            (paths, FetchOutcome::Granted(count))
        }
        Err(e) => {
            warn!(role = %role, error = %e, "Permission fetch failed, denying all pages");
            (Vec::new(), FetchOutcome::DefaultDeny)
        }
    };

    if !store.write().await.apply_fetch(ticket, &paths) {
        debug!(role = %role, "Discarding superseded permission fetch");
        return FetchOutcome::Superseded;
    }

    info!(role = %role, allowed_pages = paths.len(), "Permissions loaded");
    outcome
}

/// Starts a fetch on `store` and waits for it to complete.
pub async fn initialize_permissions(
    store: &RwLock<PermissionStore>,
    lookup: &dyn PermissionLookup,
    role: &str,
    timeout: Duration,
) -> FetchOutcome {
    let ticket = store.write().await.begin_fetch();
    refresh_permissions(store, ticket, lookup, role, timeout).await
}
