use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, info, instrument};

use campusgate_core::{AccessState, AppError, PermissionSnapshot, refresh_permissions};

use crate::metrics::track_permission_fetch;
use crate::state::AppState;

/// Starts (or restarts) `owner`'s permission session for `role`.
///
/// The store is reset to loading and the fetch runs in the background; the
/// returned snapshot is the loading state. A restart supersedes any fetch
/// still in flight for the same owner. The session lives until logout or
/// until `expires_at` (the token's `exp`) has passed.
#[instrument(skip(state))]
pub async fn start_session(
    state: &AppState,
    owner: &str,
    role: &str,
    expires_at: usize,
) -> PermissionSnapshot {
    let handle = state.sessions.get_or_create(owner, expires_at);

    let (ticket, snapshot) = {
        let mut store = handle.write().await;
        let ticket = store.begin_fetch();
        (ticket, store.snapshot())
    };

    let lookup = Arc::clone(&state.lookup);
    let timeout = state.access_config.fetch_timeout;
    let owner = owner.to_string();
    let role = role.to_string();

    tokio::spawn(async move {
        let outcome = refresh_permissions(&handle, ticket, lookup.as_ref(), &role, timeout).await;
        track_permission_fetch(outcome);
        info!(owner = %owner, role = %role, outcome = outcome.as_str(), "Permission session resolved");
    });

    snapshot
}

#[instrument(skip(state))]
pub async fn session_snapshot(state: &AppState, owner: &str) -> Result<PermissionSnapshot, AppError> {
    let handle = state
        .sessions
        .get(owner)
        .ok_or_else(|| AppError::not_found(anyhow!("No permission session")))?;

    let snapshot = handle.read().await.snapshot();
    Ok(snapshot)
}

/// Resets and forgets `owner`'s store. A no-op without a session.
#[instrument(skip(state))]
pub async fn end_session(state: &AppState, owner: &str) {
    let Some(handle) = state.sessions.remove(owner) else {
        debug!(owner = %owner, "No permission session to end");
        return;
    };

    handle.write().await.reset();
    info!(owner = %owner, "Permission session ended");
}

/// Resolves the access state of `owner` for `path`.
pub async fn resolve_access(state: &AppState, owner: &str, path: &str) -> AccessState {
    match state.sessions.get(owner) {
        Some(handle) => {
            let store = handle.read().await;
            state.policy.evaluate(Some(&*store), path)
        }
        None => state.policy.evaluate(None, path),
    }
}
