//! Registry of per-session permission stores.
//!
//! Each authenticated subject owns one [`PermissionStore`]. Handlers and the
//! route guard share it through a [`StoreHandle`]; only the session service
//! mutates it.
//!
//! Entries remember the `exp` of the token that last started them. Owners who
//! never log out are dropped by [`spawn_session_sweeper`] once that token has
//! expired.

use std::sync::Arc;
use std::time::Duration;

use campusgate_core::PermissionStore;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub type StoreHandle = Arc<RwLock<PermissionStore>>;

#[derive(Debug)]
struct SessionEntry {
    handle: StoreHandle,
    /// Unix timestamp after which the session's token is no longer valid.
    expires_at: usize,
}

#[derive(Debug, Default)]
pub struct SessionRegistry {
    stores: DashMap<String, SessionEntry>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, owner: &str) -> Option<StoreHandle> {
        self.stores
            .get(owner)
            .map(|entry| Arc::clone(&entry.value().handle))
    }

    /// Returns the owner's store, creating a loading one if absent.
    ///
    /// The entry's expiry is moved to `expires_at` either way.
    pub fn get_or_create(&self, owner: &str, expires_at: usize) -> StoreHandle {
        let mut entry = self
            .stores
            .entry(owner.to_string())
            .or_insert_with(|| SessionEntry {
                handle: Arc::new(RwLock::new(PermissionStore::new())),
                expires_at,
            });
        entry.expires_at = expires_at;
        Arc::clone(&entry.handle)
    }

    pub fn remove(&self, owner: &str) -> Option<StoreHandle> {
        self.stores.remove(owner).map(|(_, entry)| entry.handle)
    }

    /// Drops every session whose token expired at or before `now`.
    /// Returns how many were dropped.
    pub fn sweep_expired(&self, now: usize) -> usize {
        let mut removed = 0;
        self.stores.retain(|owner, entry| {
            let live = entry.expires_at > now;
            if !live {
                debug!(owner = %owner, "Dropping expired permission session");
                removed += 1;
            }
            live
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

/// Periodically drops sessions whose token has expired.
pub fn spawn_session_sweeper(registry: Arc<SessionRegistry>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = registry.sweep_expired(Utc::now().timestamp() as usize);
            if removed > 0 {
                info!(removed, remaining = registry.len(), "Swept expired permission sessions");
            }
        }
    })
}
