//! Access decisions for route guards.
//!
//! A guarded page moves through [`AccessState`]:
//!
//! ```text
//! Unknown ──session starts──▶ Checking ──fetch resolves──▶ Allowed | Denied
//! ```
//!
//! `Checking` renders the page optimistically (fail-open) until the
//! permission fetch completes. Once resolved, [`AccessPolicy`] decides: paths
//! with a bypass segment (teacher, student and parent portals by default) are
//! always allowed, everything else goes through the store's allow-list.

use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::store::PermissionStore;

/// Segments whose portals are not governed by the page allow-list.
pub const DEFAULT_BYPASS_SEGMENTS: &[&str] = &["teacher", "student", "parent"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    /// No permission session exists for the caller.
    Unknown,
    /// The permission fetch is still in flight.
    Checking,
    Allowed,
    Denied,
}

impl AccessState {
    /// Whether the guarded content may be rendered in this state.
    pub fn renders_page(self) -> bool {
        matches!(self, AccessState::Checking | AccessState::Allowed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessState::Unknown => "unknown",
            AccessState::Checking => "checking",
            AccessState::Allowed => "allowed",
            AccessState::Denied => "denied",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    bypass_segments: Vec<String>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BYPASS_SEGMENTS.iter().copied())
    }
}

impl AccessPolicy {
    pub fn new<I, S>(bypass_segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bypass_segments: bypass_segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn bypass_segments(&self) -> &[String] {
        &self.bypass_segments
    }

    /// True when any `/`-delimited segment of `path` is a bypass segment.
    pub fn is_bypassed(&self, path: &str) -> bool {
        path.split('/')
            .any(|segment| self.bypass_segments.iter().any(|bypass| bypass == segment))
    }

    /// Resolved-state access check: bypass first, then the allow-list.
    pub fn has_access(&self, store: &PermissionStore, path: &str) -> bool {
        if self.is_bypassed(path) {
            debug!(path = %path, "Path bypasses the page allow-list");
            return true;
        }
        store.check_permission(path)
    }

    pub fn evaluate(&self, store: Option<&PermissionStore>, path: &str) -> AccessState {
        let Some(store) = store else {
            return AccessState::Unknown;
        };

        if store.is_loading() {
            AccessState::Checking
        } else if self.has_access(store, path) {
            AccessState::Allowed
        } else {
            AccessState::Denied
        }
    }
}
