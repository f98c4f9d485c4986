//! Role-permission lookup seam.
//!
//! The permission store never talks to a backend directly; initialization
//! goes through a [`PermissionLookup`]. The PostgreSQL implementation lives in
//! `campusgate-db`, the in-memory one below backs tests and local setups.

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::permissions::RolePermissionRow;

/// Error type for permission lookups.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Permission backend error: {0}")]
    Backend(String),

    #[error("Malformed permission response: {0}")]
    Malformed(String),

    #[error("Permission lookup timed out after {0:?}")]
    Timeout(Duration),
}

impl LookupError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

#[async_trait]
pub trait PermissionLookup: Send + Sync + Debug {
    /// Returns the permission rows granted to `role`.
    ///
    /// An unknown role yields an empty list, not an error.
    async fn permissions_for_role(&self, role: &str)
    -> Result<Vec<RolePermissionRow>, LookupError>;
}

/// Fixed role → permission-name table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPermissionLookup {
    grants: HashMap<String, Vec<String>>,
}

impl InMemoryPermissionLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role<I, S>(mut self, role: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grants
            .entry(role.into())
            .or_default()
            .extend(permissions.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl PermissionLookup for InMemoryPermissionLookup {
    async fn permissions_for_role(
        &self,
        role: &str,
    ) -> Result<Vec<RolePermissionRow>, LookupError> {
        Ok(self
            .grants
            .get(role)
            .map(|names| names.iter().cloned().map(RolePermissionRow::new).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_lookup_returns_grants() {
        let lookup = InMemoryPermissionLookup::new()
            .with_role("admin", ["access_admin", "access_courses"])
            .with_role("admin", ["access_messages"]);

        let rows = lookup.permissions_for_role("admin").await.unwrap();
        let names: Vec<_> = rows
            .into_iter()
            .filter_map(|row| row.permission_name)
            .collect();
        assert_eq!(names, vec!["access_admin", "access_courses", "access_messages"]);
    }

    #[tokio::test]
    async fn test_in_memory_lookup_unknown_role_is_empty() {
        let lookup = InMemoryPermissionLookup::new();
        assert!(lookup.permissions_for_role("nobody").await.unwrap().is_empty());
    }

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "Permission lookup timed out after 5s");

        let err = LookupError::backend("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }
}
