//! Permission names and the page paths they grant.
//!
//! Page access is granted through permissions named `access_<segment>[_<segment>...]`.
//! Each such name unlocks two paths:
//!
//! - the full path: `/` followed by the segments joined with `/`
//!   (`access_admin_daily_attendance` → `/admin/daily/attendance`)
//! - the root path: `/` followed by the first segment (`/admin`)
//!
//! Names without the `access_` prefix belong to other subsystems and are
//! ignored here.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix shared by all page-access permission names.
pub const ACCESS_PREFIX: &str = "access_";

/// A parsed `access_*` permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPermission {
    root: String,
    rest: Vec<String>,
}

impl AccessPermission {
    /// Parses a permission name.
    ///
    /// Returns `None` when the name lacks the `access_` prefix or has no
    /// segments after it. Empty segments (`access__admin`, `access_admin_`)
    /// are skipped so derived paths never contain `//` or a trailing slash.
    pub fn parse(name: &str) -> Option<Self> {
        let body = name.strip_prefix(ACCESS_PREFIX)?;
        let mut segments = body.split('_').filter(|segment| !segment.is_empty());

        let root = segments.next()?.to_string();
        let rest = segments.map(str::to_string).collect();

        Some(Self { root, rest })
    }

    /// `/` + all segments joined with `/`.
    pub fn full_path(&self) -> String {
        let mut path = format!("/{}", self.root);
        for segment in &self.rest {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    /// `/` + the first segment.
    pub fn root_path(&self) -> String {
        format!("/{}", self.root)
    }
}

/// One row of a role-permission lookup.
///
/// The backend joins role grants to the permission catalogue, so the name can
/// be missing when a grant points at a deleted permission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionRow {
    pub permission_name: Option<String>,
}

impl RolePermissionRow {
    pub fn new(permission_name: impl Into<String>) -> Self {
        Self {
            permission_name: Some(permission_name.into()),
        }
    }
}

/// Drops rows without a usable permission name and returns the trimmed names.
pub fn valid_permission_names(rows: Vec<RolePermissionRow>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|row| row.permission_name)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Derives the allowed-path list for a set of permission names.
///
/// For every `access_*` name the full path is emitted, then the root path.
/// The result is deduplicated, keeping the first occurrence.
pub fn derive_allowed_paths<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut paths: Vec<String> = Vec::new();

    for name in names {
        let name = name.as_ref();
        let Some(permission) = AccessPermission::parse(name) else {
            debug!(permission = %name, "Skipping non-access permission");
            continue;
        };

        for path in [permission.full_path(), permission.root_path()] {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}
