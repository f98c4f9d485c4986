//! Per-session permission store.
//!
//! A [`PermissionStore`] starts out loading with an empty allow-list, is
//! populated once by the permission fetch and answers "may this session open
//! this path" for the route guard. Every decision is default-deny.

use serde::Serialize;
use utoipa::ToSchema;

/// Ordered, deduplicated list of allowed path prefixes.
///
/// Entries never end with `/` and are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowedPathSet(Vec<String>);

impl AllowedPathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set, trimming trailing slashes and dropping duplicates and
    /// empty entries. The first occurrence of a path keeps its position.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<String> = Vec::new();
        for path in paths {
            let path = path.as_ref().trim_end_matches('/');
            if path.is_empty() || entries.iter().any(|entry| entry == path) {
                continue;
            }
            entries.push(path.to_string());
        }
        Self(entries)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Matches `path` against the set.
    ///
    /// A path is allowed when any entry
    /// - equals it verbatim,
    /// - has a last segment equal to the path's first segment (root shortcut), or
    /// - is a prefix of it followed by `/`.
    pub fn allows(&self, path: &str) -> bool {
        let first = first_segment(path);

        self.0.iter().any(|entry| {
            entry == path
                || first.is_some_and(|segment| last_segment(entry) == Some(segment))
                || path
                    .strip_prefix(entry.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// Text between the leading slash and the next slash.
fn first_segment(path: &str) -> Option<&str> {
    path.strip_prefix('/')?
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

fn last_segment(entry: &str) -> Option<&str> {
    entry.rsplit('/').next().filter(|segment| !segment.is_empty())
}

/// Identifies one permission fetch.
///
/// A fetch result is only applied when its ticket is still the newest one the
/// store handed out; resets and newer fetches supersede it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Serializable view of a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PermissionSnapshot {
    pub loading: bool,
    pub allowed_pages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionStore {
    allowed: AllowedPathSet,
    loading: bool,
    generation: u64,
}

impl Default for PermissionStore {
    fn default() -> Self {
        Self {
            allowed: AllowedPathSet::new(),
            loading: true,
            generation: 0,
        }
    }
}

impl PermissionStore {
    /// Creates an empty store in the loading state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the allow-list and marks the store as loaded.
    pub fn set_permissions<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed = AllowedPathSet::from_paths(paths);
        self.loading = false;
    }

    pub fn check_permission(&self, path: &str) -> bool {
        self.allowed.allows(path)
    }

    /// Clears the allow-list and returns to the loading state.
    ///
    /// Any fetch started before the reset is superseded.
    pub fn reset(&mut self) {
        self.allowed = AllowedPathSet::new();
        self.loading = true;
        self.generation += 1;
    }

    /// Resets the store and hands out the ticket for a new fetch.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.reset();
        FetchTicket(self.generation)
    }

    /// Applies a fetch result if `ticket` is still current.
    ///
    /// Returns `false` and leaves the store untouched for a stale ticket.
    pub fn apply_fetch<I, S>(&mut self, ticket: FetchTicket, paths: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if ticket.0 != self.generation {
            return false;
        }
        self.set_permissions(paths);
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn allowed_pages(&self) -> &[String] {
        self.allowed.as_slice()
    }

    pub fn snapshot(&self) -> PermissionSnapshot {
        PermissionSnapshot {
            loading: self.loading,
            allowed_pages: self.allowed.as_slice().to_vec(),
        }
    }
}
