//! # Campusgate Core
//!
//! Path-based access control for the Campusgate learning-management portal.
//!
//! This crate provides the pieces every page guard relies on:
//!
//! - [`permissions`]: Parsing of `access_*` permission names and path derivation
//! - [`store`]: The per-session [`PermissionStore`] and its allowed-path set
//! - [`guard`]: The [`AccessPolicy`] and the [`AccessState`] machine used by route guards
//! - [`lookup`]: The [`PermissionLookup`] seam to the role-permission backend
//! - [`init`]: Fetch-derive-set initialization of a store
//! - [`errors`]: Application error type with HTTP response conversion
//!
//! # Example
//!
//! ```
//! use campusgate_core::permissions::derive_allowed_paths;
//! use campusgate_core::store::PermissionStore;
//!
//! let mut store = PermissionStore::new();
//! store.set_permissions(derive_allowed_paths(["access_admin_daily_attendance"]));
//!
//! assert!(store.check_permission("/admin/daily/attendance"));
//! assert!(store.check_permission("/admin/other"));
//! assert!(!store.check_permission("/teacher/grades"));
//! ```

pub mod errors;
pub mod guard;
pub mod init;
pub mod lookup;
pub mod permissions;
pub mod store;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use guard::{AccessPolicy, AccessState};
pub use init::{FetchOutcome, initialize_permissions, load_allowed_paths, refresh_permissions};
pub use lookup::{InMemoryPermissionLookup, LookupError, PermissionLookup};
pub use permissions::{AccessPermission, RolePermissionRow, derive_allowed_paths};
pub use store::{AllowedPathSet, FetchTicket, PermissionSnapshot, PermissionStore};
