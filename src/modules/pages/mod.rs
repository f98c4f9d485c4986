//! Guarded page tree.
//!
//! Stand-in for the portal's pages: each route answers with the page it
//! resolved so guard decisions can be observed end to end.

pub mod controller;
pub mod router;
