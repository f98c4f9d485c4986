//! Request authentication and page guarding.
//!
//! - [`auth`]: Bearer token extractor
//! - [`guard`]: Route guard middleware for page routes

pub mod auth;
pub mod guard;
