//! # Campusgate Auth
//!
//! Bearer token handling for Campusgate.
//!
//! Tokens are issued by the portal's login service and carry the subject
//! (session owner) and the role whose permissions the session loads.
//!
//! - [`claims`]: Token claim structure
//! - [`jwt`]: Token creation and verification

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
