//! # Campusgate DB
//!
//! Database pool and the PostgreSQL role-permission lookup.
//!
//! # Example
//!
//! ```ignore
//! use campusgate_db::{PgPermissionLookup, init_db_pool};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool().await?;
//!     let lookup = PgPermissionLookup::new(pool);
//!     Ok(())
//! }
//! ```

use std::env;

use anyhow::Context;

pub mod permissions;

pub use permissions::{PgPermissionLookup, grant_permission};

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// The returned pool is cheaply cloneable and should be created once during
/// startup.
///
/// # Errors
///
/// Fails if `DATABASE_URL` is not set or the connection cannot be established.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
