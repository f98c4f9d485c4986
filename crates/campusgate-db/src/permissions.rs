//! Role-permission lookup backed by PostgreSQL.
//!
//! Grants live in `role_permissions`, joined to `roles` (matched by name or
//! id) and to the `permissions` catalogue. The catalogue side is a left join:
//! a grant whose permission row is gone comes back with a `NULL` name and is
//! dropped during validation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use campusgate_core::lookup::{LookupError, PermissionLookup};
use campusgate_core::permissions::RolePermissionRow;

const ROLE_PERMISSIONS_QUERY: &str = r#"
    SELECT p.permission_name
    FROM role_permissions rp
    JOIN roles r ON r.id = rp.role_id
    LEFT JOIN permissions p ON p.id = rp.permission_id
    WHERE r.name = $1 OR r.id::text = $1
    ORDER BY p.permission_name
"#;

#[derive(Debug, Clone)]
pub struct PgPermissionLookup {
    pool: PgPool,
}

impl PgPermissionLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionLookup for PgPermissionLookup {
    #[instrument(skip(self), fields(db.system = "postgresql", db.sql.table = "role_permissions"))]
    async fn permissions_for_role(
        &self,
        role: &str,
    ) -> Result<Vec<RolePermissionRow>, LookupError> {
        let rows: Vec<(Option<String>,)> = sqlx::query_as(ROLE_PERMISSIONS_QUERY)
            .bind(role)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                    LookupError::Malformed(e.to_string())
                }
                _ => LookupError::backend(&e),
            })?;

        debug!(role = %role, rows = rows.len(), "Fetched role permissions");

        Ok(rows
            .into_iter()
            .map(|(permission_name,)| RolePermissionRow { permission_name })
            .collect())
    }
}

/// Grants `permission_name` to `role`, creating the role and permission rows
/// when missing. Returns `true` when a new grant was inserted.
#[instrument(skip(pool))]
pub async fn grant_permission(
    pool: &PgPool,
    role: &str,
    permission_name: &str,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let role_id: (sqlx::types::Uuid,) = sqlx::query_as(
        r#"INSERT INTO roles (name) VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id"#,
    )
    .bind(role)
    .fetch_one(&mut *tx)
    .await?;

    let permission_id: (sqlx::types::Uuid,) = sqlx::query_as(
        r#"INSERT INTO permissions (permission_name) VALUES ($1)
        ON CONFLICT (permission_name) DO UPDATE SET permission_name = EXCLUDED.permission_name
        RETURNING id"#,
    )
    .bind(permission_name)
    .fetch_one(&mut *tx)
    .await?;

    let inserted = sqlx::query(
        r#"INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)
        ON CONFLICT DO NOTHING"#,
    )
    .bind(role_id.0)
    .bind(permission_id.0)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;

    Ok(inserted > 0)
}
