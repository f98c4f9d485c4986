use std::sync::Arc;

use campusgate_config::{AccessConfig, CorsConfig, JwtConfig};
use campusgate_core::{AccessPolicy, PermissionLookup};
use campusgate_db::{PgPermissionLookup, init_db_pool};

use crate::sessions::SessionRegistry;

#[derive(Clone, Debug)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub access_config: AccessConfig,
    pub cors_config: CorsConfig,
    pub lookup: Arc<dyn PermissionLookup>,
    pub policy: Arc<AccessPolicy>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(
        lookup: Arc<dyn PermissionLookup>,
        jwt_config: JwtConfig,
        access_config: AccessConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let policy = AccessPolicy::new(access_config.bypass_segments.iter().cloned());
        Self {
            jwt_config,
            access_config,
            cors_config,
            lookup,
            policy: Arc::new(policy),
            sessions: Arc::new(SessionRegistry::new()),
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let pool = init_db_pool().await?;

    Ok(AppState::new(
        Arc::new(PgPermissionLookup::new(pool)),
        JwtConfig::from_env(),
        AccessConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
