#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use campusgate::router::init_router;
use campusgate::state::AppState;
use campusgate_auth::create_access_token;
use campusgate_config::{AccessConfig, CorsConfig, JwtConfig};
use campusgate_core::lookup::{InMemoryPermissionLookup, LookupError, PermissionLookup};
use campusgate_core::permissions::RolePermissionRow;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

/// Lookup that always fails, as an unreachable backend would.
#[derive(Debug)]
pub struct FailingLookup;

#[async_trait]
impl PermissionLookup for FailingLookup {
    async fn permissions_for_role(
        &self,
        _role: &str,
    ) -> Result<Vec<RolePermissionRow>, LookupError> {
        Err(LookupError::backend("connection refused"))
    }
}

/// Lookup that never answers.
#[derive(Debug)]
pub struct HangingLookup;

#[async_trait]
impl PermissionLookup for HangingLookup {
    async fn permissions_for_role(
        &self,
        _role: &str,
    ) -> Result<Vec<RolePermissionRow>, LookupError> {
        std::future::pending().await
    }
}

pub fn portal_lookup() -> InMemoryPermissionLookup {
    InMemoryPermissionLookup::new()
        .with_role("admin", ["access_admin_daily_attendance", "messages:send"])
        .with_role("registrar", ["access_courses_catalog", "access_admin_enrollment"])
        .with_role("teacher", Vec::<String>::new())
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_state(lookup: Arc<dyn PermissionLookup>) -> AppState {
    let access_config = AccessConfig {
        fetch_timeout: Duration::from_secs(5),
        ..AccessConfig::default()
    };
    AppState::new(
        lookup,
        test_jwt_config(),
        access_config,
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    )
}

/// Returns a fresh owner id and a bearer token for `role`.
pub fn token_for(role: &str) -> (String, String) {
    let owner = Uuid::new_v4().to_string();
    let token = create_access_token(&owner, role, &test_jwt_config()).unwrap();
    (owner, token)
}

pub async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).unwrap();

    init_router(state.clone(), None)
        .oneshot(request)
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!(
            "Response body is not JSON: {:?}",
            String::from_utf8_lossy(&body)
        )
    })
}

/// Waits for the owner's background permission fetch to resolve.
pub async fn wait_until_loaded(state: &AppState, owner: &str) {
    let handle = state.sessions.get(owner).expect("session not started");
    for _ in 0..200 {
        if !handle.read().await.is_loading() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("permissions for {} never loaded", owner);
}
