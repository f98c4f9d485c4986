use anyhow::anyhow;
use axum::{Json, extract::State, http::StatusCode};

use campusgate_core::AppError;

use crate::metrics::track_access_check;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedQuery;

use super::model::{AccessCheckResponse, CheckAccessParams, PermissionSnapshot};
use super::service;

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[utoipa::path(
    post,
    path = "/api/session",
    responses(
        (status = 202, description = "Permission fetch started", body = PermissionSnapshot),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Session",
    security(("bearer_auth" = []))
)]
pub async fn start_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> (StatusCode, Json<PermissionSnapshot>) {
    let snapshot = service::start_session(
        &state,
        auth_user.owner(),
        auth_user.role(),
        auth_user.expires_at(),
    )
    .await;
    (StatusCode::ACCEPTED, Json(snapshot))
}

#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current permission state", body = PermissionSnapshot),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No permission session", body = ErrorResponse)
    ),
    tag = "Session",
    security(("bearer_auth" = []))
)]
pub async fn get_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<PermissionSnapshot>, AppError> {
    let snapshot = service::session_snapshot(&state, auth_user.owner()).await?;
    Ok(Json(snapshot))
}

#[utoipa::path(
    delete,
    path = "/api/session",
    responses(
        (status = 204, description = "Permission session cleared"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Session",
    security(("bearer_auth" = []))
)]
pub async fn end_session(State(state): State<AppState>, auth_user: AuthUser) -> StatusCode {
    service::end_session(&state, auth_user.owner()).await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/api/access/check",
    params(CheckAccessParams),
    responses(
        (status = 200, description = "Access state for the path", body = AccessCheckResponse),
        (status = 400, description = "Invalid path", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Session",
    security(("bearer_auth" = []))
)]
pub async fn check_access(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedQuery(params): ValidatedQuery<CheckAccessParams>,
) -> Result<Json<AccessCheckResponse>, AppError> {
    if !params.path.starts_with('/') {
        return Err(AppError::bad_request(anyhow!("path must start with '/'")));
    }

    let access = service::resolve_access(&state, auth_user.owner(), &params.path).await;
    track_access_check(access);

    Ok(Json(AccessCheckResponse {
        path: params.path,
        state: access,
    }))
}
