//! Route guard for page routes.
//!
//! Wraps a page router. The guarded path is the request path as the page
//! router sees it (the mount prefix is stripped by `nest`), so
//! `/pages/admin/gradebook` is checked as `/admin/gradebook`.
//!
//! Decisions follow [`AccessState`]:
//!
//! - `Unknown`: no permission session for the caller → `401`
//! - `Checking`: fetch in flight → page rendered (fail-open)
//! - `Allowed`: page rendered
//! - `Denied`: `403`
//!
//! Rendered pages carry an `x-access-check` header with the decision.

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use campusgate_core::{AccessState, AppError};

use crate::metrics::track_access_check;
use crate::middleware::auth::AuthUser;
use crate::modules::session::service::resolve_access;
use crate::state::AppState;

pub const ACCESS_CHECK_HEADER: &str = "x-access-check";

/// Middleware guarding page routes with the caller's permission store.
///
/// # Usage
///
/// ```rust,ignore
/// let pages = init_pages_router()
///     .layer(middleware::from_fn_with_state(state.clone(), require_page_access));
/// ```
pub async fn require_page_access(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    let auth_user = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let path = parts.uri.path().to_string();
    let decision = resolve_access(&state, auth_user.owner(), &path).await;
    track_access_check(decision);

    match decision {
        AccessState::Unknown => AppError::unauthorized(anyhow!(
            "No permission session. Start one with POST /api/session"
        ))
        .into_response(),
        AccessState::Denied => {
            warn!(owner = %auth_user.owner(), role = %auth_user.role(), path = %path, "Page access denied");
            AppError::forbidden(anyhow!("Access denied to {}", path)).into_response()
        }
        AccessState::Checking | AccessState::Allowed => {
            if decision == AccessState::Checking {
                debug!(owner = %auth_user.owner(), path = %path, "Rendering page while permissions load");
            }

            let req = Request::from_parts(parts, body);
            let mut response = next.run(req).await;
            response.headers_mut().insert(
                ACCESS_CHECK_HEADER,
                HeaderValue::from_static(decision.as_str()),
            );
            response
        }
    }
}
