use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{check_access, end_session, get_session, start_session};

pub fn init_session_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_session).post(start_session).delete(end_session),
    )
}

pub fn init_access_router() -> Router<AppState> {
    Router::new().route("/check", get(check_access))
}
