use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::render_page;

pub fn init_pages_router() -> Router<AppState> {
    Router::new()
        .route("/{section}", get(render_page))
        .route("/{section}/{*rest}", get(render_page))
}
