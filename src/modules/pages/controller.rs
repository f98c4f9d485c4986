use axum::{Json, http::Uri};
use serde::Serialize;

use crate::middleware::auth::AuthUser;

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub page: String,
    pub role: String,
}

pub async fn render_page(uri: Uri, auth_user: AuthUser) -> Json<PageResponse> {
    Json(PageResponse {
        page: uri.path().to_string(),
        role: auth_user.role().to_string(),
    })
}
