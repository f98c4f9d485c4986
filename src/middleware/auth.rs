use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use campusgate_auth::{Claims, verify_token};
use campusgate_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer JWT and provides its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Session owner id (the token subject).
    pub fn owner(&self) -> &str {
        &self.0.sub
    }

    pub fn role(&self) -> &str {
        &self.0.role
    }

    /// Token expiry as a Unix timestamp.
    pub fn expires_at(&self) -> usize {
        self.0.exp
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid authorization header format")))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
