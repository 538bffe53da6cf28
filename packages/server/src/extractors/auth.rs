use axum::{extract::FromRequestParts, http::request::Parts};

use crate::autopilot::Tenant;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Tenant extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication. All data the
/// handler touches is scoped to `tenant`.
pub struct TenantUser {
    pub tenant: Tenant,
}

impl FromRequestParts<AppState> for TenantUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;
        let tenant = Tenant::new(claims.sub).map_err(|_| AppError::TokenInvalid)?;

        Ok(TenantUser { tenant })
    }
}
