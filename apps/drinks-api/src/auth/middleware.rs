//! Bearer token verification as an Axum extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::token::{self, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Verified claims extracted from the `Authorization: Bearer <token>` header.
///
/// Use as an extractor in any handler that requires authentication; the
/// handler then checks its route's permission against the claims.
#[derive(Debug, Clone)]
pub struct AuthClaims {
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthClaims {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = token::extract_bearer_token(header)?;

        let claims = token::verify_token(
            token,
            &state.jwks,
            &state.config.api_audience,
            &state.config.issuer(),
        )
        .await?;

        Ok(AuthClaims { claims })
    }
}
