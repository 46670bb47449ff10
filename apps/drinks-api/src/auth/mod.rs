//! Request authorization: bearer extraction, key-set retrieval, RS256
//! verification, and permission checks.

pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod token;

use axum::http::StatusCode;

/// Tagged failure modes of the authorization pipeline.
///
/// Each kind carries the HTTP status it maps to and a machine-readable code
/// mirroring the identity provider's conventions.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization missing in header.")]
    MissingHeader,
    #[error("Header malformed.")]
    MalformedHeader,
    #[error("Bearer type missing.")]
    UnsupportedScheme,
    #[error("Unable to parse authentication token.")]
    MalformedToken,
    #[error("Unable to fetch the signing key set.")]
    KeySetUnavailable,
    #[error("Unable to find the appropriate key.")]
    KeyNotFound,
    #[error("Token signature verification failed.")]
    BadSignature,
    #[error("Token expired.")]
    TokenExpired,
    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,
    #[error("Permissions not in decoded JWT.")]
    PermissionsClaimMissing,
    #[error("Permission: {0} not in decoded JWT.")]
    PermissionDenied(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingHeader
            | Self::MalformedHeader
            | Self::UnsupportedScheme
            | Self::BadSignature
            | Self::TokenExpired
            | Self::InvalidClaims => StatusCode::UNAUTHORIZED,
            Self::MalformedToken | Self::KeyNotFound | Self::PermissionsClaimMissing => {
                StatusCode::BAD_REQUEST
            }
            Self::KeySetUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader | Self::MalformedHeader | Self::UnsupportedScheme => {
                "invalid_header"
            }
            Self::MalformedToken | Self::KeyNotFound => "invalid_header",
            Self::KeySetUnavailable => "key_set_unavailable",
            Self::BadSignature => "invalid_signature",
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims => "invalid_claims",
            Self::PermissionsClaimMissing | Self::PermissionDenied(_) => "invalid_jwt",
        }
    }
}
