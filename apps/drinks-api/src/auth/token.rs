//! Bearer token extraction and RS256 JWT verification.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::jwks::JwksClient;
use crate::auth::AuthError;

/// Decoded access-token claims, owned by the request that verified them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    /// Permission strings granted by the identity provider. `None` when the
    /// claim is absent entirely, which the permission check rejects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    /// Any other claims present in the token.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Pull the bearer token out of an `Authorization` header value.
///
/// The header is split on whitespace and must be exactly
/// `Bearer <token>`, scheme matched case-insensitively.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => {
            if !scheme.eq_ignore_ascii_case("bearer") {
                return Err(AuthError::UnsupportedScheme);
            }
            Ok(token)
        }
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Verify a bearer token against the provider key set and return its claims.
///
/// Checks, in order:
///   1. token header parses and names a `kid`
///   2. a key with that `kid` exists in the key set
///   3. RS256 signature
///   4. `exp` (no leeway), `aud`, `iss`
///
/// Key lookup strictly precedes signature verification, so an unknown `kid`
/// surfaces as `KeyNotFound` rather than `BadSignature`.
pub async fn verify_token(
    token: &str,
    jwks: &JwksClient,
    audience: &str,
    issuer: &str,
) -> Result<Claims, AuthError> {
    let header = jsonwebtoken::decode_header(token).map_err(|e| {
        tracing::debug!(?e, "token header decode failed");
        AuthError::MalformedToken
    })?;
    let kid = header.kid.ok_or(AuthError::MalformedToken)?;

    let key = jwks.get_key(&kid).await?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.leeway = 0;
    validation.set_audience(&[audience]);
    validation.set_issuer(&[issuer]);

    let data = jsonwebtoken::decode::<Claims>(token, &key, &validation).map_err(|e| {
        tracing::debug!(?e, "token validation failed");
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::InvalidClaims,
            ErrorKind::InvalidSignature => AuthError::BadSignature,
            _ => AuthError::MalformedToken,
        }
    })?;

    Ok(data.claims)
}
