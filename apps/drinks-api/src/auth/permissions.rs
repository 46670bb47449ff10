use crate::auth::token::Claims;
use crate::auth::AuthError;

// Permission strings issued by the identity provider.
pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";

/// Check that the claim set grants `required`.
///
/// A token without a `permissions` claim is rejected outright. An empty
/// `required` string succeeds once that claim exists.
pub fn check_permission(required: &str, claims: &Claims) -> Result<(), AuthError> {
    let Some(permissions) = claims.permissions.as_ref() else {
        return Err(AuthError::PermissionsClaimMissing);
    };

    if required.is_empty() {
        return Ok(());
    }

    if !permissions.iter().any(|p| p == required) {
        return Err(AuthError::PermissionDenied(required.to_string()));
    }

    Ok(())
}
