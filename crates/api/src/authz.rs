//! Authorization guards for handlers.

use orgscope_auth::{AuthzError, UserPrincipal};

use crate::app::errors::ApiError;
use crate::context::CurrentUser;

/// The authenticated principal, or a forbidden error.
pub fn require_principal(user: &CurrentUser) -> Result<&UserPrincipal, ApiError> {
    user.context()
        .principal()
        .ok_or(ApiError::Forbidden(AuthzError::Unauthenticated))
}
