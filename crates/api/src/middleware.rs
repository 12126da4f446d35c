use axum::{
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use orgscope_auth::{SecurityContext, authenticate_lenient, extract_bearer};

use crate::app::errors::ApiError;
use crate::config::{ApiConfig, InvalidTokenPolicy};

#[derive(Debug, Clone, Copy)]
pub struct AuthState {
    pub invalid_token: InvalidTokenPolicy,
    pub enforce_expiry: bool,
}

impl From<&ApiConfig> for AuthState {
    fn from(config: &ApiConfig) -> Self {
        Self {
            invalid_token: config.invalid_token,
            enforce_expiry: config.enforce_expiry,
        }
    }
}

/// Installs a [`SecurityContext`] on every request.
///
/// Without a bearer credential the request proceeds anonymously. An unusable
/// credential is anonymous too, unless the policy says `reject`.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = match bearer_token(req.headers()) {
        Some(token) => resolve(&state, token)?,
        None => SecurityContext::anonymous(),
    };

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    extract_bearer(header.trim())
}

fn resolve(state: &AuthState, token: &str) -> Result<SecurityContext, ApiError> {
    let principal = match authenticate_lenient(token) {
        Ok(Some(principal)) => principal,
        // Unparsable payload: no usable credential, never rejected.
        Ok(None) => return Ok(SecurityContext::anonymous()),
        Err(err) => return invalid(state, err.to_string()),
    };

    if state.enforce_expiry {
        if let Err(err) = principal.payload().validate_time_window(Utc::now()) {
            return invalid(state, err.to_string());
        }
    }

    tracing::debug!(user_id = %principal.id, "request authenticated");
    Ok(SecurityContext::authenticated(principal, token))
}

fn invalid(state: &AuthState, reason: String) -> Result<SecurityContext, ApiError> {
    match state.invalid_token {
        InvalidTokenPolicy::Anonymous => {
            tracing::debug!(%reason, "bearer credential ignored");
            Ok(SecurityContext::anonymous())
        }
        InvalidTokenPolicy::Reject => {
            tracing::debug!(%reason, "bearer credential rejected");
            Err(ApiError::Unauthorized(reason))
        }
    }
}
