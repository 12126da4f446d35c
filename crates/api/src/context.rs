use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use orgscope_auth::SecurityContext;

/// The request's [`SecurityContext`] as a handler argument.
///
/// Routes mounted outside the auth middleware see an anonymous context.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub SecurityContext);

impl CurrentUser {
    pub fn context(&self) -> &SecurityContext {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<SecurityContext>().cloned().unwrap_or_default();
        Ok(Self(ctx))
    }
}
