use axum::{
    Extension, Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use orgscope_auth::{EntityScopeContext, ScopeResolver};

use crate::app::dto::ScopeCheckRequest;
use crate::app::errors::ApiError;
use crate::context::CurrentUser;

/// Evaluate one permission against one entity for the caller.
///
/// Answers 200 with the decision when granted and 403 with the same body
/// otherwise.
pub async fn check(
    Extension(resolver): Extension<ScopeResolver>,
    user: CurrentUser,
    body: Result<Json<ScopeCheckRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let entity = EntityScopeContext::from(req.entity);

    let decision = resolver.explain(user.context(), req.permission, &entity);
    let status = if decision.granted {
        StatusCode::OK
    } else {
        StatusCode::FORBIDDEN
    };

    Ok((status, Json(decision)).into_response())
}
