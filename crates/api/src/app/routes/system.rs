use axum::{Json, http::StatusCode};

use crate::app::dto::MeResponse;
use crate::app::errors::ApiError;
use crate::authz::require_principal;
use crate::context::CurrentUser;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn me(user: CurrentUser) -> Result<Json<MeResponse>, ApiError> {
    let principal = require_principal(&user)?;
    Ok(Json(MeResponse::from(principal)))
}
