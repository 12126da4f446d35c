use axum::{
    Router,
    routing::{get, post},
};

pub mod scope;
pub mod system;

/// Router for endpoints behind the auth middleware.
pub fn router() -> Router {
    Router::new()
        .route("/me", get(system::me))
        .route("/scope/check", post(scope::check))
}
