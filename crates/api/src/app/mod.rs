use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use orgscope_auth::ScopeResolver;

use crate::config::ApiConfig;
use crate::middleware::{self, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;

pub fn build_app(config: ApiConfig) -> Router {
    let auth_state = AuthState::from(&config);

    // Every route below sees a SecurityContext, possibly anonymous.
    let scoped = routes::router()
        .layer(Extension(ScopeResolver::new()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(scoped)
        .layer(ServiceBuilder::new())
}
