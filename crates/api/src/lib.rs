//! HTTP API: bearer authentication middleware, request context and the
//! scope-check endpoints.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
