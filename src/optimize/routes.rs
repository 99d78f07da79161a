// src/optimize/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Create the optimizer router
pub fn optimize_routes() -> Router {
    Router::new()
        .route("/api/optimize", post(handlers::optimize_resume))
        .route("/api/analyze", post(handlers::analyze_resume))
        .route("/api/health", get(handlers::health))
}
