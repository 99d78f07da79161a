// src/main.rs
use axum::{
    extract::{DefaultBodyLimit, Extension},
    middleware, Router,
};
use dotenv::dotenv;
use std::env;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod common;
mod logging_middleware;
mod optimize;
mod services;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use common::AppState;
use services::{
    KeywordExtractor, LocalRewriter, OpenAIConfig, OpenAIRewriter, OpenAIService, RewriteStrategy,
};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
    let openai_base_url =
        env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());
    let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4-turbo".to_string());
    let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(10 * 1024 * 1024);

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    // Tokenizer model: built once at startup and shared read-only
    let keyword_extractor = KeywordExtractor::new();
    info!("KeywordExtractor initialized");

    // Strategy selection happens once per process: remote when a credential
    // is configured, deterministic local fallback otherwise
    let rewrite_strategy = match openai_api_key {
        Some(api_key) => {
            info!(model = %openai_model, "Using remote rewrite strategy (OpenAI)");
            RewriteStrategy::Remote(OpenAIRewriter::new(OpenAIService::new(OpenAIConfig {
                api_key,
                base_url: openai_base_url,
                model: openai_model,
            })))
        }
        None => {
            warn!("OPENAI_API_KEY not set, using local fallback rewrite strategy");
            RewriteStrategy::Local(LocalRewriter)
        }
    };

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState {
        keyword_extractor,
        rewrite_strategy,
        max_upload_bytes,
    };

    let shared = Arc::new(app_state);
    let body_limit = shared.max_upload_bytes;

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let app = Router::new()
        // ====================================================================
        // OPTIMIZER ROUTES (Optimize, Analyze, Health)
        // ====================================================================
        .merge(optimize::optimize_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        // Add request/response body logging in debug mode
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(shared))
        .layer({
            // Get CORS origins from environment variable
            let cors_origins = std::env::var("CORS_ORIGINS").unwrap_or_else(|_| {
                "http://localhost:3000,http://localhost:5173".to_string()
            });

            let origins: Vec<axum::http::HeaderValue> = cors_origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE])
        })
        .layer(TraceLayer::new_for_http());

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
