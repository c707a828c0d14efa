//! HTTP surface of the medical chat relay.
//!
//! Three routes: a greeting, a health check, and the `/chat` relay itself.
//! The upstream client lives in [`llm-service`] and is injected through
//! [`AppState`] at startup; handlers hold no other state.

use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
mod middleware_layer;
pub mod routes;

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use llm_service::error_handler::ConfigError;

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{chat::chat_route::chat, root_route::root, status_route::check_status},
};

/// Origins the frontend is served from. The browser sends credentials, so
/// wildcard origins/methods/headers are not an option here.
const ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://192.248.10.121:5173",
    "https://llava-medrag.github.io",
];

const DEFAULT_PORT: u16 = 8000;

/// Builds the application router on top of the given shared state.
///
/// Split out of [`start`] so tests can drive the router directly.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            ALLOWED_ORIGINS.map(HeaderValue::from_static),
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route("/", get(root))
        .route("/status", get(check_status))
        .route("/chat", post(chat))
        .with_state(state)
        .layer(middleware::from_fn(json_error_mapper))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Loads configuration, binds the listener, and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let state = Arc::new(AppState::from_env()?);

    let port = match env::var("PORT") {
        Ok(v) if !v.trim().is_empty() => {
            v.trim().parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
                var: "PORT",
                reason: "expected u16 (1..=65535)",
            })?
        }
        _ => DEFAULT_PORT,
    };

    let app = app(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;

    tracing::info!("listening on http://{addr}");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
