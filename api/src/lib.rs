//! HTTP surface of DataSage: the chat page plus a small JSON API.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

pub use crate::core::app_state::AppState;
pub use crate::core::session_cookie::SESSION_COOKIE;
pub use crate::error_handler::{AppError, AppResult};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use colored::Colorize;
use tokio::signal;
use tracing::{error, info};

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        ask::ask_route::ask_route,
        chat_page::chat_page_route::{chat_page_route, chat_submit_route},
        health_route::health_route,
        image_route::image_route,
        transcript_route::transcript_route,
    },
};

/// Builds the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/ask", post(ask_route))
        .route("/transcript", get(transcript_route))
        .route("/image", get(image_route))
        .layer(middleware::from_fn(json_error_mapper));

    Router::new()
        .route("/", get(chat_page_route).post(chat_submit_route))
        .route("/health", get(health_route))
        .nest("/api", api)
        .with_state(state)
}

/// Reads configuration, binds `API_ADDRESS` and serves until Ctrl+C.
///
/// # Errors
/// Configuration problems, bind failures and server I/O errors.
pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(AppError::MissingEnv("API_ADDRESS"))?;

    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(host_url.trim())
        .await
        .map_err(AppError::Bind)?;

    print_banner(host_url.trim());
    info!(address = %host_url.trim(), "DataSage listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("DataSage stopped");
    Ok(())
}

fn print_banner(address: &str) {
    println!(
        "{} {}\n  {} {}",
        "DataSage 🧠".bright_cyan().bold(),
        "Your AI Data Science Tutor".dimmed(),
        "→".green(),
        format!("http://{address}").underline()
    );
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
