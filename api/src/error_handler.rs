use ai_llm_service::AiLlmError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error(transparent)]
    Config(#[from] AiLlmError),

    #[error("failed to initialize {component}: {reason}")]
    Init {
        component: &'static str,
        reason: String,
    },

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("failed to render page: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        // Client input errors are answered through the envelope, never here.
        match self {
            AppError::MissingEnv(_)
            | AppError::Config(_)
            | AppError::Init { .. }
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingEnv(_) => "MISSING_ENV",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Init { .. } => "INIT_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_failures_are_server_errors() {
        let env = minijinja::Environment::new();
        let Err(source) = env.get_template("missing.html") else {
            panic!("empty environment has no templates");
        };
        let err = AppError::from(source);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "RENDER_ERROR");
        assert!(err.to_string().starts_with("failed to render page"));
    }

    #[test]
    fn boot_errors_are_server_errors() {
        assert_eq!(
            AppError::MissingEnv("UNSPLASH_API_KEY").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
