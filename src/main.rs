use std::process::ExitCode;

use ai_llm_service::telemetry;
use tracing::{Level, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // `.env` is optional; real deployments set the environment directly.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(telemetry::layer())
        .init();

    if let Err(err) = dotenv {
        if !err.not_found() {
            warn!(error = %err, ".env file could not be loaded");
        }
    }

    match api::start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "DataSage failed");
            eprintln!("DataSage failed to start: {err}");
            ExitCode::FAILURE
        }
    }
}
