mod config;
mod db;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::process::ExitCode;

use config::{AppConfig, ConfigError};
use leptos::prelude::get_configuration;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("database init failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "attendance server exited");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    let leptos_options = get_configuration(None)
        .map_err(|e| StartupError::Leptos(e.to_string()))?
        .leptos_options;
    let pool = db::init_pool(&config).await?;

    let port = config.port;
    let state = state::AppState::new(pool, config);
    let _purge = services::session::spawn_session_purge_task(
        state.pool.clone(),
        state.login_limiter.clone(),
        services::session::SESSION_PURGE_INTERVAL,
    );
    let app = routes::app(state, &leptos_options);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "attendance server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
