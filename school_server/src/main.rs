//! Hogwarts school server: loads config from the environment (and `.env`), connects the store,
//! and serves the student / faculty API.
//!
//! Run from repo root: `cargo run -p school-server`
//! Without PostgreSQL: `STORAGE=memory cargo run -p school-server`

use hogwarts_school::{app, connect, AppConfig, AppState, InMemoryRepository, PgRepository, StorageKind};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hogwarts_school=info,school_server=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let state = match config.storage {
        StorageKind::Postgres => {
            let pool = connect(&config).await?;
            AppState::new(Arc::new(PgRepository::new(pool)))
        }
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            AppState::new(Arc::new(InMemoryRepository::new()))
        }
    };

    let router = app(state, config.max_body_bytes);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
