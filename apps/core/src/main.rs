// Atende Backend Brain entry point.

mod brain;
mod cache;
mod database;
mod error;
mod generator;
mod models;
mod service;
mod web;

#[cfg(test)]
mod tests;

use std::env;
use std::path::PathBuf;

use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use generator::GeneratorClient;
use web::state::AppState;

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_DB_PATH: &str = "atende.sqlite";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new("atende-core".into(), std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let db_path = env::var("DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));
    let pool = database::init_db(&db_path).await?;

    let generator = GeneratorClient::from_env();
    let state = AppState::new(pool, generator);
    let router = web::create_router(state);

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on port {}", port);

    axum::serve(listener, router).await?;
    Ok(())
}
