use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use match_server::config::ServerConfig;
use match_server::engine::Engine;
use match_server::store::{MemoryStore, Seed};
use match_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("match_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let store = match &config.seed_file {
        Some(path) => {
            let seed = Seed::load(path)?;
            info!(
                path = %path.display(),
                users = seed.users.len(),
                journeys = seed.journeys.len(),
                requests = seed.requests.len(),
                "loaded seed data"
            );
            MemoryStore::from_seed(seed)?
        }
        None => {
            info!("no seed file configured, starting with an empty store");
            MemoryStore::new()
        }
    };

    let engine = Engine::new(Arc::new(store), config.matching.clone(), &config.cache);
    let app = create_router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "journey matching server listening");
    info!("  GET    /health");
    info!("  GET    /journeys/:id/matches");
    info!("  POST   /journeys/:id/requests");
    info!("  GET    /requests/:id");
    info!("  DELETE /requests/:id");
    info!("  POST   /requests/:id/response");
    info!("  GET    /inbox, /outbox");

    axum::serve(listener, app).await?;
    Ok(())
}
