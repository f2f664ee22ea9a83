use anyhow::Result;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use chatbot_agent::{create_routes, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let log_filter = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "chatbot_agent=info,tower_http=info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    // Configuration errors (unknown provider, missing credential) are fatal
    // here, before the listener ever opens.
    let config = Config::from_env()?;
    info!(provider = %config.provider, model = %config.model, "loaded configuration");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen address: {}", e))?;

    let state = AppState::new(config)?;

    let app = create_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
