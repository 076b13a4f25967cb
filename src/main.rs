use std::sync::Arc;
use std::time::Duration;

use ai_buddy_backend::{config::Config, routes, state::AppState};
use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    debug!(?config, "loaded configuration");

    let state = Arc::new(AppState::from_config(&config));
    spawn_session_reaper(state.clone());

    let app = routes::create_router(&config.static_dir).with_state(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

// Periodically drop overlay sessions nobody has touched within the TTL.
fn spawn_session_reaper(state: Arc<AppState>) {
    let period = (state.sessions.ttl() / 2).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = state.sessions.purge_expired().await;
            if removed > 0 {
                debug!(removed, "purged idle sessions");
            }
        }
    });
}
