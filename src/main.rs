use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use daybook::config::Settings;
use daybook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    Settings::ensure_default_file()?;
    let settings = Settings::load()?;
    tracing::info!("✅ Configuration loaded successfully");

    let storage_root = settings.storage.resolved_root()?;
    let port = settings.server.port;
    let state = AppState::new(settings, storage_root)?;

    let app = daybook::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
