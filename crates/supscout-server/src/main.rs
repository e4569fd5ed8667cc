mod api;
mod keepalive;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use supscout_scraper::{HttpFetcher, Scout};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = supscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let fetcher = HttpFetcher::new(&config.fetch)?;
    let scout = Scout::new(fetcher);
    tracing::info!(
        env = %config.env,
        sources = scout.registry().len(),
        "supplier scout starting"
    );
    let app = build_app(AppState::new(Arc::new(scout)));

    let _pinger = config.self_ping_url.clone().map(|url| {
        keepalive::spawn_self_ping(url, Duration::from_secs(config.self_ping_interval_secs))
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
