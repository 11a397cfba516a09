use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chameleon_core::{Session, ThemeRegistry, TracingEventHandler};
use chameleon_server::{
    config::Config, content::provider_for, create_routes, session_manager::SessionManager,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Chameleon server...");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Players {}-{}, {} chameleon(s), content from {:?}",
        config.game.min_players,
        config.game.max_players,
        config.game.impostor_count,
        config.content_source
    );

    let mut session = Session::new(config.game.clone(), ThemeRegistry::builtin())
        .context("Failed to create game session")?;
    session.add_event_handler(Box::new(TracingEventHandler));

    let session_manager = Arc::new(SessionManager::new(
        session,
        provider_for(&config.content_source),
    ));

    // The server still starts without content; players can retry from the UI
    if let Err(e) = session_manager.load_content().await {
        warn!("Initial content load failed: {}", e);
    }

    let routes = create_routes(session_manager.clone());

    let addr = (
        config
            .host
            .parse::<std::net::IpAddr>()
            .with_context(|| format!("Invalid HOST: {}", config.host))?,
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
                .expect("Failed to listen for SIGINT");
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to listen for SIGTERM");

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
    Ok(())
}
