//! Slotboard HTTP server.
//!
//! Event slotting for forum-hosted group events: matches, rosters, slot
//! claims, reservations, and share links.

use slotboard_roster::providers::ForumHttpClient;
use slotboard_web::{build_router, AppState, Config};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slotboard=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Slotboard HTTP server");

    // Load configuration
    let config = Config::from_env();
    info!(
        api_root = %config.api_root,
        forum_url = %config.forum_base_url,
        api_key_configured = config.api_key.is_some(),
        allowed_categories = config.allowed_category_ids.len(),
        "Configuration loaded"
    );

    // The host forum provides topics, permissions, and notification
    // delivery; one HTTP client serves all three provider roles.
    let forum = ForumHttpClient::new(&config.forum_base_url)?;

    // Build application state (stores, engine, gate)
    let state = AppState::new(config.gate_config(), forum.clone(), forum);

    // Build router
    let app = build_router(state, &config);

    // Create server address
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Starting HTTP server");

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {addr}");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => tracing::error!(%error, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
