//! FixieRun - session controller for a fitness-rewards demo app
//! 
//! This is the main entry point for the fixierun server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use fixierun::{
    api::{create_router, ApiContext},
    config::Config,
    services::{FileThemeStore, HeadlessView, MemoryThemeStore, ThemeStore, View},
    state::{Capabilities, Controller},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("fixierun={},tower_http=info", config.log_level()))
        .init();

    info!("Starting fixierun server v{}", env!("CARGO_PKG_VERSION"));

    let profile = config.resolve_profile().map_err(anyhow::Error::msg)?;
    info!("Configuration: host={}, port={}, profile={}",
          config.host, config.port, profile.name);

    let store: Arc<dyn ThemeStore> = match config.preferences_path() {
        Some(path) => {
            info!("Theme preference file: {}", path.display());
            Arc::new(FileThemeStore::new(path))
        }
        None => {
            warn!("No config directory found, theme preference will not persist");
            Arc::new(MemoryThemeStore::new())
        }
    };

    let view = Arc::new(HeadlessView::new(profile.panels.clone()));
    let capabilities = Capabilities::simulated(&profile, view.clone(), store);
    let controller = Arc::new(Controller::new(profile, capabilities));

    // Fallback: reveal the main view directly if normal activation fails
    if let Err(e) = controller.activate() {
        error!("Interface activation failed: {}", e);
        view.reveal_main();
        info!("Fallback: main view revealed directly");
    }

    let app = create_router(ApiContext::new(Arc::clone(&controller), view));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("  GET  /status            - Session and rendered view");
    info!("  POST /workout/start/:k  - Start (or stop) a workout");
    info!("  POST /rewards/claim     - Claim rewards");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = controller.stop_workout() {
        warn!("Failed to stop workout on shutdown: {}", e);
    }
    info!("Server shutdown complete");
    Ok(())
}
