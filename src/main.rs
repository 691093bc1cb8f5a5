//! Power Sidebar - keeps a printer power sidebar in sync with the print server
//! 
//! This is the main entry point for the power-sidebar daemon.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::mpsc};
use tracing::{error, info};

use power_sidebar::{
    api::create_router,
    client::HttpClient,
    config::Config,
    state::AppState,
    sync::{Event, LogSink, NotificationOptions, SessionGate, Sidebar},
    utils::{forward_signals, install_signal_handlers, HostSignal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("power_sidebar={},tower_http=info", config.log_level()))
        .init();

    info!("Starting power-sidebar v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, server={}, plugin={}, busy_window={}ms, require_login={}",
        config.host, config.port, config.server, config.plugin, config.busy_window_ms, config.require_login
    );

    let client = HttpClient::new(
        &config.server,
        &config.plugin,
        config.api_key.clone(),
        config.request_timeout(),
    )?;
    info!("Print server endpoint: {}", client.endpoint());

    let sidebar = Sidebar::new(
        SessionGate::new(config.require_login),
        NotificationOptions::default(),
    )
    .with_plugin(config.plugin.clone());

    let state = Arc::new(AppState::start(
        sidebar,
        Arc::new(client),
        Arc::new(LogSink),
        config.busy_window(),
        config.port,
        config.host.clone(),
    ));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Sidebar surface on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /status                  - Rendered sidebar state");
    info!("  POST /power/toggle            - Toggle printer power");
    info!("  POST /management/toggle       - Toggle power management");
    info!("  POST /countdown/abort         - Abort pending shutdown");
    info!("  POST /session                 - Host session changed");
    info!("  POST /hooks/startup-complete  - Host activation finished");
    info!("  POST /hooks/reconnect         - Push channel reconnected");
    info!("  POST /hooks/plugin-message    - Push event dispatch");

    let signals = install_signal_handlers()?;
    let (signal_tx, mut signal_rx) = mpsc::channel(4);
    tokio::spawn(forward_signals(signals, signal_tx));

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = async {
            while let Some(signal) = signal_rx.recv().await {
                match signal {
                    HostSignal::Refresh => {
                        if let Err(e) = state.post(Event::Reconnected) {
                            error!("Failed to queue refresh: {}", e);
                        }
                    }
                    HostSignal::Shutdown => break,
                }
            }
        } => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
