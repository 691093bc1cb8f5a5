//! Process signal handling

use futures::stream::StreamExt;
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// What a received signal asks the daemon to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// SIGTERM or SIGINT
    Shutdown,
    /// SIGHUP: treat as a transport reconnect and refresh state
    Refresh,
}

impl HostSignal {
    pub fn from_raw(signal: i32) -> Option<Self> {
        match signal {
            SIGTERM | SIGINT => Some(HostSignal::Shutdown),
            SIGHUP => Some(HostSignal::Refresh),
            _ => None,
        }
    }
}

/// Register for SIGTERM, SIGINT and SIGHUP
pub fn install_signal_handlers() -> std::io::Result<Signals> {
    Signals::new([SIGTERM, SIGINT, SIGHUP])
}

/// Forward received signals as [`HostSignal`]s.
///
/// Returns once a shutdown signal has been forwarded or the receiver is gone.
pub async fn forward_signals(mut signals: Signals, tx: mpsc::Sender<HostSignal>) {
    while let Some(raw) = signals.next().await {
        let Some(signal) = HostSignal::from_raw(raw) else {
            continue;
        };
        info!("Received signal {}: {:?}", raw, signal);
        if tx.send(signal).await.is_err() {
            warn!("Signal receiver dropped");
            break;
        }
        if signal == HostSignal::Shutdown {
            break;
        }
    }
}
