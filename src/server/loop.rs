// Server loop module
// Accepts connections until shutdown is requested, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Main accept loop.
///
/// Must run inside a `tokio::task::LocalSet`: connections are served with
/// `spawn_local`. Returns once shutdown is requested and open connections
/// have finished or `performance.shutdown_timeout` elapsed.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        state.logger.error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                state.logger.info("[SHUTDOWN] No longer accepting connections");
                break;
            }
        }
    }

    // Stop listening before waiting on in-flight requests
    drop(listener);
    drain_connections(&state, &active_connections).await;
    Ok(())
}

/// Wait for active connections to finish, bounded by the shutdown timeout
async fn drain_connections(state: &AppState, active_connections: &AtomicUsize) {
    let timeout = Duration::from_secs(state.config.performance.shutdown_timeout);
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 {
            state.logger.info("[SHUTDOWN] All connections closed");
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            state.logger.warn(&format!(
                "[SHUTDOWN] {active} connection(s) still open after {}s, exiting",
                timeout.as_secs()
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
