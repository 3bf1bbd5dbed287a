// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger::Logger;

/// Shutdown notification shared between the signal task and the server loop
pub struct SignalHandler {
    pub shutdown: Arc<Notify>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Ask the server loop to stop. The permit is stored, so a request made
    /// before the loop starts waiting is not lost.
    pub fn request_shutdown(&self) {
        self.shutdown.notify_one();
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix)
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>, logger: Logger) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    logger.error(&format!("Failed to register signal handlers: {e}"));
                    return;
                }
            };

        logger.info(&format!(
            "[SIGNAL] SIGTERM/SIGINT trigger graceful shutdown (pid {})",
            std::process::id()
        ));

        tokio::select! {
            _ = sigterm.recv() => logger.info("[SIGNAL] SIGTERM received, shutting down"),
            _ = sigint.recv() => logger.info("[SIGNAL] SIGINT received, shutting down"),
        }
        handler.request_shutdown();
    });
}

/// Fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>, logger: Logger) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger.info("[SIGNAL] Ctrl+C received, shutting down");
            handler.request_shutdown();
        }
    });
}
