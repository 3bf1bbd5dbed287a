use std::sync::Arc;

mod config;
mod facts;
mod handler;
mod http;
mod logger;
mod numbers;
mod server;

/// Configuration file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    let log = logger::Logger::from_config(&cfg.logging)?;

    // Create the Tokio runtime, sized by the `workers` setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        log.info(&format!("[CONFIG] Using {workers} worker threads"));
    } else {
        log.info("[CONFIG] Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, log))
}

async fn async_main(
    cfg: config::Config,
    log: logger::Logger,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr, cfg.performance.backlog)?;

    let state = Arc::new(config::AppState::new(cfg, log)?);
    state.logger.log_server_start(&addr, &state.config);

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals), state.logger.clone());

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, Arc::clone(&state), signals))
        .await?;

    state.logger.info("Server stopped");
    Ok(())
}
