use std::error::Error;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use log::info;
use tokio::signal;
use tokio::sync::oneshot;

use carelane::api::rest::RestApi;
use carelane::config::load_config;
use carelane::queue::QueueEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = load_config(Path::new("config.yaml"))?;

    info!("Starting Carelane on {}:{}", config.api.host, config.api.port);

    let queue = Arc::new(QueueEngine::new());
    let api = RestApi::new(Arc::clone(&queue));

    // Create a channel for shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let routes = api.routes();
    let addr: SocketAddr = format!("{}:{}", config.api.host, config.api.port).parse()?;

    // Set up server with graceful shutdown
    let (_, server) = warp::serve(routes)
        .bind_with_graceful_shutdown(addr, async move {
            shutdown_rx.await.ok();
            info!("Shutting down server...");
        });

    let server_handle = tokio::spawn(server);

    // Wait for Ctrl+C
    signal::ctrl_c().await?;
    info!("Ctrl+C received, starting graceful shutdown");

    shutdown_tx.send(()).ok();
    server_handle.await?;

    info!("Server shutdown complete, {} patients still waiting", queue.len());
    Ok(())
}
