//! HTTP echo server.
//!
//! ```text
//! echo-server <ADDR> [--mode json|base64] [--delay-ms N] [--config FILE]
//! ```
//!
//! Binds `ADDR`, answers every request with its headers and transformed
//! body, and exits cleanly on SIGINT/SIGTERM.

use clap::Parser;

use echo_server::cli::Cli;
use echo_server::lifecycle::{wait_for_signal, Shutdown};
use echo_server::{net, observability, EchoServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        mode = %config.echo.mode,
        delay_ms = config.echo.delay_ms,
        max_body_bytes = config.echo.max_body_bytes,
        "Configuration loaded"
    );

    let listener = match net::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    let server = EchoServer::new(config);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        _ = wait_for_signal() => {
            shutdown.trigger();
            server_task.await??;
        }
        result = &mut server_task => result??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
