//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the echo handler on every path
//! - Wire up middleware (request tracing)
//! - Serve on a listener handed in by the caller
//! - Stop accepting and drain in-flight requests on shutdown

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::EchoConfig;
use crate::http::echo::echo_handler;
use crate::transform::Transform;

/// Application state injected into the handler.
#[derive(Debug, Clone)]
pub struct EchoState {
    pub transform: Transform,
    pub max_body_bytes: usize,
}

/// HTTP server for the echo service.
pub struct EchoServer {
    router: Router,
    transform: Transform,
}

impl EchoServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EchoConfig) -> Self {
        let state = EchoState {
            transform: Transform::from_config(&config.echo),
            max_body_bytes: config.echo.max_body_bytes,
        };

        let transform = state.transform;
        let router = Self::build_router(state);
        Self { router, transform }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: EchoState) -> Router {
        Router::new()
            .route("/{*path}", any(echo_handler))
            .route("/", any(echo_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = %self.transform.mode(),
            delay = ?self.transform.delay(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
