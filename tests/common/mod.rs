//! Shared utilities for integration tests.

use std::net::SocketAddr;

use echo_server::config::{EchoConfig, EchoMode};
use echo_server::{net, EchoServer, Shutdown};

/// A running server and the handle that stops it.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server on an ephemeral loopback port.
pub async fn start_server(mode: EchoMode, delay_ms: u64) -> TestServer {
    let mut config = EchoConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.echo.mode = mode;
    config.echo.delay_ms = delay_ms;

    let listener = net::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = EchoServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

/// A client that never pools or goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Split a response body into its header lines and the trailing segment.
pub fn split_body(body: &str) -> (Vec<&str>, &str) {
    match body.rfind('\n') {
        Some(idx) => (body[..idx].split('\n').collect(), &body[idx + 1..]),
        None => (Vec::new(), body),
    }
}
