//! TCP listener setup.
//!
//! # Responsibilities
//! - Normalize the command-line listen address (`:port` means all interfaces)
//! - Bind the listening socket, dual-stack when no host is given
//! - Report bind failures as a typed, fatal error

use std::fmt;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::TcpListener;

const BACKLOG: i32 = 1024;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The address is not `host:port` or `:port`.
    #[error("Invalid listen address {0:?}: expected host:port or :port")]
    InvalidAddress(String),

    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },
}

/// Where to listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenAddr {
    /// `:port`: every interface, IPv6 and IPv4.
    AllInterfaces(u16),
    /// `host:port`, resolved at bind time.
    Host(String),
}

impl fmt::Display for ListenAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenAddr::AllInterfaces(port) => write!(f, ":{port}"),
            ListenAddr::Host(address) => f.write_str(address),
        }
    }
}

/// Parse a listen address.
///
/// `":8080"` means all interfaces; `host:port` (including `[::1]:8080`) is
/// kept as written once the port has been checked.
pub fn parse_listen_addr(raw: &str) -> Result<ListenAddr, ListenerError> {
    let invalid = || ListenerError::InvalidAddress(raw.to_string());

    let (host, port) = raw.trim().rsplit_once(':').ok_or_else(invalid)?;
    let port = port.parse::<u16>().map_err(|_| invalid())?;

    if host.is_empty() {
        Ok(ListenAddr::AllInterfaces(port))
    } else {
        Ok(ListenAddr::Host(format!("{host}:{port}")))
    }
}

/// Bind a TCP listener on a (possibly `:port`-style) address.
///
/// `:port` binds `[::]` with `IPV6_V6ONLY` cleared so IPv4 clients are
/// accepted too; hosts without IPv6 fall back to `0.0.0.0`.
pub async fn bind(raw: &str) -> Result<TcpListener, ListenerError> {
    let listener = match parse_listen_addr(raw)? {
        ListenAddr::AllInterfaces(port) => bind_all_interfaces(port)?,
        ListenAddr::Host(address) => TcpListener::bind(address.as_str())
            .await
            .map_err(|source| ListenerError::Bind { address, source })?,
    };

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listener bound");
    }

    Ok(listener)
}

fn bind_all_interfaces(port: u16) -> Result<TcpListener, ListenerError> {
    let v6 = SocketAddr::from((Ipv6Addr::UNSPECIFIED, port));
    match bind_socket(v6) {
        Ok(listener) => Ok(listener),
        Err(e) => {
            tracing::debug!(error = %e, port, "Dual-stack bind failed, falling back to IPv4");
            let v4 = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
            bind_socket(v4).map_err(|source| ListenerError::Bind {
                address: v4.to_string(),
                source,
            })
        }
    }
}

fn bind_socket(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = socket2::Socket::new(
        match addr {
            SocketAddr::V4(_) => socket2::Domain::IPV4,
            SocketAddr::V6(_) => socket2::Domain::IPV6,
        },
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    TcpListener::from_std(socket.into())
}
