//! Outbound transport for Socksd
//!
//! This module provides the dialer abstraction used by CONNECT to reach
//! destination hosts, and the plain TCP implementation of it.

mod tcp;

pub use tcp::TcpDialer;

use crate::config::TcpConfig;
use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

/// Socket options for configuring connections
#[derive(Debug, Clone)]
pub struct SocketOpts {
    /// Enable TCP_NODELAY
    pub nodelay: bool,
    /// TCP keepalive timeout
    pub keepalive_secs: Option<u64>,
    /// TCP keepalive interval
    pub keepalive_interval: Option<u64>,
}

impl Default for SocketOpts {
    fn default() -> Self {
        SocketOpts {
            nodelay: true,
            keepalive_secs: Some(20),
            keepalive_interval: Some(8),
        }
    }
}

impl SocketOpts {
    /// Create socket options from TCP config
    pub fn from_tcp_config(config: &TcpConfig) -> Self {
        let keepalive = config.keepalive_secs > 0;
        SocketOpts {
            nodelay: config.nodelay,
            keepalive_secs: keepalive.then_some(config.keepalive_secs),
            keepalive_interval: keepalive.then_some(config.keepalive_interval),
        }
    }

    /// Apply socket options to a TCP stream
    pub fn apply(&self, stream: &TcpStream) -> io::Result<()> {
        stream.set_nodelay(self.nodelay)?;

        if let (Some(timeout), Some(interval)) = (self.keepalive_secs, self.keepalive_interval) {
            let socket = socket2::SockRef::from(stream);
            let keepalive = socket2::TcpKeepalive::new()
                .with_time(Duration::from_secs(timeout))
                .with_interval(Duration::from_secs(interval));
            socket.set_tcp_keepalive(&keepalive)?;
        }

        Ok(())
    }
}

/// Dynamic stream trait for boxed streams
pub trait StreamDyn: AsyncRead + AsyncWrite + Unpin + Send + Sync + Debug {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send + Sync + Debug> StreamDyn for T {}

/// A freshly dialed upstream connection
#[derive(Debug)]
pub struct Upstream {
    /// The connected stream
    pub stream: Box<dyn StreamDyn>,
    /// Local address the connection is bound to, reported back to the client
    pub local_addr: SocketAddr,
}

/// Opens outbound connections for CONNECT requests.
///
/// Implementations must treat `timeout` expiry as a failed dial and report
/// it as an `io::ErrorKind::TimedOut` error.
#[async_trait]
pub trait Dialer: Debug + Send + Sync {
    /// Connect to `host:port` within `timeout`
    async fn dial(&self, host: &str, port: u16, timeout: Duration) -> io::Result<Upstream>;
}
