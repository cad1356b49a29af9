//! TCP dialer implementation
//!
//! Opens plain TCP connections to CONNECT destinations.

use super::{Dialer, SocketOpts, Upstream};
use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;

/// Dialer backed by the platform TCP stack
#[derive(Debug, Clone, Default)]
pub struct TcpDialer {
    /// Socket options to apply to connections
    socket_opts: SocketOpts,
}

impl TcpDialer {
    /// Create a new TCP dialer with default options
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Set socket options
    pub fn with_socket_opts(mut self, opts: SocketOpts) -> Self {
        self.socket_opts = opts;
        self
    }

    /// Socket options applied to every dialed connection
    pub fn socket_opts(&self) -> &SocketOpts {
        &self.socket_opts
    }
}

#[async_trait]
impl Dialer for TcpDialer {
    async fn dial(&self, host: &str, port: u16, timeout: Duration) -> io::Result<Upstream> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("connection to {}:{} timed out after {:?}", host, port, timeout),
                )
            })??;

        if let Err(e) = self.socket_opts.apply(&stream) {
            tracing::warn!("Failed to apply socket options: {}", e);
        }

        let local_addr = stream.local_addr()?;
        tracing::debug!("TCP connection established to {}:{} from {}", host, port, local_addr);

        Ok(Upstream {
            stream: Box::new(stream),
            local_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn test_tcp_dialer_with_socket_opts() {
        let opts = SocketOpts {
            nodelay: false,
            keepalive_secs: Some(60),
            keepalive_interval: Some(20),
        };
        let dialer = TcpDialer::with_defaults().with_socket_opts(opts);
        assert!(!dialer.socket_opts().nodelay);
        assert_eq!(dialer.socket_opts().keepalive_secs, Some(60));
    }

    #[tokio::test]
    async fn test_tcp_dialer_connects_and_reports_local_addr() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let dialer = TcpDialer::with_defaults();
        let (dialed, accepted) = tokio::join!(
            dialer.dial("127.0.0.1", addr.port(), Duration::from_secs(1)),
            listener.accept()
        );

        let upstream = dialed.unwrap();
        let (_, peer) = accepted.unwrap();
        assert_eq!(upstream.local_addr, peer);
    }

    #[tokio::test]
    async fn test_tcp_dialer_connection_refused() {
        // Bind then drop to obtain a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let dialer = TcpDialer::with_defaults();
        let result = dialer.dial("127.0.0.1", port, Duration::from_secs(1)).await;
        assert!(result.is_err());
    }
}
