//! SOCKS5 listener
//!
//! Accepts client connections and serves each one in its own task.

use crate::error::SocksdError;
use crate::socks::{handle_socks5_on_stream, Socks5Context};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Pause after a failed accept
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Main Socksd server
pub struct Socks5Server {
    /// Listening socket
    listener: TcpListener,
    /// Settings shared by every connection
    context: Arc<Socks5Context>,
}

impl Socks5Server {
    /// Bind the listener
    pub async fn bind<A: ToSocketAddrs>(
        addr: A,
        context: Socks5Context,
    ) -> Result<Self, SocksdError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Socks5Server {
            listener,
            context: Arc::new(context),
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr, SocksdError> {
        Ok(self.listener.local_addr()?)
    }

    /// Get a reference to the shared context
    pub fn context(&self) -> &Arc<Socks5Context> {
        &self.context
    }

    /// Accept connections until shutdown
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<bool>) -> Result<(), SocksdError> {
        info!("SOCKS5 server listening on {}", self.local_addr()?);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer_addr)) => {
                            let context = self.context.clone();
                            tokio::spawn(async move {
                                serve_connection(stream, peer_addr, context).await;
                            });
                        }
                        Err(e) => {
                            error!("Failed to accept connection: {}", e);
                            tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Shutdown signal received, stopping server");
                    break;
                }
            }
        }

        info!("Server stopped");
        Ok(())
    }
}

/// Run the protocol on one client connection, then close it
///
/// A finished relay has already shut down the client's write half, so the
/// stream is only dropped. Failed connections are shut down first.
async fn serve_connection(
    mut stream: TcpStream,
    peer_addr: SocketAddr,
    context: Arc<Socks5Context>,
) {
    info!("Accepted connection from {}", peer_addr);

    match handle_socks5_on_stream(&mut stream, &context).await {
        Ok(()) => {
            debug!("Connection from {} finished", peer_addr);
            return;
        }
        Err(e) if e.is_decode_error() => {
            debug!("Dropping connection from {}: {}", peer_addr, e)
        }
        Err(e) => warn!("Connection from {} failed: {}", peer_addr, e),
    }

    if let Err(e) = stream.shutdown().await {
        debug!("Failed to shut down connection from {}: {}", peer_addr, e);
    }
}
