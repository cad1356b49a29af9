//! TCP relay for SOCKS5 CONNECT command
//!
//! Handles TCP CONNECT requests by dialing the target and relaying data
//! bidirectionally.

use super::command::{send_failure, send_success};
use super::context::Socks5Context;
use super::types::TargetAddr;
use crate::error::{Socks5Error, Socks5ReplyCode};
use std::io;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info};

/// Handle TCP CONNECT command
///
/// This function:
/// 1. Dials the target through the context's dialer
/// 2. Sends a success reply carrying the upstream's local address
/// 3. Relays data bidirectionally between client and target
///
/// A failed or timed-out dial is answered with "connection refused". The
/// client stream is left open for the caller to close; the upstream is
/// always closed before this returns.
pub async fn handle_tcp_connect<S>(
    client: &mut S,
    target: &TargetAddr,
    context: &Socks5Context,
) -> Result<(), Socks5Error>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("Connecting to target: {}", target);

    let upstream = match context
        .dialer()
        .dial(&target.host(), target.port(), context.dial_timeout())
        .await
    {
        Ok(upstream) => upstream,
        Err(e) => {
            error!("Failed to connect to {}: {}", target, e);
            if let Err(write_err) = send_failure(client, Socks5ReplyCode::ConnectionRefused).await {
                debug!("Failed to send connection refused reply: {}", write_err);
            }
            return Err(Socks5Error::UpstreamUnreachable {
                target: target.to_string(),
                source: e,
            });
        }
    };

    send_success(client, upstream.local_addr)
        .await
        .map_err(Socks5Error::ClientWriteFailed)?;

    info!("Relaying to {}", target);

    match relay_tcp(client, upstream.stream).await {
        Ok((sent, received)) => {
            debug!(
                "Relay to {} finished: {} bytes sent, {} bytes received",
                target, sent, received
            );
        }
        Err(e) => debug!("Relay to {} ended with error: {}", target, e),
    }

    Ok(())
}

/// Relay data bidirectionally between client and upstream
///
/// Both directions run concurrently. When one direction reaches EOF its
/// destination's write side is shut down, and the other direction keeps
/// draining until it finishes too. The first I/O error ends the relay.
///
/// Returns the byte counts (client to upstream, upstream to client).
/// `upstream` is consumed and dropped on every exit path.
pub async fn relay_tcp<A, B>(client: &mut A, upstream: B) -> io::Result<(u64, u64)>
where
    A: AsyncRead + AsyncWrite + Unpin,
    B: AsyncRead + AsyncWrite + Unpin,
{
    let (mut client_read, mut client_write) = tokio::io::split(client);
    let (mut upstream_read, mut upstream_write) = tokio::io::split(upstream);

    let client_to_upstream = async {
        let bytes = tokio::io::copy(&mut client_read, &mut upstream_write).await?;
        debug!("Client->upstream finished: {} bytes", bytes);
        if let Err(e) = upstream_write.shutdown().await {
            debug!("Upstream write shutdown failed: {}", e);
        }
        Ok::<_, io::Error>(bytes)
    };

    let upstream_to_client = async {
        let bytes = tokio::io::copy(&mut upstream_read, &mut client_write).await?;
        debug!("Upstream->client finished: {} bytes", bytes);
        if let Err(e) = client_write.shutdown().await {
            debug!("Client write shutdown failed: {}", e);
        }
        Ok::<_, io::Error>(bytes)
    };

    tokio::try_join!(client_to_upstream, upstream_to_client)
}
