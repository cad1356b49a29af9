//! Main SOCKS5 handler
//!
//! This module provides the main entry point for serving one SOCKS5
//! connection. It orchestrates authentication, request validation
//! and command dispatch.

use super::auth::authenticate;
use super::command::{parse_command, send_command_not_supported};
use super::context::Socks5Context;
use super::tcp_relay::handle_tcp_connect;
use super::types::{ConnectionRequest, SocksCommand};
use crate::error::Socks5Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

/// Handle SOCKS5 protocol on a stream
///
/// # Protocol Flow
///
/// 1. Authentication negotiation
/// 2. Username/password authentication (if configured)
/// 3. Request validation
/// 4. Command execution (only CONNECT is implemented)
///
/// The stream is borrowed: closing it afterwards is up to the caller, on
/// success and on every error path alike.
pub async fn handle_socks5_on_stream<S>(
    stream: &mut S,
    context: &Socks5Context,
) -> Result<(), Socks5Error>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    // Step 1: Authentication negotiation
    let auth_method = authenticate(stream, context).await?;
    debug!("Authentication completed with method: {}", auth_method);

    // Step 2: Read and validate the request
    let request = parse_command(stream).await?;
    info!("SOCKS5 {} request to {}", request.command, request.target);

    // Step 3: Execute the command
    dispatch_command(stream, &request, context).await
}

/// Execute a validated request
pub async fn dispatch_command<S>(
    stream: &mut S,
    request: &ConnectionRequest,
    context: &Socks5Context,
) -> Result<(), Socks5Error>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    match request.command {
        SocksCommand::Connect => handle_tcp_connect(stream, &request.target, context).await,
        SocksCommand::Bind | SocksCommand::UdpAssociate => {
            warn!("{} command not supported", request.command);
            if let Err(e) = send_command_not_supported(stream).await {
                debug!("Failed to send command not supported reply: {}", e);
            }
            Err(Socks5Error::CommandUnimplemented(request.command))
        }
    }
}
