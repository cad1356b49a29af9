//! SOCKS5 command parser
//!
//! Parses SOCKS5 command requests from the client.

use super::reply::send_failure;
use crate::error::{Socks5Error, Socks5ReplyCode};
use crate::socks::consts::*;
use crate::socks::types::{AddressType, ConnectionRequest, SocksCommand, TargetAddr};
use std::net::{Ipv4Addr, Ipv6Addr};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, warn};

/// Decode a SOCKS5 request from the stream
///
/// # SOCKS5 Request Format
///
/// ```text
/// +----+-----+-------+------+----------+----------+
/// |VER | CMD |  RSV  | ATYP | DST.ADDR | DST.PORT |
/// +----+-----+-------+------+----------+----------+
/// | 1  |  1  | X'00' |  1   | Variable |    2     |
/// +----+-----+-------+------+----------+----------+
/// ```
///
/// The header is validated in order (version, reserved byte, command,
/// address type) before any address byte is consumed. A short read anywhere
/// fails with [`Socks5Error::TruncatedMessage`].
pub async fn read_request<S>(stream: &mut S) -> Result<ConnectionRequest, Socks5Error>
where
    S: AsyncRead + Unpin,
{
    // Read: VER CMD RSV ATYP
    let mut header = [0u8; 4];
    stream.read_exact(&mut header).await?;

    let [version, cmd_byte, reserved, addr_byte] = header;

    if version != SOCKS5_VERSION {
        return Err(Socks5Error::ProtocolVersionMismatch(version));
    }

    if reserved != SOCKS5_RESERVED {
        return Err(Socks5Error::ReservedFieldInvalid(reserved));
    }

    let command =
        SocksCommand::from_byte(cmd_byte).ok_or(Socks5Error::CommandUnsupported(cmd_byte))?;

    let addr_type =
        AddressType::from_byte(addr_byte).ok_or(Socks5Error::AddressTypeUnsupported(addr_byte))?;

    let target = read_address(stream, addr_type).await?;

    debug!("Decoded SOCKS5 request: {} to {}", command, target);

    Ok(ConnectionRequest { command, target })
}

/// Read the address and port portion of a request
async fn read_address<S>(stream: &mut S, addr_type: AddressType) -> Result<TargetAddr, Socks5Error>
where
    S: AsyncRead + Unpin,
{
    match addr_type {
        AddressType::Ipv4 => {
            let mut addr = [0u8; IPV4_ADDR_LEN];
            stream.read_exact(&mut addr).await?;
            let port = read_port(stream).await?;

            Ok(TargetAddr::ipv4(Ipv4Addr::from(addr), port))
        }

        AddressType::Domain => {
            let domain_len = stream.read_u8().await? as usize;

            let mut domain_buf = vec![0u8; domain_len];
            stream.read_exact(&mut domain_buf).await?;
            let domain = String::from_utf8_lossy(&domain_buf).into_owned();

            let port = read_port(stream).await?;

            Ok(TargetAddr::domain(domain, port))
        }

        AddressType::Ipv6 => {
            let mut addr = [0u8; IPV6_ADDR_LEN];
            stream.read_exact(&mut addr).await?;
            let port = read_port(stream).await?;

            Ok(TargetAddr::ipv6(Ipv6Addr::from(addr), port))
        }
    }
}

async fn read_port<S>(stream: &mut S) -> Result<u16, Socks5Error>
where
    S: AsyncRead + Unpin,
{
    let mut port_buf = [0u8; PORT_LEN];
    stream.read_exact(&mut port_buf).await?;
    Ok(u16::from_be_bytes(port_buf))
}

/// Read and validate the client's request.
///
/// IPv6 destinations decode fine but are refused: the client receives an
/// "address type not supported" reply and the call fails with
/// [`Socks5Error::AddressTypeRejected`]. Decode failures are returned
/// without writing anything.
pub async fn parse_command<S>(stream: &mut S) -> Result<ConnectionRequest, Socks5Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = read_request(stream).await?;

    if request.addr_type() == AddressType::Ipv6 {
        warn!("Rejecting IPv6 destination {}", request.target);
        if let Err(e) = send_failure(stream, Socks5ReplyCode::AddressTypeNotSupported).await {
            debug!("Failed to send address type rejection: {}", e);
        }
        return Err(Socks5Error::AddressTypeRejected);
    }

    Ok(request)
}
