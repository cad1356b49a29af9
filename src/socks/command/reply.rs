//! SOCKS5 reply builder
//!
//! Constructs SOCKS5 reply messages.

use crate::error::Socks5ReplyCode;
use crate::socks::consts::*;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Encode a reply frame
///
/// # SOCKS5 Reply Format
///
/// ```text
/// +----+-----+-------+------+----------+----------+
/// |VER | REP |  RSV  | ATYP | BND.ADDR | BND.PORT |
/// +----+-----+-------+------+----------+----------+
/// | 1  |  1  | X'00' |  1   | Variable |    2     |
/// +----+-----+-------+------+----------+----------+
/// ```
///
/// The address type follows the bound address: IPv4 for 4-byte addresses,
/// IPv6 for 16-byte ones. IPv4-mapped IPv6 addresses are reported as IPv4.
pub fn encode_reply(reply_code: Socks5ReplyCode, bind_addr: SocketAddr) -> Vec<u8> {
    let mut reply = vec![SOCKS5_VERSION, reply_code.into(), SOCKS5_RESERVED];

    match bind_addr.ip().to_canonical() {
        std::net::IpAddr::V4(ip) => {
            reply.push(SOCKS5_ADDR_TYPE_IPV4);
            reply.extend_from_slice(&ip.octets());
        }
        std::net::IpAddr::V6(ip) => {
            reply.push(SOCKS5_ADDR_TYPE_IPV6);
            reply.extend_from_slice(&ip.octets());
        }
    }
    reply.extend_from_slice(&bind_addr.port().to_be_bytes());

    reply
}

/// Encode a failure frame: IPv4 address type, zero address, zero port
pub fn encode_failure(reply_code: Socks5ReplyCode) -> [u8; FAILURE_REPLY_LEN] {
    let mut reply = [0u8; FAILURE_REPLY_LEN];
    reply[0] = SOCKS5_VERSION;
    reply[1] = reply_code.into();
    reply[2] = SOCKS5_RESERVED;
    reply[3] = SOCKS5_ADDR_TYPE_IPV4;
    reply
}

/// Send a success reply carrying the upstream's bound address
pub async fn send_success<S>(stream: &mut S, bind_addr: SocketAddr) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream
        .write_all(&encode_reply(Socks5ReplyCode::Succeeded, bind_addr))
        .await?;
    stream.flush().await
}

/// Send a fixed-size failure reply
pub async fn send_failure<S>(stream: &mut S, reply_code: Socks5ReplyCode) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(&encode_failure(reply_code)).await?;
    stream.flush().await
}

/// Build a "command not supported" reply
pub async fn send_command_not_supported<S>(stream: &mut S) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    send_failure(stream, Socks5ReplyCode::CommandNotSupported).await
}
