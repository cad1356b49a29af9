//! Error types for Socksd
//!
//! This module defines all custom error types used throughout the application.

use crate::socks::SocksCommand;
use std::io;
use thiserror::Error;

/// Main error type for server-level operations
#[derive(Error, Debug)]
pub enum SocksdError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// SOCKS5 protocol error
    #[error("SOCKS5 error: {0}")]
    Socks5(#[from] Socks5Error),
}

/// Errors raised while serving a single SOCKS5 connection
#[derive(Error, Debug)]
pub enum Socks5Error {
    /// Frame carried a SOCKS version other than 5
    #[error("Unsupported SOCKS version: {0}")]
    ProtocolVersionMismatch(u8),

    /// Stream ended before a complete frame was read
    #[error("Truncated message")]
    TruncatedMessage,

    /// Request reserved byte was not zero
    #[error("Invalid reserved field: {0}")]
    ReservedFieldInvalid(u8),

    /// Request command byte is not CONNECT, BIND or UDP ASSOCIATE
    #[error("Command not supported: {0}")]
    CommandUnsupported(u8),

    /// Request address type is not IPv4, domain or IPv6
    #[error("Address type not supported: {0}")]
    AddressTypeUnsupported(u8),

    /// Username/password frame carried a version other than 1
    #[error("Unsupported sub-negotiation version: {0}")]
    SubNegotiationVersionMismatch(u8),

    /// Client offered none of the configured methods
    #[error("No acceptable authentication method")]
    NoAcceptableAuthMethod,

    /// Credential check refused the username/password pair
    #[error("Authentication failed")]
    CredentialRejected,

    /// IPv6 destinations are refused by policy
    #[error("IPv6 destination address rejected")]
    AddressTypeRejected,

    /// Command decoded fine but has no implementation
    #[error("Command not implemented: {0}")]
    CommandUnimplemented(SocksCommand),

    /// Dialing the destination failed or timed out
    #[error("Upstream {target} unreachable: {source}")]
    UpstreamUnreachable {
        /// Destination as requested by the client
        target: String,
        /// Dial failure
        #[source]
        source: io::Error,
    },

    /// Success reply could not be delivered to the client
    #[error("Failed to write reply to client: {0}")]
    ClientWriteFailed(#[source] io::Error),

    /// Server configuration is unusable
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Socket error other than a short read
    #[error("IO error: {0}")]
    Io(#[source] io::Error),
}

impl Socks5Error {
    /// Whether the error means the received bytes cannot be trusted.
    ///
    /// Such connections are closed without a reply.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Socks5Error::ProtocolVersionMismatch(_)
                | Socks5Error::TruncatedMessage
                | Socks5Error::ReservedFieldInvalid(_)
                | Socks5Error::CommandUnsupported(_)
                | Socks5Error::AddressTypeUnsupported(_)
                | Socks5Error::SubNegotiationVersionMismatch(_)
                | Socks5Error::Io(_)
        )
    }
}

impl From<io::Error> for Socks5Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Socks5Error::TruncatedMessage,
            _ => Socks5Error::Io(err),
        }
    }
}

/// Reply codes for SOCKS5 protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Socks5ReplyCode {
    /// Command succeeded
    Succeeded = 0x00,
    /// General SOCKS server failure
    GeneralFailure = 0x01,
    /// Connection not allowed by ruleset
    ConnectionNotAllowed = 0x02,
    /// Network unreachable
    NetworkUnreachable = 0x03,
    /// Host unreachable
    HostUnreachable = 0x04,
    /// Connection refused
    ConnectionRefused = 0x05,
    /// TTL expired
    TtlExpired = 0x06,
    /// Command not supported
    CommandNotSupported = 0x07,
    /// Address type not supported
    AddressTypeNotSupported = 0x08,
}

impl From<Socks5ReplyCode> for u8 {
    fn from(code: Socks5ReplyCode) -> Self {
        code as u8
    }
}

impl TryFrom<u8> for Socks5ReplyCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Socks5ReplyCode::Succeeded),
            0x01 => Ok(Socks5ReplyCode::GeneralFailure),
            0x02 => Ok(Socks5ReplyCode::ConnectionNotAllowed),
            0x03 => Ok(Socks5ReplyCode::NetworkUnreachable),
            0x04 => Ok(Socks5ReplyCode::HostUnreachable),
            0x05 => Ok(Socks5ReplyCode::ConnectionRefused),
            0x06 => Ok(Socks5ReplyCode::TtlExpired),
            0x07 => Ok(Socks5ReplyCode::CommandNotSupported),
            0x08 => Ok(Socks5ReplyCode::AddressTypeNotSupported),
            other => Err(other),
        }
    }
}
