//! SOCKS5 type definitions
//!
//! Defines the core types used in SOCKS5 protocol handling.

use super::consts::*;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// SOCKS5 command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocksCommand {
    /// TCP CONNECT - establish a TCP connection to target
    Connect,
    /// TCP BIND - wait for incoming connection (not implemented)
    Bind,
    /// UDP ASSOCIATE - establish UDP relay (not implemented)
    UdpAssociate,
}

impl SocksCommand {
    /// Parse a command byte into SocksCommand
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            SOCKS5_CMD_TCP_CONNECT => Some(SocksCommand::Connect),
            SOCKS5_CMD_TCP_BIND => Some(SocksCommand::Bind),
            SOCKS5_CMD_UDP_ASSOCIATE => Some(SocksCommand::UdpAssociate),
            _ => None,
        }
    }

    /// Convert SocksCommand to byte
    pub fn to_byte(self) -> u8 {
        match self {
            SocksCommand::Connect => SOCKS5_CMD_TCP_CONNECT,
            SocksCommand::Bind => SOCKS5_CMD_TCP_BIND,
            SocksCommand::UdpAssociate => SOCKS5_CMD_UDP_ASSOCIATE,
        }
    }
}

impl fmt::Display for SocksCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocksCommand::Connect => write!(f, "CONNECT"),
            SocksCommand::Bind => write!(f, "BIND"),
            SocksCommand::UdpAssociate => write!(f, "UDP ASSOCIATE"),
        }
    }
}

/// Address type (`ATYP`) of a request or reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressType {
    /// 4-byte IPv4 address
    Ipv4,
    /// Length-prefixed domain name
    Domain,
    /// 16-byte IPv6 address
    Ipv6,
}

impl AddressType {
    /// Parse an address type byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            SOCKS5_ADDR_TYPE_IPV4 => Some(AddressType::Ipv4),
            SOCKS5_ADDR_TYPE_DOMAIN => Some(AddressType::Domain),
            SOCKS5_ADDR_TYPE_IPV6 => Some(AddressType::Ipv6),
            _ => None,
        }
    }

    /// Convert to the wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            AddressType::Ipv4 => SOCKS5_ADDR_TYPE_IPV4,
            AddressType::Domain => SOCKS5_ADDR_TYPE_DOMAIN,
            AddressType::Ipv6 => SOCKS5_ADDR_TYPE_IPV6,
        }
    }
}

/// Target address for SOCKS5 requests
///
/// Represents the destination address in a SOCKS5 request.
/// Can be an IP address (v4 or v6) or a domain name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetAddr {
    /// IP address with port
    Ip(SocketAddr),
    /// Domain name with port
    Domain(String, u16),
}

impl TargetAddr {
    /// Create a new TargetAddr from an IPv4 address and port
    pub fn ipv4(ip: Ipv4Addr, port: u16) -> Self {
        TargetAddr::Ip(SocketAddr::new(IpAddr::V4(ip), port))
    }

    /// Create a new TargetAddr from an IPv6 address and port
    pub fn ipv6(ip: Ipv6Addr, port: u16) -> Self {
        TargetAddr::Ip(SocketAddr::new(IpAddr::V6(ip), port))
    }

    /// Create a new TargetAddr from a domain name and port
    pub fn domain(domain: String, port: u16) -> Self {
        TargetAddr::Domain(domain, port)
    }

    /// Host part in textual form: canonical IP text or the domain verbatim
    pub fn host(&self) -> String {
        match self {
            TargetAddr::Ip(addr) => addr.ip().to_string(),
            TargetAddr::Domain(domain, _) => domain.clone(),
        }
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        match self {
            TargetAddr::Ip(addr) => addr.port(),
            TargetAddr::Domain(_, port) => *port,
        }
    }

    /// Address type this target was encoded with
    pub fn addr_type(&self) -> AddressType {
        match self {
            TargetAddr::Ip(SocketAddr::V4(_)) => AddressType::Ipv4,
            TargetAddr::Ip(SocketAddr::V6(_)) => AddressType::Ipv6,
            TargetAddr::Domain(_, _) => AddressType::Domain,
        }
    }
}

impl fmt::Display for TargetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetAddr::Ip(addr) => write!(f, "{}", addr),
            TargetAddr::Domain(domain, port) => write!(f, "{}:{}", domain, port),
        }
    }
}

impl From<SocketAddr> for TargetAddr {
    fn from(addr: SocketAddr) -> Self {
        TargetAddr::Ip(addr)
    }
}

/// A decoded client request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRequest {
    /// Requested command
    pub command: SocksCommand,
    /// Destination host and port
    pub target: TargetAddr,
}

impl ConnectionRequest {
    /// Address type the client used for the destination
    pub fn addr_type(&self) -> AddressType {
        self.target.addr_type()
    }
}
