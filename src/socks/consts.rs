//! SOCKS5 protocol constants
//!
//! Wire values from RFC 1928 (SOCKS5) and RFC 1929 (username/password).

/// SOCKS5 protocol version
pub const SOCKS5_VERSION: u8 = 0x05;

/// Username/password sub-negotiation version
pub const SOCKS5_AUTH_VERSION: u8 = 0x01;

// Authentication methods
/// No authentication required
pub const SOCKS5_AUTH_METHOD_NONE: u8 = 0x00;
/// GSSAPI authentication (never selectable)
pub const SOCKS5_AUTH_METHOD_GSSAPI: u8 = 0x01;
/// Username/password authentication
pub const SOCKS5_AUTH_METHOD_PASSWORD: u8 = 0x02;
/// No acceptable methods
pub const SOCKS5_AUTH_METHOD_NOT_ACCEPTABLE: u8 = 0xFF;

// Username/password status
/// Credentials accepted
pub const SOCKS5_AUTH_STATUS_SUCCESS: u8 = 0x00;
/// Credentials rejected
pub const SOCKS5_AUTH_STATUS_FAILURE: u8 = 0x01;

// Commands
/// TCP CONNECT command
pub const SOCKS5_CMD_TCP_CONNECT: u8 = 0x01;
/// TCP BIND command
pub const SOCKS5_CMD_TCP_BIND: u8 = 0x02;
/// UDP ASSOCIATE command
pub const SOCKS5_CMD_UDP_ASSOCIATE: u8 = 0x03;

// Address types
/// IPv4 address
pub const SOCKS5_ADDR_TYPE_IPV4: u8 = 0x01;
/// Domain name
pub const SOCKS5_ADDR_TYPE_DOMAIN: u8 = 0x03;
/// IPv6 address
pub const SOCKS5_ADDR_TYPE_IPV6: u8 = 0x04;

/// Reserved byte value (always 0x00)
pub const SOCKS5_RESERVED: u8 = 0x00;

// Field lengths
/// IPv4 address length on the wire
pub const IPV4_ADDR_LEN: usize = 4;
/// IPv6 address length on the wire
pub const IPV6_ADDR_LEN: usize = 16;
/// Port length on the wire
pub const PORT_LEN: usize = 2;

/// Size of a failure reply frame (header, zeroed IPv4 address and port)
pub const FAILURE_REPLY_LEN: usize = 4 + IPV4_ADDR_LEN + PORT_LEN;
