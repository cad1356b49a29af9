//! SOCKS5 module for Socksd
//!
//! This module implements the server side of the SOCKS5 protocol
//! (RFC 1928) with optional username/password authentication (RFC 1929).
//! It runs on any async byte stream, so the listener decides where
//! connections come from.

mod auth;
mod command;
mod consts;
mod context;
mod handler;
mod tcp_relay;
mod types;

pub use auth::{
    authenticate, authenticate_password, write_auth_choice, write_password_result, AuthMethod,
    AuthOffer, PasswordCredential, UserTable,
};
pub use command::{encode_failure, encode_reply, parse_command, read_request};
pub use consts::*;
pub use context::{CredentialChecker, Socks5Context, DEFAULT_DIAL_TIMEOUT};
pub use handler::{dispatch_command, handle_socks5_on_stream};
pub use tcp_relay::{handle_tcp_connect, relay_tcp};
pub use types::{AddressType, ConnectionRequest, SocksCommand, TargetAddr};
