//! # Socksd - SOCKS5 Proxy Server
//!
//! Socksd is a SOCKS5 (RFC 1928) proxy server with optional
//! username/password authentication (RFC 1929). It accepts TCP clients,
//! negotiates authentication, validates the client's request and relays
//! CONNECT traffic to the destination.
//!
//! ## Features
//!
//! - **CONNECT**: full-duplex relay with half-close support
//! - **Authentication**: no-auth or username/password against a pluggable checker
//! - **Stream-agnostic core**: the protocol runs on any `AsyncRead + AsyncWrite` stream
//!
//! BIND and UDP ASSOCIATE are answered with "command not supported", and
//! IPv6 destinations with "address type not supported".
//!
//! ## Usage
//!
//! ```rust,ignore
//! use socksd::config::load_config;
//! use socksd::Socks5Server;
//! use tokio::sync::broadcast;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config("config.toml")?;
//!     let context = config.socks.to_context()?;
//!     let server = Socks5Server::bind(&config.server.bind_addr, context).await?;
//!     let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
//!
//!     server.run(shutdown_rx).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! SOCKS5 Client -> Socksd (auth -> request -> dispatch -> relay) -> Target
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod server;
pub mod socks;
pub mod transport;

// Re-export commonly used items
pub use config::{load_config, Config};
pub use error::{Socks5Error, Socks5ReplyCode, SocksdError};
pub use server::Socks5Server;
pub use socks::{handle_socks5_on_stream, Socks5Context};

/// Version of the Socksd library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the application
pub const NAME: &str = env!("CARGO_PKG_NAME");
