//! SOCKS5 authentication module
//!
//! Handles authentication negotiation and username/password authentication.

mod password;
mod users;

pub use password::{authenticate_password, write_password_result, PasswordCredential};
pub use users::UserTable;

use super::consts::*;
use super::context::Socks5Context;
use crate::error::Socks5Error;
use std::fmt;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Authentication method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// No authentication required
    None,
    /// GSSAPI, recognized on the wire but never selectable
    Gssapi,
    /// Username/password authentication
    Password,
}

impl AuthMethod {
    /// Convert to SOCKS5 method byte
    pub fn to_byte(self) -> u8 {
        match self {
            AuthMethod::None => SOCKS5_AUTH_METHOD_NONE,
            AuthMethod::Gssapi => SOCKS5_AUTH_METHOD_GSSAPI,
            AuthMethod::Password => SOCKS5_AUTH_METHOD_PASSWORD,
        }
    }

    /// Parse from SOCKS5 method byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            SOCKS5_AUTH_METHOD_NONE => Some(AuthMethod::None),
            SOCKS5_AUTH_METHOD_GSSAPI => Some(AuthMethod::Gssapi),
            SOCKS5_AUTH_METHOD_PASSWORD => Some(AuthMethod::Password),
            _ => None,
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::None => write!(f, "NO AUTHENTICATION REQUIRED"),
            AuthMethod::Gssapi => write!(f, "GSSAPI"),
            AuthMethod::Password => write!(f, "USERNAME/PASSWORD"),
        }
    }
}

/// Methods offered by the client in its greeting
///
/// ```text
/// +----+----------+----------+
/// |VER | NMETHODS | METHODS  |
/// +----+----------+----------+
/// | 1  |    1     | 1 to 255 |
/// +----+----------+----------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOffer {
    /// Method bytes in the order the client sent them
    pub methods: Vec<u8>,
}

impl AuthOffer {
    /// Read a greeting from the stream.
    ///
    /// The version is checked before any method byte is consumed.
    pub async fn read_from<S>(stream: &mut S) -> Result<Self, Socks5Error>
    where
        S: AsyncRead + Unpin,
    {
        let mut header = [0u8; 2];
        stream.read_exact(&mut header).await?;

        let version = header[0];
        if version != SOCKS5_VERSION {
            return Err(Socks5Error::ProtocolVersionMismatch(version));
        }

        let mut methods = vec![0u8; header[1] as usize];
        stream.read_exact(&mut methods).await?;

        Ok(Self { methods })
    }

    /// Whether the client offered `method`
    pub fn offers(&self, method: AuthMethod) -> bool {
        self.methods.contains(&method.to_byte())
    }
}

/// Send the server's method choice, `None` meaning no acceptable method
pub async fn write_auth_choice<S>(stream: &mut S, method: Option<AuthMethod>) -> std::io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    let method_byte = method
        .map(AuthMethod::to_byte)
        .unwrap_or(SOCKS5_AUTH_METHOD_NOT_ACCEPTABLE);
    stream.write_all(&[SOCKS5_VERSION, method_byte]).await?;
    stream.flush().await
}

/// Perform authentication negotiation and authentication
///
/// This function handles the complete SOCKS5 authentication flow:
/// 1. Read client's supported methods
/// 2. Select the configured method if the client offered it
/// 3. Run the username/password exchange if that method was selected
///
/// Exactly one method choice is written, even when negotiation fails.
pub async fn authenticate<S>(stream: &mut S, context: &Socks5Context) -> Result<AuthMethod, Socks5Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let offer = AuthOffer::read_from(stream).await?;
    debug!("Client offered auth methods: {:?}", offer.methods);

    let Some(method) = select_auth_method(&offer, context.auth_method()) else {
        warn!("No acceptable authentication method in {:?}", offer.methods);
        if let Err(e) = write_auth_choice(stream, None).await {
            debug!("Failed to send method rejection: {}", e);
        }
        return Err(Socks5Error::NoAcceptableAuthMethod);
    };

    write_auth_choice(stream, Some(method)).await?;

    match method {
        AuthMethod::None => {}
        AuthMethod::Password => {
            let checker = context.credential_checker().ok_or_else(|| {
                Socks5Error::ConfigInvalid("credential checker not configured".to_string())
            })?;
            authenticate_password(stream, checker).await?;
        }
        AuthMethod::Gssapi => {
            return Err(Socks5Error::ConfigInvalid(
                "GSSAPI authentication is not supported".to_string(),
            ));
        }
    }

    Ok(method)
}

/// Pick the configured method if the client offered it
fn select_auth_method(offer: &AuthOffer, configured: AuthMethod) -> Option<AuthMethod> {
    offer.offers(configured).then_some(configured)
}
