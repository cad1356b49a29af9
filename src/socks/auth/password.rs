//! Username/password authentication handler
//!
//! Implements RFC 1929 username/password authentication for SOCKS5.

use crate::error::Socks5Error;
use crate::socks::consts::*;
use crate::socks::context::CredentialChecker;
use std::fmt;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Credentials sent by the client
///
/// ```text
/// +----+------+----------+------+----------+
/// |VER | ULEN |  UNAME   | PLEN |  PASSWD  |
/// +----+------+----------+------+----------+
/// | 1  |  1   | 0 to 255 |  1   | 0 to 255 |
/// +----+------+----------+------+----------+
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl PasswordCredential {
    /// Read a credential frame from the stream
    pub async fn read_from<S>(stream: &mut S) -> Result<Self, Socks5Error>
    where
        S: AsyncRead + Unpin,
    {
        let mut header = [0u8; 2];
        stream.read_exact(&mut header).await?;

        let version = header[0];
        if version != SOCKS5_AUTH_VERSION {
            return Err(Socks5Error::SubNegotiationVersionMismatch(version));
        }

        // Username is followed by the password length byte
        let mut buf = vec![0u8; header[1] as usize + 1];
        stream.read_exact(&mut buf).await?;
        let password_len = buf.pop().unwrap_or_default() as usize;
        let username = String::from_utf8_lossy(&buf).into_owned();

        let mut password = vec![0u8; password_len];
        stream.read_exact(&mut password).await?;
        let password = String::from_utf8_lossy(&password).into_owned();

        Ok(Self { username, password })
    }
}

impl fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Send the sub-negotiation status to the client
///
/// ```text
/// +----+--------+
/// |VER | STATUS |
/// +----+--------+
/// | 1  |   1    |
/// +----+--------+
/// ```
pub async fn write_password_result<S>(stream: &mut S, accepted: bool) -> std::io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    let status = if accepted {
        SOCKS5_AUTH_STATUS_SUCCESS
    } else {
        SOCKS5_AUTH_STATUS_FAILURE
    };
    stream.write_all(&[SOCKS5_AUTH_VERSION, status]).await?;
    stream.flush().await
}

/// Run the username/password exchange against `checker`.
///
/// A rejection is reported to the client before the error is returned.
/// A frame with the wrong sub-negotiation version also gets a failure
/// status on a best-effort basis; short frames get no reply.
pub async fn authenticate_password<S>(
    stream: &mut S,
    checker: &CredentialChecker,
) -> Result<(), Socks5Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let credential = match PasswordCredential::read_from(stream).await {
        Ok(credential) => credential,
        Err(e @ Socks5Error::SubNegotiationVersionMismatch(_)) => {
            if let Err(write_err) = write_password_result(stream, false).await {
                debug!("Failed to send auth failure: {}", write_err);
            }
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    if checker(&credential.username, &credential.password) {
        write_password_result(stream, true).await?;
        debug!("Authentication successful for user: {}", credential.username);
        Ok(())
    } else {
        warn!("Authentication failed for user: {}", credential.username);
        if let Err(e) = write_password_result(stream, false).await {
            debug!("Failed to send auth failure: {}", e);
        }
        Err(Socks5Error::CredentialRejected)
    }
}
