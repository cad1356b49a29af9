//! Runtime settings shared by every SOCKS5 connection
//!
//! A [`Socks5Context`] is built once at startup, validated, and then shared
//! read-only across all connection tasks.

use super::auth::AuthMethod;
use crate::error::Socks5Error;
use crate::transport::{Dialer, TcpDialer};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Credential check for username/password authentication.
///
/// Called concurrently from many connection tasks; any state it consults
/// must be synchronized by the checker itself.
pub type CredentialChecker = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;

/// Default timeout for dialing CONNECT destinations
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Validated server settings
#[derive(Clone)]
pub struct Socks5Context {
    auth_method: AuthMethod,
    credential_checker: Option<CredentialChecker>,
    dial_timeout: Duration,
    dialer: Arc<dyn Dialer>,
}

impl Socks5Context {
    /// Build a context, dialing upstreams over plain TCP.
    ///
    /// Fails with [`Socks5Error::ConfigInvalid`] if password authentication
    /// is selected without a credential checker, or if GSSAPI is selected.
    pub fn new(
        auth_method: AuthMethod,
        credential_checker: Option<CredentialChecker>,
        dial_timeout: Duration,
    ) -> Result<Self, Socks5Error> {
        match auth_method {
            AuthMethod::Password if credential_checker.is_none() => {
                return Err(Socks5Error::ConfigInvalid(
                    "password authentication selected but no credential checker set".to_string(),
                ));
            }
            AuthMethod::Gssapi => {
                return Err(Socks5Error::ConfigInvalid(
                    "GSSAPI authentication is not supported".to_string(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            auth_method,
            credential_checker,
            dial_timeout,
            dialer: Arc::new(TcpDialer::with_defaults()),
        })
    }

    /// Context that requires no authentication
    pub fn no_auth(dial_timeout: Duration) -> Self {
        Self {
            auth_method: AuthMethod::None,
            credential_checker: None,
            dial_timeout,
            dialer: Arc::new(TcpDialer::with_defaults()),
        }
    }

    /// Context that requires username/password authentication
    pub fn with_password<F>(checker: F, dial_timeout: Duration) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        Self {
            auth_method: AuthMethod::Password,
            credential_checker: Some(Arc::new(checker)),
            dial_timeout,
            dialer: Arc::new(TcpDialer::with_defaults()),
        }
    }

    /// Replace the dialer used for CONNECT
    pub fn with_dialer(mut self, dialer: Arc<dyn Dialer>) -> Self {
        self.dialer = dialer;
        self
    }

    /// The single method this server accepts
    pub fn auth_method(&self) -> AuthMethod {
        self.auth_method
    }

    /// Credential checker, present whenever password auth is selected
    pub fn credential_checker(&self) -> Option<&CredentialChecker> {
        self.credential_checker.as_ref()
    }

    /// Timeout for dialing CONNECT destinations
    pub fn dial_timeout(&self) -> Duration {
        self.dial_timeout
    }

    /// Dialer used for CONNECT
    pub fn dialer(&self) -> &dyn Dialer {
        self.dialer.as_ref()
    }
}

impl fmt::Debug for Socks5Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Socks5Context")
            .field("auth_method", &self.auth_method)
            .field("has_credential_checker", &self.credential_checker.is_some())
            .field("dial_timeout", &self.dial_timeout)
            .field("dialer", &self.dialer)
            .finish()
    }
}
