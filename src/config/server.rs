//! Server configuration types
//!
//! Defines the main configuration structures for the Socksd server.

use super::TcpConfig;
use crate::error::Socks5Error;
use crate::socks::{AuthMethod, Socks5Context, UserTable};
use crate::transport::{SocketOpts, TcpDialer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Default listen address
fn default_bind_addr() -> String {
    "127.0.0.1:1080".to_string()
}

/// Default dial timeout in seconds
fn default_dial_timeout() -> u64 {
    5
}

/// Root configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// SOCKS5 protocol configuration
    #[serde(default)]
    pub socks: SocksConfig,
}

/// Listener configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to accept SOCKS5 clients on (e.g., "127.0.0.1:1080")
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Authentication method accepted by the server
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// No authentication required
    #[default]
    None,
    /// Username/password checked against `users`
    Password,
}

impl From<AuthMode> for AuthMethod {
    fn from(mode: AuthMode) -> Self {
        match mode {
            AuthMode::None => AuthMethod::None,
            AuthMode::Password => AuthMethod::Password,
        }
    }
}

/// SOCKS5 server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SocksConfig {
    /// Authentication method
    #[serde(default)]
    pub auth_method: AuthMode,

    /// Username to password table for password authentication
    #[serde(default)]
    pub users: HashMap<String, String>,

    /// Timeout for dialing CONNECT destinations, in seconds
    #[serde(default = "default_dial_timeout")]
    pub dial_timeout: u64,

    /// Socket options for dialed connections
    #[serde(default)]
    pub tcp: TcpConfig,
}

impl Default for SocksConfig {
    fn default() -> Self {
        Self {
            auth_method: AuthMode::default(),
            users: HashMap::new(),
            dial_timeout: default_dial_timeout(),
            tcp: TcpConfig::default(),
        }
    }
}

impl SocksConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.auth_method == AuthMode::Password && self.users.is_empty() {
            return Err("Password authentication selected but no users configured".to_string());
        }
        if self.dial_timeout == 0 {
            return Err("dial_timeout must be at least 1 second".to_string());
        }
        Ok(())
    }

    /// Build the runtime context shared by all connections
    pub fn to_context(&self) -> Result<Socks5Context, Socks5Error> {
        self.validate().map_err(Socks5Error::ConfigInvalid)?;

        let checker = match self.auth_method {
            AuthMode::None => None,
            AuthMode::Password => Some(UserTable::new(self.users.clone()).into_checker()),
        };

        let dialer =
            TcpDialer::with_defaults().with_socket_opts(SocketOpts::from_tcp_config(&self.tcp));

        Ok(Socks5Context::new(
            self.auth_method.into(),
            checker,
            Duration::from_secs(self.dial_timeout),
        )?
        .with_dialer(Arc::new(dialer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:1080");
        assert_eq!(config.socks.auth_method, AuthMode::None);
        assert_eq!(config.socks.dial_timeout, 5);
        assert!(config.socks.users.is_empty());
    }

    #[test]
    fn test_socks_config_validate() {
        let config = SocksConfig {
            auth_method: AuthMode::Password,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SocksConfig {
            auth_method: AuthMode::Password,
            users: HashMap::from([("user".to_string(), "pass".to_string())]),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = SocksConfig::default();
        assert!(config.validate().is_ok());

        let config = SocksConfig {
            dial_timeout: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_context_no_auth() {
        let context = SocksConfig::default().to_context().unwrap();
        assert_eq!(context.auth_method(), AuthMethod::None);
        assert!(context.credential_checker().is_none());
        assert_eq!(context.dial_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_to_context_password() {
        let config = SocksConfig {
            auth_method: AuthMode::Password,
            users: HashMap::from([("admin".to_string(), "123456".to_string())]),
            dial_timeout: 3,
            ..Default::default()
        };

        let context = config.to_context().unwrap();
        assert_eq!(context.auth_method(), AuthMethod::Password);
        assert_eq!(context.dial_timeout(), Duration::from_secs(3));

        let checker = context.credential_checker().unwrap();
        assert!(checker("admin", "123456"));
        assert!(!checker("admin", "654321"));
    }

    #[test]
    fn test_to_context_rejects_invalid() {
        let config = SocksConfig {
            auth_method: AuthMode::Password,
            ..Default::default()
        };
        assert!(matches!(
            config.to_context(),
            Err(Socks5Error::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_to_context_rejects_zero_dial_timeout() {
        let config = SocksConfig {
            dial_timeout: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.to_context(),
            Err(Socks5Error::ConfigInvalid(ref msg)) if msg.contains("dial_timeout")
        ));
    }
}
