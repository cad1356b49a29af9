//! Test utilities and mocks for Socksd
//!
//! This module provides common test utilities used across integration tests.

#![allow(dead_code)]

use socksd::config::{AuthMode, SocksConfig};
use socksd::{Socks5Context, Socks5Server};
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

/// Create a test TCP listener on an available port
pub async fn create_test_listener() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Address nothing is listening on
pub async fn closed_port_addr() -> SocketAddr {
    let (listener, addr) = create_test_listener().await;
    drop(listener);
    addr
}

/// Start an echo server that half-closes once the peer does
pub async fn start_echo_server() -> SocketAddr {
    let (listener, addr) = create_test_listener().await;

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let (mut reader, mut writer) = stream.split();
                let _ = tokio::io::copy(&mut reader, &mut writer).await;
                let _ = writer.shutdown().await;
            });
        }
    });

    addr
}

/// A running proxy, stopped when dropped
pub struct TestProxy {
    /// Address clients connect to
    pub addr: SocketAddr,
    shutdown_tx: broadcast::Sender<bool>,
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Start a proxy on an ephemeral port
pub async fn start_proxy(context: Socks5Context) -> TestProxy {
    let server = Socks5Server::bind("127.0.0.1:0", context).await.unwrap();
    let addr = server.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    tokio::spawn(server.run(shutdown_rx));

    TestProxy { addr, shutdown_tx }
}

/// Connect a plain TCP client to the proxy
pub async fn connect(proxy: &TestProxy) -> TcpStream {
    TcpStream::connect(proxy.addr).await.unwrap()
}

/// Test configuration builder
#[derive(Default)]
pub struct TestConfigBuilder {
    users: HashMap<String, String>,
    dial_timeout: Option<u64>,
}

impl TestConfigBuilder {
    /// Create a new test config builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user and switch to password authentication
    pub fn user(mut self, username: &str, password: &str) -> Self {
        self.users.insert(username.to_string(), password.to_string());
        self
    }

    /// Set dial timeout in seconds
    pub fn dial_timeout(mut self, secs: u64) -> Self {
        self.dial_timeout = Some(secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> SocksConfig {
        let defaults = SocksConfig::default();
        SocksConfig {
            auth_method: if self.users.is_empty() {
                AuthMode::None
            } else {
                AuthMode::Password
            },
            users: self.users,
            dial_timeout: self.dial_timeout.unwrap_or(defaults.dial_timeout),
            tcp: defaults.tcp,
        }
    }
}

/// Mock SOCKS5 handshake data
pub mod socks5_mock {
    use socksd::socks::*;
    use std::net::{Ipv6Addr, SocketAddr};

    /// Create a no-auth method selection request
    pub fn create_auth_request_no_auth() -> Vec<u8> {
        vec![SOCKS5_VERSION, 1, SOCKS5_AUTH_METHOD_NONE]
    }

    /// Create a password auth method selection request
    pub fn create_auth_request_password() -> Vec<u8> {
        vec![SOCKS5_VERSION, 1, SOCKS5_AUTH_METHOD_PASSWORD]
    }

    /// Create a username/password sub-negotiation frame
    pub fn create_credentials(username: &str, password: &str) -> Vec<u8> {
        let mut request = vec![SOCKS5_AUTH_VERSION, username.len() as u8];
        request.extend_from_slice(username.as_bytes());
        request.push(password.len() as u8);
        request.extend_from_slice(password.as_bytes());
        request
    }

    /// Create a request for `cmd` to a socket address
    pub fn create_command(cmd: u8, addr: SocketAddr) -> Vec<u8> {
        let mut request = vec![SOCKS5_VERSION, cmd, SOCKS5_RESERVED];
        match addr {
            SocketAddr::V4(v4) => {
                request.push(SOCKS5_ADDR_TYPE_IPV4);
                request.extend_from_slice(&v4.ip().octets());
            }
            SocketAddr::V6(v6) => {
                request.push(SOCKS5_ADDR_TYPE_IPV6);
                request.extend_from_slice(&v6.ip().octets());
            }
        }
        request.extend_from_slice(&addr.port().to_be_bytes());
        request
    }

    /// Create a connect command to a socket address
    pub fn create_connect(addr: SocketAddr) -> Vec<u8> {
        create_command(SOCKS5_CMD_TCP_CONNECT, addr)
    }

    /// Create a connect command to an IPv6 address
    pub fn create_connect_ipv6(ip: Ipv6Addr, port: u16) -> Vec<u8> {
        create_connect(SocketAddr::new(ip.into(), port))
    }

    /// Create a connect command to domain
    pub fn create_connect_domain(domain: &str, port: u16) -> Vec<u8> {
        let mut cmd = vec![
            SOCKS5_VERSION,
            SOCKS5_CMD_TCP_CONNECT,
            SOCKS5_RESERVED,
            SOCKS5_ADDR_TYPE_DOMAIN,
            domain.len() as u8,
        ];
        cmd.extend_from_slice(domain.as_bytes());
        cmd.extend_from_slice(&port.to_be_bytes());
        cmd
    }

    /// The fixed-size failure reply for `code`
    pub fn failure_reply(code: u8) -> [u8; FAILURE_REPLY_LEN] {
        [
            SOCKS5_VERSION,
            code,
            SOCKS5_RESERVED,
            SOCKS5_ADDR_TYPE_IPV4,
            0,
            0,
            0,
            0,
            0,
            0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_test_listener() {
        let (listener, addr) = create_test_listener().await;
        assert!(addr.port() > 0);
        drop(listener);
    }

    #[test]
    fn test_config_builder() {
        let config = TestConfigBuilder::new()
            .user("testuser", "testpass")
            .dial_timeout(2)
            .build();

        assert_eq!(config.auth_method, AuthMode::Password);
        assert_eq!(config.users["testuser"], "testpass");
        assert_eq!(config.dial_timeout, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_socks5_mock_connect_ipv4() {
        let cmd = socks5_mock::create_connect("192.168.1.1:8080".parse().unwrap());
        assert_eq!(cmd[0], 5); // SOCKS5 version
        assert_eq!(cmd[1], 1); // CONNECT
        assert_eq!(cmd[3], 1); // IPv4
        assert_eq!(&cmd[4..8], &[192, 168, 1, 1]);
        assert_eq!(&cmd[8..10], &8080u16.to_be_bytes());
    }
}
