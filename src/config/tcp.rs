//! Socket options for dialed upstream connections

use serde::{Deserialize, Serialize};

/// Default keepalive seconds
fn default_keepalive_secs() -> u64 {
    20
}

/// Default keepalive interval
fn default_keepalive_interval() -> u64 {
    8
}

fn default_nodelay() -> bool {
    true
}

/// TCP socket configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TcpConfig {
    /// Enable TCP_NODELAY
    #[serde(default = "default_nodelay")]
    pub nodelay: bool,

    /// TCP keepalive timeout in seconds, 0 disables keepalive
    #[serde(default = "default_keepalive_secs")]
    pub keepalive_secs: u64,

    /// TCP keepalive interval in seconds
    #[serde(default = "default_keepalive_interval")]
    pub keepalive_interval: u64,
}

impl Default for TcpConfig {
    fn default() -> Self {
        TcpConfig {
            nodelay: default_nodelay(),
            keepalive_secs: default_keepalive_secs(),
            keepalive_interval: default_keepalive_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tcp_config_default() {
        let config = TcpConfig::default();
        assert!(config.nodelay);
        assert_eq!(config.keepalive_secs, 20);
        assert_eq!(config.keepalive_interval, 8);
    }

    #[test]
    fn test_partial_tcp_config_uses_defaults() {
        let config: TcpConfig = toml::from_str("keepalive_secs = 0").unwrap();
        assert!(config.nodelay);
        assert_eq!(config.keepalive_secs, 0);
        assert_eq!(config.keepalive_interval, 8);
    }
}
