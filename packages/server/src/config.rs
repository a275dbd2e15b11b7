//! Server configuration.

use clap::Parser;

/// Room-scoped WebSocket chat server
#[derive(Debug, Clone, Parser)]
#[command(name = "hiroba-server", version, about)]
pub struct ServerConfig {
    /// Host address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: 引数なしではデフォルト値が使われる
        // when (操作):
        let config = ServerConfig::parse_from(["hiroba-server"]);

        // then (期待する結果):
        assert_eq!(config.addr(), ServerConfig::default().addr());
        assert_eq!(config.addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_custom_port() {
        // テスト項目: --host と --port を指定できる
        // when (操作):
        let config = ServerConfig::parse_from(["hiroba-server", "--host", "0.0.0.0", "-p", "8080"]);

        // then (期待する結果):
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }
}
