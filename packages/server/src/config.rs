//! Server configuration (command line flags with environment fallbacks).

use axum::http::HeaderValue;
use clap::Parser;
use thiserror::Error;

use crate::domain::DEFAULT_HISTORY_CAPACITY;

/// Configuration errors detected at startup
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// History must hold at least one message
    #[error("history capacity must be at least 1")]
    HistoryCapacityZero,

    /// An allowed origin is not a valid header value
    #[error("invalid allowed origin: '{0}'")]
    InvalidOrigin(String),
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "cinechat-server")]
#[command(about = "Real-time chat relay with shared history and presence count", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Number of recent messages replayed to newly connecting clients
    #[arg(long, env = "HISTORY_CAPACITY", default_value_t = DEFAULT_HISTORY_CAPACITY)]
    pub history_capacity: usize,

    /// Origins allowed by CORS (comma separated)
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values_t = [
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ]
    )]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check the values that clap cannot validate on its own
    ///
    /// Returns the allowed origins as header values on success.
    pub fn validate(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::HistoryCapacityZero);
        }
        self.cors_origins()
    }

    /// Allowed origins as header values
    pub fn cors_origins(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    const ENV_VARS: [&str; 4] = ["HOST", "PORT", "HISTORY_CAPACITY", "ALLOWED_ORIGINS"];

    /// テスト間で環境変数の書き換えが競合しないようにする
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in ENV_VARS {
            // SAFETY: 環境変数を読むテストは ENV_LOCK を保持している
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    fn test_parse_explicit_flags() {
        // テスト項目: コマンドライン引数から設定を読み取れる
        // when (操作):
        let config = ServerConfig::try_parse_from([
            "cinechat-server",
            "--host",
            "0.0.0.0",
            "--port",
            "4000",
            "--history-capacity",
            "50",
            "--allowed-origins",
            "https://a.example,https://b.example",
        ])
        .unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "0.0.0.0:4000");
        assert_eq!(config.history_capacity, 50);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_history_capacity_and_origins() {
        // テスト項目: 既定値は履歴 100 件・localhost:3000 の CORS 許可
        // given (前提条件):
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        // when (操作):
        let config = ServerConfig::try_parse_from(["cinechat-server"]).unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "127.0.0.1:3001");
        assert_eq!(config.history_capacity, 100);
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
    }

    #[test]
    fn test_environment_variables_fill_unset_flags() {
        // テスト項目: フラグ未指定の項目は環境変数から読み取られる
        // given (前提条件):
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        // SAFETY: 環境変数を読むテストは ENV_LOCK を保持している
        unsafe {
            std::env::set_var("HOST", "0.0.0.0");
            std::env::set_var("PORT", "4100");
            std::env::set_var("HISTORY_CAPACITY", "7");
            std::env::set_var("ALLOWED_ORIGINS", "http://x.example,http://y.example");
        }

        // when (操作):
        let from_env = ServerConfig::try_parse_from(["cinechat-server"]);
        let with_flag = ServerConfig::try_parse_from(["cinechat-server", "--port", "5000"]);
        clear_env();

        // then (期待する結果):
        let from_env = from_env.unwrap();
        assert_eq!(from_env.bind_addr(), "0.0.0.0:4100");
        assert_eq!(from_env.history_capacity, 7);
        assert_eq!(
            from_env.allowed_origins,
            vec!["http://x.example", "http://y.example"]
        );
        // コマンドライン引数は環境変数より優先される
        assert_eq!(with_flag.unwrap().port, 5000);
    }

    #[test]
    fn test_validate_returns_cors_origins() {
        // テスト項目: 検証に成功すると CORS の許可オリジンが返る
        // given (前提条件):
        let config = ServerConfig::try_parse_from([
            "cinechat-server",
            "--allowed-origins",
            "http://a.example",
        ])
        .unwrap();

        // when (操作):
        let origins = config.validate();

        // then (期待する結果):
        assert_eq!(
            origins,
            Ok(vec![HeaderValue::from_static("http://a.example")])
        );
    }

    #[test]
    fn test_validate_rejects_zero_history_capacity() {
        // テスト項目: 履歴容量 0 は起動時に拒否される
        // given (前提条件):
        let config =
            ServerConfig::try_parse_from(["cinechat-server", "--history-capacity", "0"]).unwrap();

        // when (操作):
        let result = config.validate();

        // then (期待する結果):
        assert_eq!(result, Err(ConfigError::HistoryCapacityZero));
    }

    #[test]
    fn test_validate_rejects_invalid_origin() {
        // テスト項目: ヘッダー値として不正なオリジンは拒否される
        // given (前提条件):
        let config = ServerConfig::try_parse_from([
            "cinechat-server",
            "--allowed-origins",
            "http://ok.example,bad\norigin",
        ])
        .unwrap();

        // when (操作):
        let result = config.validate();

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConfigError::InvalidOrigin("bad\norigin".to_string()))
        );
    }

    #[test]
    fn test_cors_origins_skips_blank_entries() {
        // テスト項目: 空のオリジン指定は無視される
        // given (前提条件):
        let config = ServerConfig::try_parse_from([
            "cinechat-server",
            "--allowed-origins",
            "http://a.example,,",
        ])
        .unwrap();

        // when (操作):
        let origins = config.cors_origins().unwrap();

        // then (期待する結果):
        assert_eq!(origins, vec![HeaderValue::from_static("http://a.example")]);
    }
}
