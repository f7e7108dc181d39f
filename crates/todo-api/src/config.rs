//! 環境変数からの設定読み込み
//!
//! | 変数 | 既定値 |
//! |---|---|
//! | `HOST` | `127.0.0.1` |
//! | `PORT` | `3000` |
//! | `LOG_FORMAT` | `pretty`（`json` も可） |
//! | `SEED_SAMPLE_TODOS` | `false` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// サーバ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_format: LogFormat,
    /// 起動時にサンプル Todo を投入するか
    pub seed_samples: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            log_format: LogFormat::Pretty,
            seed_samples: false,
        }
    }
}

impl Config {
    /// プロセスの環境変数から読み込みます。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から読み込みます（テスト用に環境変数を差し替え可能）。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|_| invalid("HOST", raw))?,
            None => defaults.host,
        };
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| invalid("PORT", raw))?,
            None => defaults.port,
        };
        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "pretty" | "text" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => return Err(invalid("LOG_FORMAT", raw)),
            },
            None => defaults.log_format,
        };
        let seed_samples = match lookup("SEED_SAMPLE_TODOS") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| invalid("SEED_SAMPLE_TODOS", raw))?,
            None => defaults.seed_samples,
        };

        Ok(Self { host, port, log_format, seed_samples })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn invalid(name: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidValue { name, value }
}
