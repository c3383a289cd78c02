/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, 認可サービスの URL / タイムアウトなど)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

pub const DEFAULT_OAUTH_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_OAUTH_TIMEOUT_MS: u64 = 200;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // 認可サービス (GET {base}/oauth/access_token/{id})
    pub oauth_base_url: Url,
    pub oauth_timeout: Duration,

    // HTTP 横断設定 (middleware::http)
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let oauth_base_url = parse_base_url(
            &std::env::var("OAUTH_BASE_URL").unwrap_or_else(|_| DEFAULT_OAUTH_BASE_URL.to_string()),
        )?;

        let oauth_timeout = parse_timeout_ms(std::env::var("OAUTH_TIMEOUT_MS").ok().as_deref())?;

        let request_timeout = Duration::from_secs(
            std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );
        check_timeouts(oauth_timeout, request_timeout)?;

        let body_limit_bytes = std::env::var("BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_BODY_LIMIT_BYTES);

        Ok(Self {
            addr,
            app_env,
            oauth_base_url,
            oauth_timeout,
            request_timeout,
            body_limit_bytes,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid("OAUTH_BASE_URL"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::Invalid("OAUTH_BASE_URL")),
    }
}

// Unset falls back to the default; set but unparsable or zero is rejected.
fn parse_timeout_ms(raw: Option<&str>) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_millis(DEFAULT_OAUTH_TIMEOUT_MS));
    };
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::Invalid("OAUTH_TIMEOUT_MS")),
    }
}

// The token lookup has to give up before the whole request does.
fn check_timeouts(oauth: Duration, request: Duration) -> Result<(), ConfigError> {
    if request <= oauth {
        return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"));
    }
    Ok(())
}
