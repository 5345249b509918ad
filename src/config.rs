use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use url::Url;

pub const DEFAULT_UPSTAGE_BASE_URL: &str = "https://api.upstage.ai/v1";
pub const DEFAULT_UPSTAGE_MODEL: &str = "solar-pro";
pub const DEFAULT_MOCKAPI_URL: &str = "https://69423e10686bc3ca8169004a.mockapi.io/Questions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub upstage_api_key: Option<String>,
    pub upstage_base_url: String,
    pub upstage_model: String,
    pub mockapi_url: String,
    pub max_input_chars: usize,
    pub http_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:3000".to_string(),
            upstage_api_key: None,
            upstage_base_url: DEFAULT_UPSTAGE_BASE_URL.to_string(),
            upstage_model: DEFAULT_UPSTAGE_MODEL.to_string(),
            mockapi_url: DEFAULT_MOCKAPI_URL.to_string(),
            max_input_chars: 15_000,
            http_timeout_secs: 120,
            max_body_bytes: 25 * 1024 * 1024,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Self::default();

        let log_format = match get_env_or("LOG_FORMAT", "text").to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" | "" => LogFormat::Text,
            other => {
                return Err(Error::Config(format!("Invalid value for LOG_FORMAT: {}", other)))
            }
        };

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", &defaults.server_address),
            upstage_api_key: env::var("UPSTAGE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            upstage_base_url: get_url("UPSTAGE_BASE_URL", &defaults.upstage_base_url)?,
            upstage_model: get_env_or("UPSTAGE_MODEL", &defaults.upstage_model),
            mockapi_url: get_url("MOCKAPI_URL", &defaults.mockapi_url)?,
            max_input_chars: get_env_parse_or("MAX_INPUT_CHARS", defaults.max_input_chars)?,
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            max_body_bytes: get_env_parse_or("MAX_BODY_BYTES", defaults.max_body_bytes)?,
            log_format,
        })
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(default),
    }
}

fn get_url(name: &str, default: &str) -> Result<String> {
    let raw = get_env_or(name, default);
    Url::parse(&raw).map_err(|e| Error::Config(format!("Invalid URL in {}: {}", name, e)))?;
    Ok(raw.trim_end_matches('/').to_string())
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
