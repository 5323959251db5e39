//! Environment-driven server configuration.
//!
//! `.env` is loaded by `main` before [`ServerConfig::from_env`] runs.

use chrono::FixedOffset;
use notepad_core::logging::{default_log_level, LoggingConfig};
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names.
pub mod env_vars {
    pub const HOST: &str = "NOTEPAD_HOST";
    pub const PORT: &str = "NOTEPAD_PORT";
    pub const DATABASE_PATH: &str = "NOTEPAD_DATABASE_PATH";
    pub const LOG_LEVEL: &str = "NOTEPAD_LOG_LEVEL";
    /// Absolute directory for rolling log files. Unset means stderr.
    pub const LOG_DIR: &str = "NOTEPAD_LOG_DIR";
    /// UTC offset used for note date labels, e.g. `+09:00`.
    pub const DISPLAY_OFFSET: &str = "NOTEPAD_DISPLAY_OFFSET";
    pub const AI_API_BASE_URL: &str = "AI_API_BASE_URL";
    pub const AI_API_KEY: &str = "AI_API_KEY";
    pub const AI_MODEL: &str = "AI_MODEL";
    pub const AI_TIMEOUT_SECONDS: &str = "AI_TIMEOUT_SECONDS";
}

/// Default values.
pub mod defaults {
    pub const HOST: &str = "127.0.0.1";
    pub const PORT: u16 = 8080;
    pub const DATABASE_PATH: &str = "./.db/notepad.sqlite3";
    pub const DISPLAY_OFFSET: &str = "+00:00";
    pub const AI_API_BASE_URL: &str = "https://api.openai.com/v1";
    pub const AI_MODEL: &str = "gpt-4o-mini";
    pub const AI_TIMEOUT_SECONDS: u64 = 30;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub reason: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.reason)
    }
}

impl Error for ConfigError {}

/// Settings for the OpenAI-compatible chat client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub base_url: String,
    /// Chat requests fail as upstream errors while this is `None`.
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub logging: LoggingConfig,
    pub display_offset: FixedOffset,
    pub ai: AiConfig,
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match get(env_vars::PORT) {
            Some(value) => value.parse::<u16>().map_err(|err| ConfigError {
                variable: env_vars::PORT,
                reason: format!("`{value}` is not a port number: {err}"),
            })?,
            None => defaults::PORT,
        };

        let level = get(env_vars::LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());
        let logging = match get(env_vars::LOG_DIR) {
            Some(dir) => LoggingConfig::directory(level, dir),
            None => LoggingConfig::stderr(level),
        };

        let offset_text =
            get(env_vars::DISPLAY_OFFSET).unwrap_or_else(|| defaults::DISPLAY_OFFSET.to_string());
        let display_offset = parse_utc_offset(&offset_text).ok_or_else(|| ConfigError {
            variable: env_vars::DISPLAY_OFFSET,
            reason: format!("`{offset_text}` is not an offset like +09:00"),
        })?;

        let timeout_seconds = match get(env_vars::AI_TIMEOUT_SECONDS) {
            Some(value) => value.parse::<u64>().map_err(|err| ConfigError {
                variable: env_vars::AI_TIMEOUT_SECONDS,
                reason: format!("`{value}` is not a number of seconds: {err}"),
            })?,
            None => defaults::AI_TIMEOUT_SECONDS,
        };

        let base_url =
            get(env_vars::AI_API_BASE_URL).unwrap_or_else(|| defaults::AI_API_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError {
                variable: env_vars::AI_API_BASE_URL,
                reason: format!("`{base_url}` must start with http:// or https://"),
            });
        }

        Ok(Self {
            host: get(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_string()),
            port,
            database_path: PathBuf::from(
                get(env_vars::DATABASE_PATH)
                    .unwrap_or_else(|| defaults::DATABASE_PATH.to_string()),
            ),
            logging,
            display_offset,
            ai: AiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key: get(env_vars::AI_API_KEY),
                model: get(env_vars::AI_MODEL).unwrap_or_else(|| defaults::AI_MODEL.to_string()),
                timeout: Duration::from_secs(timeout_seconds),
            },
        })
    }
}

/// Parses `+HH:MM`, `-HH:MM`, `+HHMM`, or `Z`/`UTC`.
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    value.parse::<FixedOffset>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notepad_core::LogTarget;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.logging.target, LogTarget::Stderr);
        assert_eq!(config.display_offset.local_minus_utc(), 0);
        assert_eq!(config.ai.api_key, None);
        assert_eq!(config.ai.timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            (env_vars::PORT, "9000"),
            (env_vars::LOG_DIR, "/var/log/notepad"),
            (env_vars::LOG_LEVEL, "warn"),
            (env_vars::DISPLAY_OFFSET, "+09:00"),
            (env_vars::AI_API_BASE_URL, "http://localhost:11434/v1/"),
            (env_vars::AI_API_KEY, "sk-test"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.logging, LoggingConfig::directory("warn", "/var/log/notepad"));
        assert_eq!(config.display_offset.local_minus_utc(), 9 * 3600);
        assert_eq!(config.ai.base_url, "http://localhost:11434/v1");
        assert_eq!(config.ai.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = ServerConfig::from_lookup(lookup(&[(env_vars::PORT, "eighty")])).unwrap_err();
        assert_eq!(err.variable, env_vars::PORT);

        let err = ServerConfig::from_lookup(lookup(&[(env_vars::DISPLAY_OFFSET, "KST")]))
            .unwrap_err();
        assert_eq!(err.variable, env_vars::DISPLAY_OFFSET);
    }

    #[test]
    fn utc_offsets_parse_in_common_shapes() {
        assert_eq!(parse_utc_offset("Z").map(|o| o.local_minus_utc()), Some(0));
        assert_eq!(parse_utc_offset(" utc ").map(|o| o.local_minus_utc()), Some(0));
        assert_eq!(parse_utc_offset("+09:00").map(|o| o.local_minus_utc()), Some(9 * 3600));
        assert_eq!(parse_utc_offset("-0530").map(|o| o.local_minus_utc()), Some(-19800));
        assert_eq!(parse_utc_offset("+24:00"), None);
        assert_eq!(parse_utc_offset("09:00"), None);
        assert_eq!(parse_utc_offset("KST"), None);
    }
}
