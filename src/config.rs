//! Server configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_PATH: &str = "/auth";
pub const DEFAULT_HOME_PATH: &str = "/";
/// Matches the per-origin budget browsers give `localStorage`.
pub const DEFAULT_SETTINGS_QUOTA_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_SESSION_TTL_HOURS: i32 = 24 * 7;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} required")]
    Missing(&'static str),
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// Root directory for per-user settings storage. `None` disables it.
    pub settings_dir: Option<PathBuf>,
    pub settings_quota_bytes: usize,
    pub auth_path: String,
    pub home_path: String,
    /// Extra paths reachable without a session. The auth path is always public.
    pub public_paths: Vec<String>,
    pub cookie_secure: bool,
    pub session_ttl_hours: i32,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SETTINGS_DIR`: settings storage root; unset means no storage
    /// - `SETTINGS_QUOTA_BYTES`: default 5 MiB
    /// - `AUTH_PATH`: default `/auth`
    /// - `HOME_PATH`: default `/`
    /// - `PUBLIC_PATHS`: comma-separated, default empty
    /// - `COOKIE_SECURE`: 1/true/yes/on or 0/false/no/off, default false
    /// - `SESSION_TTL_HOURS`: default 168
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails
    /// to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let port = env_parse("PORT", DEFAULT_PORT)?;
        let settings_dir = std::env::var("SETTINGS_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let settings_quota_bytes = env_parse("SETTINGS_QUOTA_BYTES", DEFAULT_SETTINGS_QUOTA_BYTES)?;
        let auth_path = parse_route_path("AUTH_PATH", std::env::var("AUTH_PATH").ok().as_deref(), DEFAULT_AUTH_PATH)?;
        let home_path = parse_route_path("HOME_PATH", std::env::var("HOME_PATH").ok().as_deref(), DEFAULT_HOME_PATH)?;
        let public_paths = parse_public_paths(std::env::var("PUBLIC_PATHS").ok().as_deref())?;
        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or(false);
        let session_ttl_hours = env_parse("SESSION_TTL_HOURS", DEFAULT_SESSION_TTL_HOURS)?;
        if session_ttl_hours <= 0 {
            return Err(ConfigError::Invalid { var: "SESSION_TTL_HOURS", reason: "must be positive".into() });
        }

        Ok(Self {
            database_url,
            port,
            settings_dir,
            settings_quota_bytes,
            auth_path,
            home_path,
            public_paths,
            cookie_secure,
            session_ttl_hours,
        })
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().and_then(|raw| parse_bool(&raw))
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::Invalid { var: key, reason: e.to_string() }),
        Err(_) => Ok(default),
    }
}

fn parse_route_path(var: &'static str, raw: Option<&str>, default: &str) -> Result<String, ConfigError> {
    let path = raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(default);
    if !path.starts_with('/') {
        return Err(ConfigError::Invalid { var, reason: format!("{path:?} must start with '/'") });
    }
    Ok(path.to_owned())
}

fn parse_public_paths(raw: Option<&str>) -> Result<Vec<String>, ConfigError> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| parse_route_path("PUBLIC_PATHS", Some(p), DEFAULT_HOME_PATH))
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
