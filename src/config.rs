use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the OTP service, without a trailing slash
    pub api_url: String,
    pub http_timeout: Duration,
    /// Overrides the default location of the order database
    pub db_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = try_load(&lookup, "FOODIE_API_URL", DEFAULT_API_URL.to_string());
        let timeout_secs = try_load(&lookup, "FOODIE_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            http_timeout: Duration::from_secs(timeout_secs),
            db_path: lookup("FOODIE_DB_PATH").map(PathBuf::from),
        }
    }
}

fn try_load<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value: {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("FOODIE_API_URL", "https://otp.campus.example/"),
            ("FOODIE_HTTP_TIMEOUT_SECS", "3"),
            ("FOODIE_DB_PATH", "/tmp/foodie.db"),
        ]);
        assert_eq!(config.api_url, "https://otp.campus.example");
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/foodie.db")));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = config(&[("FOODIE_HTTP_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }
}
