use anyhow::Context;
use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Provider credential; `None` when unset or blank.
    pub alpha_vantage_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the config from any variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut listen_addr: SocketAddr = var("STOCKIQ_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid STOCKIQ_LISTEN_ADDR")?;
        if let Some(port) = var("PORT") {
            listen_addr.set_port(port.trim().parse().context("Invalid PORT")?);
        }
        let db_path = var("STOCKIQ_DB_PATH").unwrap_or_else(|| "./db/stockiq.db".into());
        let cors_allow = var("STOCKIQ_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("STOCKIQ_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30000);
        let alpha_vantage_api_key = var("ALPHA_VANTAGE_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            alpha_vantage_api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.db_path, "./db/stockiq.db");
        assert_eq!(config.cors_allow, vec!["*"]);
        assert_eq!(config.request_timeout, Duration::from_millis(30000));
        assert!(config.alpha_vantage_api_key.is_none());
    }

    #[test]
    fn test_port_overrides_listen_port() {
        let config = config_from(&[
            ("STOCKIQ_LISTEN_ADDR", "127.0.0.1:3000"),
            ("PORT", "9090"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = config_from(&[("ALPHA_VANTAGE_API_KEY", "   ")]).unwrap();
        assert!(config.alpha_vantage_api_key.is_none());

        let config = config_from(&[("ALPHA_VANTAGE_API_KEY", "demo")]).unwrap();
        assert_eq!(config.alpha_vantage_api_key.as_deref(), Some("demo"));
    }

    #[test]
    fn test_cors_list_and_bad_values() {
        let config = config_from(&[
            (
                "STOCKIQ_CORS_ALLOW_ORIGINS",
                "http://localhost:3000, https://example.com,",
            ),
            ("STOCKIQ_REQUEST_TIMEOUT_MS", "abc"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_allow,
            vec!["http://localhost:3000", "https://example.com"]
        );
        assert_eq!(config.request_timeout, Duration::from_millis(30000));

        assert!(config_from(&[("STOCKIQ_LISTEN_ADDR", "nowhere")]).is_err());
    }
}
