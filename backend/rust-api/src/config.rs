use serde::Deserialize;
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4.1";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub connect_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let api_key = match settings
            .get_string("upstream.api_key")
            .or_else(|_| env::var("OPEN_API_KEY"))
        {
            Ok(key) => key,
            Err(_) if env == "prod" => {
                return Err(config::ConfigError::Message(
                    "OPEN_API_KEY must be set in production".to_string(),
                ));
            }
            Err(_) => {
                eprintln!("WARNING: OPEN_API_KEY is not set, upstream calls will be rejected");
                String::new()
            }
        };

        let api_url = settings
            .get_string("upstream.api_url")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = settings
            .get_string("upstream.model")
            .or_else(|_| env::var("OPENAI_MODEL"))
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let connect_timeout_secs = settings
            .get_int("upstream.connect_timeout_secs")
            .ok()
            .and_then(|value| u64::try_from(value).ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Config {
            upstream: UpstreamConfig {
                api_key,
                api_url,
                model,
                connect_timeout_secs,
            },
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "APP_ENV",
            "OPEN_API_KEY",
            "API_URL",
            "OPENAI_MODEL",
            "BIND_ADDR",
            "APP__UPSTREAM__API_KEY",
            "APP__UPSTREAM__API_URL",
            "APP__UPSTREAM__CONNECT_TIMEOUT_SECS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_env();
        env::set_var("OPEN_API_KEY", "sk-test");

        let config = Config::load().unwrap();
        assert_eq!(config.upstream.api_key, "sk-test");
        assert_eq!(config.upstream.api_url, DEFAULT_API_URL);
        assert_eq!(config.upstream.model, DEFAULT_MODEL);
        assert_eq!(config.upstream.connect_timeout_secs, 30);
        assert!(config.upstream.is_configured());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_prefixed_env_overrides_legacy_vars() {
        clear_env();
        env::set_var("OPEN_API_KEY", "legacy");
        env::set_var("APP__UPSTREAM__API_KEY", "prefixed");
        env::set_var("APP__UPSTREAM__API_URL", "http://127.0.0.1:9999/v1/chat");
        env::set_var("APP__UPSTREAM__CONNECT_TIMEOUT_SECS", "5");

        let config = Config::load().unwrap();
        assert_eq!(config.upstream.api_key, "prefixed");
        assert_eq!(config.upstream.api_url, "http://127.0.0.1:9999/v1/chat");
        assert_eq!(config.upstream.connect_timeout_secs, 5);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_key_is_fatal_in_prod() {
        clear_env();
        env::set_var("APP_ENV", "prod");

        assert!(Config::load().is_err());

        clear_env();
    }
}
