//! Provider block configuration with environment fallbacks

use tfplug::types::{AttributePath, Dynamic, DynamicValue};

use crate::api::ClientConfig;

pub const URL_ENV: &str = "PROWLARR_URL";
pub const API_KEY_ENV: &str = "PROWLARR_API_KEY";
pub const INSECURE_ENV: &str = "PROWLARR_INSECURE";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub url: String,
    pub api_key: String,
    pub insecure: bool,
    pub timeout_seconds: u64,
}

impl ProviderConfig {
    /// Values set in the provider block win over the environment. Every
    /// problem is reported, not just the first.
    pub fn from_dynamic(config: &DynamicValue) -> Result<Self, Vec<String>> {
        let mut errors = vec![];

        let url = string_attr(config, "url").or_else(|| env_string(URL_ENV));
        let api_key = string_attr(config, "api_key").or_else(|| env_string(API_KEY_ENV));

        let insecure = match config.get(&AttributePath::new("insecure")) {
            Ok(Dynamic::Bool(insecure)) => *insecure,
            _ => env_string(INSECURE_ENV)
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(false),
        };

        let timeout_seconds = match config.get(&AttributePath::new("timeout_seconds")) {
            Ok(Dynamic::Number(n)) if *n >= 1.0 && n.fract() == 0.0 => *n as u64,
            Ok(Dynamic::Number(n)) => {
                errors.push(format!(
                    "timeout_seconds must be a positive whole number, got {}",
                    n
                ));
                DEFAULT_TIMEOUT_SECONDS
            }
            _ => DEFAULT_TIMEOUT_SECONDS,
        };

        if url.is_none() {
            errors.push(format!(
                "url is required (set in provider config or {} env var)",
                URL_ENV
            ));
        }
        if api_key.is_none() {
            errors.push(format!(
                "api_key is required (set in provider config or {} env var)",
                API_KEY_ENV
            ));
        }

        match (url, api_key) {
            (Some(url), Some(api_key)) if errors.is_empty() => Ok(Self {
                url,
                api_key,
                insecure,
                timeout_seconds,
            }),
            _ => Err(errors),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default().with_timeout(self.timeout_seconds)
    }
}

fn string_attr(config: &DynamicValue, name: &str) -> Option<String> {
    match config.get(&AttributePath::new(name)) {
        Ok(Dynamic::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(URL_ENV);
        std::env::remove_var(API_KEY_ENV);
        std::env::remove_var(INSECURE_ENV);
    }

    fn block(url: Option<&str>, api_key: Option<&str>) -> DynamicValue {
        let mut config = DynamicValue::object();
        if let Some(url) = url {
            config
                .set_string(&AttributePath::new("url"), url.to_string())
                .unwrap();
        }
        if let Some(api_key) = api_key {
            config
                .set_string(&AttributePath::new("api_key"), api_key.to_string())
                .unwrap();
        }
        config
    }

    #[test]
    #[serial]
    fn config_values_win_over_env() {
        clear_env();
        std::env::set_var(URL_ENV, "http://env:9696");
        std::env::set_var(API_KEY_ENV, "env-key");

        let config =
            ProviderConfig::from_dynamic(&block(Some("http://block:9696"), None)).unwrap();
        assert_eq!(config.url, "http://block:9696");
        assert_eq!(config.api_key, "env-key");
        assert!(!config.insecure);
        assert_eq!(config.timeout_seconds, 30);

        clear_env();
    }

    #[test]
    #[serial]
    fn insecure_falls_back_to_env() {
        clear_env();
        std::env::set_var(INSECURE_ENV, "true");

        let config = ProviderConfig::from_dynamic(&block(Some("http://a:1"), Some("k"))).unwrap();
        assert!(config.insecure);

        clear_env();
    }

    #[test]
    #[serial]
    fn missing_values_are_all_reported() {
        clear_env();

        let errors = ProviderConfig::from_dynamic(&DynamicValue::object()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "url is required (set in provider config or PROWLARR_URL env var)".to_string(),
                "api_key is required (set in provider config or PROWLARR_API_KEY env var)"
                    .to_string(),
            ]
        );
    }

    #[test]
    #[serial]
    fn timeout_must_be_positive() {
        clear_env();

        let mut config = block(Some("http://a:1"), Some("k"));
        config
            .set_number(&AttributePath::new("timeout_seconds"), 0.0)
            .unwrap();

        let errors = ProviderConfig::from_dynamic(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("timeout_seconds"));

        config
            .set_number(&AttributePath::new("timeout_seconds"), 5.0)
            .unwrap();
        let parsed = ProviderConfig::from_dynamic(&config).unwrap();
        assert_eq!(parsed.client_config().retry.timeout_seconds, 5);
    }
}
