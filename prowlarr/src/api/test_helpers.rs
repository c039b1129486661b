//! Test helpers for the Prowlarr API

use super::{Client, ClientConfig, RetryConfig};

/// Client with short backoff so retry tests stay fast
pub fn fast_client(url: &str) -> Client {
    let config = ClientConfig {
        retry: RetryConfig {
            max_retries: 2,
            initial_backoff_ms: 1,
            max_backoff_ms: 5,
            timeout_seconds: 5,
        },
        ..Default::default()
    };
    Client::with_config(url, "test-api-key", false, config).unwrap()
}

pub fn tag_body(id: i64, label: &str) -> String {
    serde_json::json!({ "id": id, "label": label }).to_string()
}

/// Server-side representation of a Transmission download client
pub fn transmission_body(id: i64, port: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": "transmission",
        "enable": true,
        "priority": 1,
        "protocol": "torrent",
        "implementation": "Transmission",
        "implementationName": "Transmission",
        "configContract": "TransmissionSettings",
        "infoLink": "https://wiki.servarr.com/prowlarr/supported#transmission",
        "tags": [3, 1],
        "fields": [
            { "name": "host", "value": "transmission" },
            { "name": "port", "value": port },
            { "name": "useSsl", "value": false },
            { "name": "urlBase", "value": "/transmission/" },
            { "name": "username" },
            { "name": "password", "value": "********" },
            { "name": "tvCategory", "value": "tv" },
            { "name": "tvDirectory" },
            { "name": "recentTvPriority", "value": 1 },
            { "name": "olderTvPriority", "value": 0 },
            { "name": "addPaused", "value": false }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_retry_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_backoff_ms, 100);
        assert_eq!(config.max_backoff_ms, 10000);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_client_config() {
        let config = ClientConfig::default().with_timeout(5).with_max_retries(1);
        assert_eq!(config.max_idle_connections, 10);
        assert_eq!(config.idle_timeout.as_secs(), 90);
        assert_eq!(config.connection_timeout.as_secs(), 10);
        assert_eq!(config.tcp_keepalive.unwrap().as_secs(), 30);
        assert_eq!(config.retry.timeout_seconds, 5);
        assert_eq!(config.retry.max_retries, 1);
    }
}
