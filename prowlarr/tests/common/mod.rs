//! Shared helpers for driving the provider against a mock server

#![allow(dead_code)]

use prowlarr::ProwlarrProvider;
use serde_json::{json, Value};
use tfplug::context::Context;
use tfplug::data_source::{ConfigureDataSourceRequest, DataSourceWithConfigure};
use tfplug::provider::{ConfigureProviderRequest, Provider};
use tfplug::resource::{ConfigureResourceRequest, ResourceWithConfigure};
use tfplug::types::{AttributePath, Dynamic, DynamicValue};

pub const API_KEY: &str = "test-api-key";

pub fn provider_config(url: &str) -> ConfigureProviderRequest {
    let mut config = DynamicValue::object();
    let _ = config.set_string(&AttributePath::new("url"), url.to_string());
    let _ = config.set_string(&AttributePath::new("api_key"), API_KEY.to_string());
    let _ = config.set_number(&AttributePath::new("timeout_seconds"), 5.0);
    ConfigureProviderRequest {
        terraform_version: "1.9.0".to_string(),
        config,
    }
}

/// Build a resource through the provider's factory and configure it
pub async fn resource(url: &str, type_name: &str) -> Box<dyn ResourceWithConfigure> {
    let mut provider = ProwlarrProvider::new();
    let response = provider
        .configure(Context::new(), provider_config(url))
        .await;
    assert!(response.diagnostics.is_empty());

    let factories = provider.resources();
    let factory = factories
        .get(type_name)
        .unwrap_or_else(|| panic!("no factory for {}", type_name));
    let mut resource = factory();
    let configured = resource
        .configure(
            Context::new(),
            ConfigureResourceRequest {
                provider_data: response.provider_data,
            },
        )
        .await;
    assert!(configured.diagnostics.is_empty());
    resource
}

pub async fn data_source(url: &str, type_name: &str) -> Box<dyn DataSourceWithConfigure> {
    let mut provider = ProwlarrProvider::new();
    let response = provider
        .configure(Context::new(), provider_config(url))
        .await;
    assert!(response.diagnostics.is_empty());

    let factories = provider.data_sources();
    let mut data_source = factories.get(type_name).unwrap()();
    let configured = data_source
        .configure(
            Context::new(),
            ConfigureDataSourceRequest {
                provider_data: response.provider_data,
            },
        )
        .await;
    assert!(configured.diagnostics.is_empty());
    data_source
}

/// Planned state for a Transmission client as Terraform would send it
pub fn planned_transmission(name: &str, port: i64) -> DynamicValue {
    let mut state = DynamicValue::object();
    let _ = state.set_string(&AttributePath::new("name"), name.to_string());
    let _ = state.set_bool(&AttributePath::new("enable"), true);
    let _ = state.set_i64(&AttributePath::new("priority"), 1);
    let _ = state.set_string(&AttributePath::new("host"), "transmission".to_string());
    let _ = state.set_i64(&AttributePath::new("port"), port);
    let _ = state.set_string(&AttributePath::new("url_base"), "/transmission/".to_string());
    let _ = state.set_string(&AttributePath::new("password"), "pass".to_string());
    let _ = state.set_i64(&AttributePath::new("recent_tv_priority"), 1);
    let _ = state.set_list(
        &AttributePath::new("tags"),
        vec![Dynamic::Number(1.0), Dynamic::Number(3.0)],
    );
    state
}

/// What the server answers for a Transmission client
pub fn transmission_response(id: i64, name: &str, port: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "enable": true,
        "priority": 1,
        "protocol": "torrent",
        "implementation": "Transmission",
        "implementationName": "Transmission",
        "configContract": "TransmissionSettings",
        "tags": [3, 1],
        "fields": [
            { "name": "host", "value": "transmission" },
            { "name": "port", "value": port },
            { "name": "useSsl", "value": false },
            { "name": "urlBase", "value": "/transmission/" },
            { "name": "username" },
            { "name": "password", "value": "********" },
            { "name": "tvCategory" },
            { "name": "tvDirectory" },
            { "name": "recentTvPriority", "value": 1 },
            { "name": "olderTvPriority", "value": 0 },
            { "name": "addPaused", "value": false }
        ]
    })
}
