//! Terraform provider for Prowlarr
//!
//! Every provider-backed resource (download clients, applications,
//! notifications, indexers) is served by one generic engine driven by a
//! static field table. Tags get a hand-written resource and data source.

pub mod adapter;
pub mod api;
pub mod codec;
pub mod config;
pub mod data_sources;
pub mod envelope;
pub mod error;
pub mod field;
pub mod orchestrator;
pub mod provider_data;
pub mod record;
pub mod resources;

pub use provider_data::ProwlarrProviderData;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tfplug::context::Context;
use tfplug::data_source::DataSourceWithConfigure;
use tfplug::provider::{
    ConfigureProviderRequest, ConfigureProviderResponse, DataSourceFactory, Provider,
    ProviderMetadataRequest, ProviderMetadataResponse, ProviderSchemaRequest,
    ProviderSchemaResponse, ResourceFactory,
};
use tfplug::resource::ResourceWithConfigure;
use tfplug::schema::{AttributeBuilder, AttributeType, SchemaBuilder};
use tfplug::types::Diagnostic;

use crate::config::ProviderConfig;

#[derive(Default)]
pub struct ProwlarrProvider {
    provider_data: Option<ProwlarrProviderData>,
}

impl ProwlarrProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set once `configure` has succeeded
    pub fn provider_data(&self) -> Option<&ProwlarrProviderData> {
        self.provider_data.as_ref()
    }
}

#[async_trait]
impl Provider for ProwlarrProvider {
    fn type_name(&self) -> &str {
        "prowlarr"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ProviderMetadataRequest,
    ) -> ProviderMetadataResponse {
        ProviderMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ProviderSchemaRequest,
    ) -> ProviderSchemaResponse {
        let schema = SchemaBuilder::new()
            .version(0)
            .description("The Prowlarr provider manages Prowlarr configuration")
            .attribute(
                AttributeBuilder::new("url", AttributeType::String)
                    .description("Full Prowlarr URL with protocol and port (e.g. `https://test.prowlarr.com:9696`). Can also be set with PROWLARR_URL")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("api_key", AttributeType::String)
                    .description("API key for Prowlarr authentication. Can also be set with PROWLARR_API_KEY")
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("insecure", AttributeType::Bool)
                    .description("Skip TLS certificate verification. Can also be set with PROWLARR_INSECURE")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("timeout_seconds", AttributeType::Number)
                    .description("Per-request timeout in seconds. Defaults to 30")
                    .optional()
                    .build(),
            )
            .build();

        ProviderSchemaResponse {
            schema,
            diagnostics: vec![],
        }
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse {
        let config = match ProviderConfig::from_dynamic(&request.config) {
            Ok(config) => config,
            Err(errors) => {
                return ConfigureProviderResponse {
                    diagnostics: errors
                        .into_iter()
                        .map(|e| Diagnostic::error("Missing provider configuration", e))
                        .collect(),
                    provider_data: None,
                };
            }
        };

        tracing::debug!(
            url = %config.url,
            insecure = config.insecure,
            timeout_seconds = config.timeout_seconds,
            "configuring prowlarr client"
        );

        match api::Client::with_config(
            &config.url,
            &config.api_key,
            config.insecure,
            config.client_config(),
        ) {
            Ok(client) => {
                let provider_data = ProwlarrProviderData::new(client);
                self.provider_data = Some(provider_data.clone());
                ConfigureProviderResponse {
                    diagnostics: vec![],
                    provider_data: Some(Arc::new(provider_data)),
                }
            }
            Err(e) => ConfigureProviderResponse {
                diagnostics: vec![Diagnostic::error(
                    "Failed to create API client",
                    e.to_string(),
                )],
                provider_data: None,
            },
        }
    }

    fn resources(&self) -> HashMap<String, ResourceFactory> {
        let mut factories: HashMap<String, ResourceFactory> = HashMap::new();

        factories.insert(
            "prowlarr_tag".to_string(),
            Box::new(|| {
                Box::new(resources::TagResource::new()) as Box<dyn ResourceWithConfigure>
            }),
        );

        for definition in resources::all_definitions() {
            factories.insert(
                definition.terraform_type(),
                Box::new(move || {
                    Box::new(resources::GenericResource::new(definition))
                        as Box<dyn ResourceWithConfigure>
                }),
            );
        }

        factories
    }

    fn data_sources(&self) -> HashMap<String, DataSourceFactory> {
        let mut factories: HashMap<String, DataSourceFactory> = HashMap::new();
        factories.insert(
            "prowlarr_tag".to_string(),
            Box::new(|| {
                Box::new(data_sources::TagDataSource::new()) as Box<dyn DataSourceWithConfigure>
            }),
        );
        factories
    }
}
