//! Tag data source implementation

use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::data_source::{
    ConfigureDataSourceRequest, ConfigureDataSourceResponse, DataSource, DataSourceMetadataRequest,
    DataSourceMetadataResponse, DataSourceSchemaRequest, DataSourceSchemaResponse,
    DataSourceWithConfigure, ReadDataSourceRequest, ReadDataSourceResponse,
    ValidateDataSourceConfigRequest, ValidateDataSourceConfigResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, DynamicValue};

use crate::orchestrator::within_deadline;

#[derive(Default)]
pub struct TagDataSource {
    provider_data: Option<crate::ProwlarrProviderData>,
}

impl TagDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Single Tag.")
            .attribute(
                AttributeBuilder::new("id", AttributeType::Number)
                    .description("Tag ID.")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("label", AttributeType::String)
                    .description("Tag label.")
                    .required()
                    .build(),
            )
            .build()
    }
}

#[async_trait]
impl DataSource for TagDataSource {
    fn type_name(&self) -> &str {
        "prowlarr_tag"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: DataSourceMetadataRequest,
    ) -> DataSourceMetadataResponse {
        DataSourceMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: DataSourceSchemaRequest,
    ) -> DataSourceSchemaResponse {
        DataSourceSchemaResponse {
            schema: Self::schema(),
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateDataSourceConfigRequest,
    ) -> ValidateDataSourceConfigResponse {
        ValidateDataSourceConfigResponse {
            diagnostics: Self::schema().validate(&request.config),
        }
    }

    async fn read(&self, ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        tracing::debug!(
            "Reading tag data source, provider_data: {:?}",
            self.provider_data.is_some()
        );

        let result = async {
            let provider_data = self.provider_data.as_ref().ok_or_else(|| {
                Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                )
            })?;

            let label = request
                .config
                .get_string(&AttributePath::new("label"))
                .map_err(|e| {
                    Diagnostic::error("Invalid configuration", e.to_string())
                        .with_attribute(AttributePath::new("label"))
                })?;

            let tag = within_deadline(&ctx, provider_data.client.tags().find_by_label(&label))
                .await
                .map_err(|e| {
                    Diagnostic::error(
                        "Client Error",
                        format!("Unable to read tag, got error: {}", e),
                    )
                })?
                .ok_or_else(|| {
                    Diagnostic::error(
                        "Data Source Not Found",
                        format!("Unable to find tag, tag with label {:?} does not exist", label),
                    )
                })?;

            let mut state = DynamicValue::object();
            state
                .set_i64(&AttributePath::new("id"), tag.id)
                .and_then(|_| state.set_string(&AttributePath::new("label"), tag.label))
                .map_err(|e| Diagnostic::error("Failed to build state", e.to_string()))?;
            tracing::trace!("read tag: {}", tag.id);
            Ok(state)
        }
        .await;

        ReadDataSourceResponse::from_result(result)
    }
}

#[async_trait]
impl DataSourceWithConfigure for TagDataSource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureDataSourceRequest,
    ) -> ConfigureDataSourceResponse {
        tracing::debug!(
            "Configuring tag data source, provider_data provided: {:?}",
            request.provider_data.is_some()
        );

        let diagnostics =
            match crate::ProwlarrProviderData::from_configure(request.provider_data, "data source")
            {
                Ok(provider_data) => {
                    self.provider_data = Some(provider_data);
                    vec![]
                }
                Err(diagnostic) => vec![diagnostic],
            };

        ConfigureDataSourceResponse { diagnostics }
    }
}
