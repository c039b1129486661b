//! Tag resource implementation

use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceMetadataRequest, ResourceMetadataResponse,
    ResourceSchemaRequest, ResourceSchemaResponse, ResourceWithConfigure,
    ResourceWithImportState, UpdateResourceRequest, UpdateResourceResponse,
    ValidateResourceConfigRequest, ValidateResourceConfigResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, DynamicValue};
use tracing::trace;

use crate::api::Tag;
use crate::error::{Operation, OperationError};
use crate::orchestrator::within_deadline;
use crate::ProwlarrProviderData;

const TYPE_NAME: &str = "tag";

#[derive(Default)]
pub struct TagResource {
    provider_data: Option<ProwlarrProviderData>,
}

impl TagResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn provider_data(&self) -> Result<&ProwlarrProviderData, Diagnostic> {
        self.provider_data.as_ref().ok_or_else(|| {
            Diagnostic::error(
                "Provider not configured",
                "Provider data was not properly configured",
            )
        })
    }

    fn schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Tag resource.")
            .attribute(
                AttributeBuilder::new("id", AttributeType::Number)
                    .description("Tag ID.")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("label", AttributeType::String)
                    .description("Tag label. It must be lowercase.")
                    .required()
                    .build(),
            )
            .build()
    }
}

fn tag_state(tag: &Tag) -> Result<DynamicValue, Diagnostic> {
    let mut state = DynamicValue::object();
    state
        .set_i64(&AttributePath::new("id"), tag.id)
        .and_then(|_| state.set_string(&AttributePath::new("label"), tag.label.clone()))
        .map_err(|e| Diagnostic::error("Failed to build state", e.to_string()))?;
    Ok(state)
}

fn tag_id(state: &DynamicValue) -> Result<i64, Diagnostic> {
    state
        .get_i64(&AttributePath::new("id"))
        .map_err(|e| Diagnostic::error("Invalid resource data", e.to_string()))
}

fn tag_label(state: &DynamicValue) -> Result<String, Diagnostic> {
    state
        .get_string(&AttributePath::new("label"))
        .map_err(|e| {
            Diagnostic::error("Invalid resource data", e.to_string())
                .with_attribute(AttributePath::new("label"))
        })
}

fn failure(op: Operation, id: Option<i64>, source: crate::error::ProviderError) -> Diagnostic {
    OperationError::new(op, TYPE_NAME, id, source).to_diagnostic()
}

#[async_trait]
impl Resource for TagResource {
    fn type_name(&self) -> &str {
        "prowlarr_tag"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ResourceMetadataRequest,
    ) -> ResourceMetadataResponse {
        ResourceMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ResourceSchemaRequest,
    ) -> ResourceSchemaResponse {
        ResourceSchemaResponse {
            schema: Self::schema(),
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse {
        let mut diagnostics = Self::schema().validate(&request.config);

        // The server lowercases labels, which would show as drift
        if let Ok(label) = request.config.get_string(&AttributePath::new("label")) {
            if label != label.to_lowercase() {
                diagnostics.push(
                    Diagnostic::error(
                        "Invalid tag label",
                        format!("Tag label must be lowercase, got: {}", label),
                    )
                    .with_attribute(AttributePath::new("label")),
                );
            }
        }

        ValidateResourceConfigResponse { diagnostics }
    }

    async fn create(&self, ctx: Context, request: CreateResourceRequest) -> CreateResourceResponse {
        let result = async {
            let data = self.provider_data()?;
            let label = tag_label(&request.planned_state)?;

            let tag = within_deadline(&ctx, data.client.tags().create(&label))
                .await
                .map_err(|e| failure(Operation::Create, None, e))?;

            trace!("created {}: {}", TYPE_NAME, tag.id);
            tag_state(&tag)
        }
        .await;

        CreateResourceResponse::from_result(result, request.planned_state)
    }

    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let result = async {
            let data = self.provider_data()?;
            let id = tag_id(&request.current_state)?;

            match within_deadline(&ctx, data.client.tags().get(id)).await {
                Ok(tag) => {
                    trace!("read {}: {}", TYPE_NAME, tag.id);
                    tag_state(&tag).map(Some)
                }
                Err(e) if e.is_not_found() => {
                    tracing::warn!(id, "tag no longer exists, removing from state");
                    Ok(None)
                }
                Err(e) => Err(failure(Operation::Read, Some(id), e)),
            }
        }
        .await;

        ReadResourceResponse::from_result(result, request.current_state)
    }

    async fn update(&self, ctx: Context, request: UpdateResourceRequest) -> UpdateResourceResponse {
        let result = async {
            let data = self.provider_data()?;
            let id = tag_id(&request.prior_state)?;
            let label = tag_label(&request.planned_state)?;

            let tag = within_deadline(&ctx, data.client.tags().update(id, &label))
                .await
                .map_err(|e| failure(Operation::Update, Some(id), e))?;

            trace!("updated {}: {}", TYPE_NAME, tag.id);
            tag_state(&tag)
        }
        .await;

        UpdateResourceResponse::from_result(result, request.prior_state)
    }

    async fn delete(&self, ctx: Context, request: DeleteResourceRequest) -> DeleteResourceResponse {
        let result = async {
            let data = self.provider_data()?;
            let id = tag_id(&request.prior_state)?;

            within_deadline(&ctx, data.client.tags().delete(id))
                .await
                .map_err(|e| failure(Operation::Delete, Some(id), e))?;

            trace!("deleted {}: {}", TYPE_NAME, id);
            Ok::<(), Diagnostic>(())
        }
        .await;

        DeleteResourceResponse::from_result(result)
    }

    fn import_support(&self) -> Option<&dyn ResourceWithImportState> {
        Some(self)
    }
}

#[async_trait]
impl ResourceWithConfigure for TagResource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
        let diagnostics =
            match ProwlarrProviderData::from_configure(request.provider_data, "resource") {
                Ok(provider_data) => {
                    self.provider_data = Some(provider_data);
                    vec![]
                }
                Err(diagnostic) => vec![diagnostic],
            };

        ConfigureResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for TagResource {
    /// Only the id is set; Terraform reads the rest right after
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: vec![],
        };
        tfplug::import_state_passthrough_int_id(
            &ctx,
            AttributePath::new("id"),
            &request,
            &mut response,
        );
        response
    }
}
