//! Table-driven resource: one implementation serves every definition

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
use tfplug::validator::{IntOneOf, StringOneOf};

use crate::adapter::ResourceDefinition;
use crate::api::ProviderResourceApi;
use crate::field::{Allowed, FieldKind, FieldSpec};
use crate::orchestrator::Orchestrator;
use crate::record::Record;
use crate::ProwlarrProviderData;

pub struct GenericResource {
    definition: &'static ResourceDefinition,
    type_name: String,
    provider_data: Option<ProwlarrProviderData>,
}

impl GenericResource {
    pub fn new(definition: &'static ResourceDefinition) -> Self {
        Self {
            definition,
            type_name: definition.terraform_type(),
            provider_data: None,
        }
    }

    pub fn definition(&self) -> &'static ResourceDefinition {
        self.definition
    }

    fn store(&self) -> Result<ProviderResourceApi<'_>, Diagnostic> {
        match &self.provider_data {
            Some(data) => Ok(data.client.provider_resources(self.definition.category.path)),
            None => Err(Diagnostic::error(
                "Provider not configured",
                "Provider data was not properly configured",
            )),
        }
    }

    fn record(&self, state: &DynamicValue) -> Result<Record, Diagnostic> {
        Record::from_state(state, self.definition.specs())
            .map_err(|e| Diagnostic::error("Invalid resource data", e.to_string()))
    }

    fn state(&self, record: &Record) -> Result<DynamicValue, Diagnostic> {
        record
            .to_state(self.definition.specs())
            .map_err(|e| Diagnostic::error("Failed to build state", e.to_string()))
    }
}

/// Schema derived from the definition's tables
pub fn schema_for(definition: &ResourceDefinition) -> Schema {
    let mut builder = SchemaBuilder::new()
        .version(0)
        .description(definition.description)
        .attribute(
            AttributeBuilder::new("id", AttributeType::Number)
                .description(&format!("{} ID.", definition.implementation))
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("name", AttributeType::String)
                .description(&format!("{} name.", capitalize(definition.category.name)))
                .required()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("tags", AttributeType::Set(Box::new(AttributeType::Number)))
                .description("List of associated tags.")
                .optional()
                .computed()
                .build(),
        );

    for spec in definition.specs() {
        builder = builder.attribute(attribute_for(spec));
    }

    builder.build()
}

fn attribute_for(spec: &FieldSpec) -> tfplug::schema::Attribute {
    let attribute_type = match spec.kind {
        FieldKind::String | FieldKind::Sensitive => AttributeType::String,
        FieldKind::Int => AttributeType::Number,
        FieldKind::Bool => AttributeType::Bool,
        FieldKind::IntSet => AttributeType::Set(Box::new(AttributeType::Number)),
        FieldKind::StringSet => AttributeType::Set(Box::new(AttributeType::String)),
    };

    let mut builder = AttributeBuilder::new(spec.attribute, attribute_type).description(spec.description);
    builder = if spec.required {
        builder.required()
    } else {
        builder.optional().computed()
    };
    if spec.is_sensitive() {
        builder = builder.sensitive();
    }
    builder = match spec.allowed {
        Allowed::Any => builder,
        Allowed::Ints(allowed) => builder.validator(Box::new(IntOneOf::new(allowed))),
        Allowed::Strings(allowed) => builder.validator(Box::new(StringOneOf::new(allowed))),
    };

    builder.build()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl Resource for GenericResource {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ResourceMetadataRequest,
    ) -> ResourceMetadataResponse {
        ResourceMetadataResponse {
            type_name: self.type_name.clone(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ResourceSchemaRequest,
    ) -> ResourceSchemaResponse {
        ResourceSchemaResponse {
            schema: schema_for(self.definition),
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse {
        ValidateResourceConfigResponse {
            diagnostics: schema_for(self.definition).validate(&request.config),
        }
    }

    async fn create(&self, ctx: Context, request: CreateResourceRequest) -> CreateResourceResponse {
        let result = async {
            let store = self.store()?;
            let desired = self.record(&request.planned_state)?;

            let created = Orchestrator::new(self.definition, &store)
                .create(&ctx, desired)
                .await
                .map_err(|e| e.to_diagnostic())?;

            self.state(&created)
        }
        .await;

        CreateResourceResponse::from_result(result, request.planned_state)
    }

    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let result = async {
            let store = self.store()?;
            let current = self.record(&request.current_state)?;

            let refreshed = Orchestrator::new(self.definition, &store)
                .read(&ctx, current)
                .await
                .map_err(|e| e.to_diagnostic())?;

            refreshed
                .record
                .as_ref()
                .map(|record| self.state(record))
                .transpose()
        }
        .await;

        ReadResourceResponse::from_result(result, request.current_state)
    }

    async fn update(&self, ctx: Context, request: UpdateResourceRequest) -> UpdateResourceResponse {
        let result = async {
            let store = self.store()?;
            let prior = self.record(&request.prior_state)?;
            let mut desired = self.record(&request.planned_state)?;
            desired.id = prior.id;

            let updated = Orchestrator::new(self.definition, &store)
                .update(&ctx, desired)
                .await
                .map_err(|e| e.to_diagnostic())?;

            self.state(&updated)
        }
        .await;

        UpdateResourceResponse::from_result(result, request.prior_state)
    }

    async fn delete(&self, ctx: Context, request: DeleteResourceRequest) -> DeleteResourceResponse {
        let result = async {
            let store = self.store()?;
            let id = request
                .prior_state
                .get_i64(&AttributePath::new("id"))
                .map_err(|e| Diagnostic::error("Invalid resource data", e.to_string()))?;

            Orchestrator::new(self.definition, &store)
                .delete(&ctx, id)
                .await
                .map_err(|e| e.to_diagnostic())
        }
        .await;

        DeleteResourceResponse::from_result(result)
    }

    fn import_support(&self) -> Option<&dyn ResourceWithImportState> {
        Some(self)
    }
}

#[async_trait]
impl ResourceWithConfigure for GenericResource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
        match ProwlarrProviderData::from_configure(request.provider_data, "resource") {
            Ok(provider_data) => {
                self.provider_data = Some(provider_data);
                ConfigureResourceResponse {
                    diagnostics: vec![],
                }
            }
            Err(diagnostic) => ConfigureResourceResponse {
                diagnostics: vec![diagnostic],
            },
        }
    }
}

#[async_trait]
impl ResourceWithImportState for GenericResource {
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let result = async {
            let store = self.store()?;

            let imported = Orchestrator::new(self.definition, &store)
                .import(&ctx, &request.id)
                .await
                .map_err(|e| e.to_diagnostic())?;

            self.state(&imported)
        }
        .await;

        ImportResourceStateResponse::from_result(request.type_name, result)
    }
}
