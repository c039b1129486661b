//! Resource traits and their request/response types
//!
//! A resource is built by its provider's factory, configured with the
//! provider data, and then driven through plan and apply. Every operation
//! takes a [`Context`] carrying Terraform's deadline.

use crate::context::Context;
use crate::schema::Schema;
use crate::types::{Diagnostic, DynamicValue};
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

#[async_trait]
pub trait Resource: Send + Sync {
    /// Full Terraform type, e.g. "prowlarr_tag". Must match the key used in
    /// `Provider::resources()`.
    fn type_name(&self) -> &str;

    async fn metadata(
        &self,
        ctx: Context,
        request: ResourceMetadataRequest,
    ) -> ResourceMetadataResponse;

    async fn schema(&self, ctx: Context, request: ResourceSchemaRequest) -> ResourceSchemaResponse;

    /// Plan-time check; no remote calls
    async fn validate(
        &self,
        ctx: Context,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse;

    /// New state must carry every attribute, computed ones included
    async fn create(&self, ctx: Context, request: CreateResourceRequest) -> CreateResourceResponse;

    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse;

    async fn update(&self, ctx: Context, request: UpdateResourceRequest) -> UpdateResourceResponse;

    async fn delete(&self, ctx: Context, request: DeleteResourceRequest) -> DeleteResourceResponse;

    /// Resources that support `terraform import` return themselves here
    fn import_support(&self) -> Option<&dyn ResourceWithImportState> {
        None
    }
}

pub struct ResourceMetadataRequest;

pub struct ResourceMetadataResponse {
    pub type_name: String,
}

pub struct ResourceSchemaRequest;

pub struct ResourceSchemaResponse {
    pub schema: Schema,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ValidateResourceConfigRequest {
    pub type_name: String,
    pub config: DynamicValue,
}

pub struct ValidateResourceConfigResponse {
    pub diagnostics: Vec<Diagnostic>,
}

pub struct CreateResourceRequest {
    pub type_name: String,
    pub planned_state: DynamicValue,
    pub config: DynamicValue,
}

pub struct CreateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Vec<Diagnostic>,
}

impl CreateResourceResponse {
    /// A failed create hands the plan back unchanged
    pub fn from_result(result: Result<DynamicValue, Diagnostic>, planned_state: DynamicValue) -> Self {
        match result {
            Ok(new_state) => Self {
                new_state,
                diagnostics: vec![],
            },
            Err(diagnostic) => Self {
                new_state: planned_state,
                diagnostics: vec![diagnostic],
            },
        }
    }
}

pub struct ReadResourceRequest {
    pub type_name: String,
    pub current_state: DynamicValue,
}

pub struct ReadResourceResponse {
    /// `None` removes the resource from state
    pub new_state: Option<DynamicValue>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReadResourceResponse {
    /// A failed read keeps the current state rather than dropping the resource
    pub fn from_result(
        result: Result<Option<DynamicValue>, Diagnostic>,
        current_state: DynamicValue,
    ) -> Self {
        match result {
            Ok(new_state) => Self {
                new_state,
                diagnostics: vec![],
            },
            Err(diagnostic) => Self {
                new_state: Some(current_state),
                diagnostics: vec![diagnostic],
            },
        }
    }
}

pub struct UpdateResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
    pub planned_state: DynamicValue,
    pub config: DynamicValue,
}

pub struct UpdateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Vec<Diagnostic>,
}

impl UpdateResourceResponse {
    /// A failed update leaves the prior state in place
    pub fn from_result(result: Result<DynamicValue, Diagnostic>, prior_state: DynamicValue) -> Self {
        match result {
            Ok(new_state) => Self {
                new_state,
                diagnostics: vec![],
            },
            Err(diagnostic) => Self {
                new_state: prior_state,
                diagnostics: vec![diagnostic],
            },
        }
    }
}

pub struct DeleteResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
}

pub struct DeleteResourceResponse {
    pub diagnostics: Vec<Diagnostic>,
}

impl DeleteResourceResponse {
    pub fn from_result(result: Result<(), Diagnostic>) -> Self {
        Self {
            diagnostics: result.err().into_iter().collect(),
        }
    }
}

/// Factories build resources unconfigured; `configure` runs before any
/// other call that needs the provider's client
#[async_trait]
pub trait ResourceWithConfigure: Resource {
    async fn configure(
        &mut self,
        ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse;
}

pub struct ConfigureResourceRequest {
    /// Whatever `ConfigureProviderResponse::provider_data` carried
    pub provider_data: Option<Arc<dyn Any + Send + Sync>>,
}

pub struct ConfigureResourceResponse {
    pub diagnostics: Vec<Diagnostic>,
}

#[async_trait]
pub trait ResourceWithImportState: Resource {
    /// Turn a user-supplied identifier into state for `terraform import`
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse;
}

pub struct ImportResourceStateRequest {
    pub type_name: String,
    pub id: String,
}

pub struct ImportResourceStateResponse {
    pub imported_resources: Vec<ImportedResource>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ImportResourceStateResponse {
    /// At most one resource per import
    pub fn from_result(type_name: String, result: Result<DynamicValue, Diagnostic>) -> Self {
        match result {
            Ok(state) => Self {
                imported_resources: vec![ImportedResource { type_name, state }],
                diagnostics: vec![],
            },
            Err(diagnostic) => Self {
                imported_resources: vec![],
                diagnostics: vec![diagnostic],
            },
        }
    }
}

pub struct ImportedResource {
    pub type_name: String,
    pub state: DynamicValue,
}
