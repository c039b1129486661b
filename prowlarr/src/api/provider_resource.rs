//! Provider-backed resources: download clients, applications, notifications
//! and indexers all share one wire shape and one set of endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ApiError, Client};

/// Generic wire representation shared by every provider-backed category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResource {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub implementation: String,
    #[serde(default)]
    pub config_contract: String,
    #[serde(default)]
    pub tags: Vec<i64>,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Category-specific envelope members (`enable`, `priority`,
    /// `syncLevel`, `protocol`, ...) and anything else the server sends
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One `{name, value}` entry of the field list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

fn is_unset(id: &i64) -> bool {
    *id == 0
}

/// CRUD contract the orchestrator drives
#[async_trait]
pub trait ProviderResourceStore: Send + Sync {
    async fn create(&self, request: &ProviderResource) -> Result<ProviderResource, ApiError>;

    async fn get(&self, id: i64) -> Result<ProviderResource, ApiError>;

    async fn update(
        &self,
        id: i64,
        request: &ProviderResource,
    ) -> Result<ProviderResource, ApiError>;

    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

/// Provider resource API for one category path
pub struct ProviderResourceApi<'a> {
    client: &'a Client,
    path: &'static str,
}

impl<'a> ProviderResourceApi<'a> {
    pub fn new(client: &'a Client, path: &'static str) -> Self {
        Self { client, path }
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.path, id)
    }
}

#[async_trait]
impl ProviderResourceStore for ProviderResourceApi<'_> {
    /// POST {path}
    async fn create(&self, request: &ProviderResource) -> Result<ProviderResource, ApiError> {
        self.client.post(self.path, request).await
    }

    /// GET {path}/{id}
    async fn get(&self, id: i64) -> Result<ProviderResource, ApiError> {
        self.client.get(&self.item_path(id)).await
    }

    /// PUT {path}/{id}
    async fn update(
        &self,
        id: i64,
        request: &ProviderResource,
    ) -> Result<ProviderResource, ApiError> {
        self.client.put(&self.item_path(id), request).await
    }

    /// DELETE {path}/{id}
    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&self.item_path(id)).await
    }
}
