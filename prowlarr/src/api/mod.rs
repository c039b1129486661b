//! Prowlarr API client implementation

pub mod client;
pub mod common;
pub mod error;
pub mod provider_resource;
pub mod tag;

#[cfg(test)]
pub mod test_helpers;

pub use client::{Client, ClientConfig, RetryConfig};
pub use error::ApiError;
pub use provider_resource::{Field, ProviderResource, ProviderResourceApi, ProviderResourceStore};
pub use tag::{Tag, TagsApi};
