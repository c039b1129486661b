//! Resource implementations

pub mod applications;
pub mod download_clients;
pub mod generic;
pub mod indexers;
pub mod notifications;
pub mod tag;

pub use generic::GenericResource;
pub use tag::TagResource;

use crate::adapter::ResourceDefinition;

/// Every table-driven resource the provider serves
pub fn all_definitions() -> impl Iterator<Item = &'static ResourceDefinition> {
    download_clients::ALL
        .iter()
        .chain(applications::ALL)
        .chain(notifications::ALL)
        .chain(indexers::ALL)
}
