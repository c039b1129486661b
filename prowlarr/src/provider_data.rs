//! Provider data handed to resources and data sources

use crate::api::Client;
use std::any::Any;
use std::sync::Arc;
use tfplug::types::Diagnostic;

#[derive(Clone)]
pub struct ProwlarrProviderData {
    pub client: Arc<Client>,
}

impl ProwlarrProviderData {
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Recover the data from a configure request. `target` names the
    /// receiver in the diagnostic ("resource", "data source").
    pub fn from_configure(
        provider_data: Option<Arc<dyn Any + Send + Sync>>,
        target: &str,
    ) -> Result<Self, Diagnostic> {
        let Some(data) = provider_data else {
            tracing::warn!("No provider data provided to {}", target);
            return Err(Diagnostic::error(
                "No provider data",
                format!("No provider data was provided to the {}", target),
            ));
        };

        match data.downcast_ref::<ProwlarrProviderData>() {
            Some(provider_data) => Ok(provider_data.clone()),
            None => {
                tracing::error!("Failed to downcast provider data to ProwlarrProviderData");
                Err(Diagnostic::error(
                    "Invalid provider data",
                    "Failed to extract ProwlarrProviderData from provider data",
                ))
            }
        }
    }
}
