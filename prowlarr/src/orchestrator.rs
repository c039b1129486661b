//! CRUD and import flows shared by every generic resource
//!
//! Each operation runs one REST call through a [`ProviderResourceStore`]
//! and pipes the answer through the [`ResourceDefinition`]. The caller's
//! [`Context`] bounds the call: a cancelled context or a passed deadline
//! surfaces as [`ProviderError::Timeout`].

use std::future::Future;

use tfplug::Context;
use tracing::{trace, warn};

use crate::adapter::ResourceDefinition;
use crate::api::{ApiError, ProviderResourceStore};
use crate::error::{Operation, OperationError, ProviderError};
use crate::record::Record;

/// How a refreshed record compares to what Terraform had
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    InSync,
    /// Names of the attributes the server changed
    Drifted(Vec<String>),
    /// The server no longer knows the id
    Gone,
}

/// Result of a read: the refreshed record, unless it is gone
#[derive(Debug, Clone, PartialEq)]
pub struct Refreshed {
    pub record: Option<Record>,
    pub reconciliation: Reconciliation,
}

pub struct Orchestrator<'a> {
    definition: &'a ResourceDefinition,
    store: &'a dyn ProviderResourceStore,
}

impl<'a> Orchestrator<'a> {
    pub fn new(definition: &'a ResourceDefinition, store: &'a dyn ProviderResourceStore) -> Self {
        Self { definition, store }
    }

    fn fail(&self, op: Operation, id: Option<i64>, source: ProviderError) -> OperationError {
        warn!(
            resource = self.definition.type_name,
            operation = %op,
            id = ?id,
            "{}",
            source
        );
        OperationError::new(op, self.definition.type_name, id, source)
    }

    pub async fn create(&self, ctx: &Context, desired: Record) -> Result<Record, OperationError> {
        let request = self
            .definition
            .read(&desired)
            .map_err(|e| self.fail(Operation::Create, None, e.into()))?;

        let response = within_deadline(ctx, self.store.create(&request))
            .await
            .map_err(|e| self.fail(Operation::Create, None, e))?;

        let mut record = desired;
        self.definition
            .write(&mut record, &response)
            .map_err(|e| self.fail(Operation::Create, Some(response.id), e.into()))?;

        trace!("created {}: {}", self.definition.type_name, record.id);
        Ok(record)
    }

    /// Refresh `current` from the server. A missing resource is not an
    /// error; the caller drops it from state.
    pub async fn read(&self, ctx: &Context, current: Record) -> Result<Refreshed, OperationError> {
        let id = current.id;

        let response = match within_deadline(ctx, self.store.get(id)).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                warn!(
                    resource = self.definition.type_name,
                    id, "resource no longer exists, removing from state"
                );
                return Ok(Refreshed {
                    record: None,
                    reconciliation: Reconciliation::Gone,
                });
            }
            Err(e) => return Err(self.fail(Operation::Read, Some(id), e)),
        };

        let mut record = current.clone();
        self.definition
            .write(&mut record, &response)
            .map_err(|e| self.fail(Operation::Read, Some(id), e.into()))?;

        let changed = record.diff(&current);
        let reconciliation = if changed.is_empty() {
            Reconciliation::InSync
        } else {
            warn!(
                resource = self.definition.type_name,
                id,
                attributes = ?changed,
                "remote changes detected"
            );
            Reconciliation::Drifted(changed)
        };

        trace!("read {}: {}", self.definition.type_name, record.id);
        Ok(Refreshed {
            record: Some(record),
            reconciliation,
        })
    }

    /// Replace the remote resource with `desired`, whose id comes from the
    /// prior state
    pub async fn update(&self, ctx: &Context, desired: Record) -> Result<Record, OperationError> {
        let id = desired.id;
        let request = self
            .definition
            .read(&desired)
            .map_err(|e| self.fail(Operation::Update, Some(id), e.into()))?;

        let response = within_deadline(ctx, self.store.update(id, &request))
            .await
            .map_err(|e| self.fail(Operation::Update, Some(id), e))?;

        let mut record = desired;
        self.definition
            .write(&mut record, &response)
            .map_err(|e| self.fail(Operation::Update, Some(id), e.into()))?;

        trace!("updated {}: {}", self.definition.type_name, record.id);
        Ok(record)
    }

    pub async fn delete(&self, ctx: &Context, id: i64) -> Result<(), OperationError> {
        within_deadline(ctx, self.store.delete(id))
            .await
            .map_err(|e| self.fail(Operation::Delete, Some(id), e))?;

        trace!("deleted {}: {}", self.definition.type_name, id);
        Ok(())
    }

    /// Adopt an existing resource by its decimal id. A malformed id fails
    /// before any request is made.
    pub async fn import(&self, ctx: &Context, id: &str) -> Result<Record, OperationError> {
        let id = tfplug::parse_int_id(id).map_err(|_| {
            self.fail(
                Operation::Import,
                None,
                ProviderError::UnexpectedImportIdentifier(id.to_string()),
            )
        })?;

        let response = within_deadline(ctx, self.store.get(id))
            .await
            .map_err(|e| self.fail(Operation::Import, Some(id), e))?;

        let mut record = Record {
            id,
            ..Default::default()
        };
        self.definition
            .write(&mut record, &response)
            .map_err(|e| self.fail(Operation::Import, Some(id), e.into()))?;

        trace!("imported {}: {}", self.definition.type_name, record.id);
        Ok(record)
    }
}

/// Run one REST call, giving up when the context is cancelled or its
/// deadline passes
pub(crate) async fn within_deadline<T, F>(ctx: &Context, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    if ctx.is_cancelled() {
        return Err(ProviderError::Timeout);
    }

    let bounded = async {
        match ctx.deadline() {
            Some(deadline) => tokio::time::timeout_at(deadline.into(), call)
                .await
                .map_err(|_| ProviderError::Timeout)?
                .map_err(ProviderError::from),
            None => call.await.map_err(ProviderError::from),
        }
    };

    let mut done = ctx.done();
    tokio::select! {
        result = bounded => result,
        _ = done.wait_for(|cancelled| *cancelled) => Err(ProviderError::Timeout),
    }
}
