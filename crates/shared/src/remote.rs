use async_trait::async_trait;

use crate::{Entity, EntityId, FilterState, RemoteError};

/// Per-id results of a batch mutation, in dispatch order.
pub type BatchResult = Vec<(EntityId, Result<(), RemoteError>)>;

/// The remote data service behind a list view.
///
/// Batch endpoints default to one sequential call per id for backends that
/// only expose single-item mutations.
#[async_trait]
pub trait Remote: Send + Sync + 'static {
    type Entity: Entity;

    async fn list(&self, filter: &FilterState) -> Result<Vec<Self::Entity>, RemoteError>;

    async fn approve(&self, id: &EntityId) -> Result<(), RemoteError>;

    async fn unapprove(&self, id: &EntityId) -> Result<(), RemoteError>;

    async fn delete(&self, id: &EntityId) -> Result<(), RemoteError>;

    async fn bulk_approve(&self, ids: &[EntityId]) -> BatchResult {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            results.push((id.clone(), self.approve(id).await));
        }
        results
    }

    async fn bulk_unapprove(&self, ids: &[EntityId]) -> BatchResult {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            results.push((id.clone(), self.unapprove(id).await));
        }
        results
    }

    async fn bulk_delete(&self, ids: &[EntityId]) -> BatchResult {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            results.push((id.clone(), self.delete(id).await));
        }
        results
    }
}
