use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{Entity, EntityId, FilterState, Remote, RemoteError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Approve(EntityId),
    Unapprove(EntityId),
    Delete(EntityId),
}

/// In-process collaborator holding the authoritative collection.
///
/// `list` returns the whole collection; search and structured filtering
/// happen client-side in the listing pipeline.
#[derive(Debug, Default)]
pub struct MemoryRemote<E> {
    items: Mutex<Vec<E>>,
    failures: Mutex<HashMap<EntityId, RemoteError>>,
    calls: Mutex<Vec<Call>>,
    session_expired: AtomicBool,
}

impl<E: Entity> MemoryRemote<E> {
    pub fn new(items: impl IntoIterator<Item = E>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().collect()),
            failures: Mutex::default(),
            calls: Mutex::default(),
            session_expired: AtomicBool::new(false),
        }
    }

    /// Every mutation of `id` fails with `error` until cleared.
    pub async fn fail_on(&self, id: impl Into<EntityId>, error: RemoteError) {
        self.failures.lock().await.insert(id.into(), error);
    }

    pub async fn clear_failures(&self) {
        self.failures.lock().await.clear();
    }

    /// Every call fails with `RemoteError::Unauthorized` while set.
    pub fn expire_session(&self, expired: bool) {
        self.session_expired.store(expired, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> Vec<E> {
        self.items.lock().await.clone()
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    async fn check(&self, id: Option<&EntityId>) -> Result<(), RemoteError> {
        if self.session_expired.load(Ordering::SeqCst) {
            return Err(RemoteError::Unauthorized);
        }

        if let Some(id) = id
            && let Some(error) = self.failures.lock().await.get(id)
        {
            return Err(error.clone());
        }

        Ok(())
    }

    async fn set_approved(&self, id: &EntityId, approved: bool) -> Result<(), RemoteError> {
        self.check(Some(id)).await?;

        let mut items = self.items.lock().await;
        let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
            return Err(RemoteError::NotFound(id.clone()));
        };
        item.set_approved(approved);

        Ok(())
    }
}

#[async_trait]
impl<E: Entity> Remote for MemoryRemote<E> {
    type Entity = E;

    async fn list(&self, _filter: &FilterState) -> Result<Vec<E>, RemoteError> {
        self.calls.lock().await.push(Call::List);
        self.check(None).await?;

        Ok(self.items.lock().await.clone())
    }

    async fn approve(&self, id: &EntityId) -> Result<(), RemoteError> {
        self.calls.lock().await.push(Call::Approve(id.clone()));
        self.set_approved(id, true).await
    }

    async fn unapprove(&self, id: &EntityId) -> Result<(), RemoteError> {
        self.calls.lock().await.push(Call::Unapprove(id.clone()));
        self.set_approved(id, false).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RemoteError> {
        self.calls.lock().await.push(Call::Delete(id.clone()));
        self.check(Some(id)).await?;

        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Err(RemoteError::NotFound(id.clone()));
        }

        tracing::debug!(%id, "deleted");

        Ok(())
    }
}
