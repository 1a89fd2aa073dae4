use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mealplanner_bulk::{BulkConfig, BulkCoordinator, Navigator, NotificationLog};
use mealplanner_listing::{ListView, SharedView};
use mealplanner_shared::{EntityId, FilterState, MemoryRemote, Recipe, Remote, RemoteError};
use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct RecordingNavigator(AtomicUsize);

impl RecordingNavigator {
    #[allow(dead_code)]
    pub fn redirects(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Memory collaborator whose mutations take a per-id amount of time and
/// signal when the first one starts.
#[derive(Debug)]
pub struct SlowRemote {
    pub inner: MemoryRemote<Recipe>,
    pub delays: HashMap<EntityId, Duration>,
    pub started: Notify,
}

impl SlowRemote {
    #[allow(dead_code)]
    pub fn new(items: Vec<Recipe>, delays: &[(&str, u64)]) -> Self {
        Self {
            inner: MemoryRemote::new(items),
            delays: delays
                .iter()
                .map(|(id, ms)| (EntityId::from(*id), Duration::from_millis(*ms)))
                .collect(),
            started: Notify::new(),
        }
    }

    async fn pause(&self, id: &EntityId) {
        self.started.notify_one();
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl Remote for SlowRemote {
    type Entity = Recipe;

    async fn list(&self, filter: &FilterState) -> Result<Vec<Recipe>, RemoteError> {
        self.inner.list(filter).await
    }

    async fn approve(&self, id: &EntityId) -> Result<(), RemoteError> {
        self.pause(id).await;
        self.inner.approve(id).await
    }

    async fn unapprove(&self, id: &EntityId) -> Result<(), RemoteError> {
        self.pause(id).await;
        self.inner.unapprove(id).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RemoteError> {
        self.pause(id).await;
        self.inner.delete(id).await
    }
}

pub struct Harness<R: Remote> {
    pub view: SharedView<R::Entity>,
    pub coordinator: Arc<BulkCoordinator<R>>,
    pub remote: Arc<R>,
    pub log: NotificationLog,
    pub navigator: Arc<RecordingNavigator>,
}

#[allow(dead_code)]
pub async fn harness<R: Remote>(remote: R, config: BulkConfig) -> anyhow::Result<Harness<R>> {
    let remote = Arc::new(remote);
    let log = NotificationLog::new();
    let navigator = Arc::new(RecordingNavigator::default());
    let coordinator =
        BulkCoordinator::new(remote.clone(), Arc::new(log.clone()), navigator.clone())
            .with_config(config);

    let view = SharedView::new(ListView::new(10));
    coordinator.refresh(&view.handle()).await?;

    Ok(Harness {
        view,
        coordinator: Arc::new(coordinator),
        remote,
        log,
        navigator,
    })
}

#[allow(dead_code)]
pub fn instant() -> BulkConfig {
    BulkConfig {
        redirect_delay: Duration::ZERO,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn recipe(id: &str, is_approved: bool) -> Recipe {
    Recipe {
        id: id.into(),
        name: format!("Recipe {id}"),
        ingredient_count: Some(5.0),
        is_approved,
        ..Default::default()
    }
}
