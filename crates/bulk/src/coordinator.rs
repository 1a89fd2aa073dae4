use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use mealplanner_listing::{ListView, PendingFlags, ViewHandle};
use mealplanner_shared::{BatchResult, Entity, EntityId, FilterState, Remote, RemoteError};
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::{
    BulkAction, Level, Navigator, Notification, Notifier, Outcome, Settled, infer_direction,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DispatchMode {
    /// One remote call per id, awaited together.
    #[default]
    PerItem,
    /// A single call to the collaborator's batch endpoint.
    Batch,
}

#[derive(Debug, Clone)]
pub struct BulkConfig {
    pub dispatch: DispatchMode,
    /// Pause between the session-expired toast and the login redirect.
    pub redirect_delay: Duration,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchMode::default(),
            redirect_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Bulk,
    Single,
}

/// A dispatch that passed its guards.
struct Dispatch {
    scope: Scope,
    action: BulkAction,
    ids: Vec<EntityId>,
    filter: FilterState,
}

/// Runs approve/delete actions for one collaborator and reconciles the
/// view they were started from.
///
/// Only a [`ViewHandle`] is kept across remote calls: a view unmounted while
/// an action is in flight is never written to. Every started action ends with
/// pending flags reset, whatever the collaborator returned.
pub struct BulkCoordinator<R> {
    remote: Arc<R>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    config: BulkConfig,
}

impl<R: Remote> BulkCoordinator<R> {
    pub fn new(
        remote: Arc<R>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            remote,
            notifier,
            navigator,
            config: BulkConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BulkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn remote(&self) -> &Arc<R> {
        &self.remote
    }

    /// Re-fetch the Item Store of `view`.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self, view: &ViewHandle<R::Entity>) -> Result<(), RemoteError> {
        let Some(filter) = self.begin_fetch(view).await else {
            tracing::debug!("view unmounted, skipping refresh");
            return Ok(());
        };

        let result = self.remote.list(&filter).await;
        let error = result.as_ref().err().cloned();
        self.apply_fetch(view, result).await;

        match error {
            Some(error) => {
                if error.is_session_expired() {
                    self.expire_session().await;
                } else {
                    tracing::warn!(%error, "refresh failed");
                }
                Err(error)
            }
            None => Ok(()),
        }
    }

    /// Approve the selection, or unapprove it when every selected row is
    /// already approved. `None` when guarded out.
    #[tracing::instrument(skip_all)]
    pub async fn bulk_approve(&self, view: &ViewHandle<R::Entity>) -> Option<Outcome> {
        let dispatch = self
            .begin(view, Scope::Bulk, |v| {
                let action = infer_direction(v.selected())?;
                Some((action, v.selection().ids().to_vec()))
            })
            .await?;

        Some(self.run(view, dispatch).await)
    }

    #[tracing::instrument(skip_all)]
    pub async fn bulk_delete(&self, view: &ViewHandle<R::Entity>) -> Option<Outcome> {
        let dispatch = self
            .begin(view, Scope::Bulk, |v| {
                Some((BulkAction::Delete, v.selection().ids().to_vec()))
            })
            .await?;

        Some(self.run(view, dispatch).await)
    }

    /// Flip the approval of one row.
    #[tracing::instrument(skip(self, view))]
    pub async fn toggle_approval(
        &self,
        view: &ViewHandle<R::Entity>,
        id: &EntityId,
    ) -> Option<Outcome> {
        let dispatch = self
            .begin(view, Scope::Single, |v| {
                let entity = v.store().get(id)?;
                let action = if entity.is_approved() {
                    BulkAction::Unapprove
                } else {
                    BulkAction::Approve
                };
                Some((action, vec![id.clone()]))
            })
            .await?;

        Some(self.run(view, dispatch).await)
    }

    #[tracing::instrument(skip(self, view))]
    pub async fn delete(&self, view: &ViewHandle<R::Entity>, id: &EntityId) -> Option<Outcome> {
        let dispatch = self
            .begin(view, Scope::Single, |v| {
                v.store().get(id)?;
                Some((BulkAction::Delete, vec![id.clone()]))
            })
            .await?;

        Some(self.run(view, dispatch).await)
    }

    /// Check guards and mark the action pending, all under one lock.
    async fn begin(
        &self,
        view: &ViewHandle<R::Entity>,
        scope: Scope,
        plan: impl FnOnce(&ListView<R::Entity>) -> Option<(BulkAction, Vec<EntityId>)>,
    ) -> Option<Dispatch> {
        let Some(shared) = view.upgrade() else {
            tracing::debug!("view unmounted, ignoring action");
            return None;
        };
        let mut v = shared.lock().await;

        if scope == Scope::Bulk {
            if v.selection().is_empty() {
                tracing::debug!("empty selection, nothing to do");
                return None;
            }
            if v.pending().is_bulk_in_flight() {
                tracing::debug!("bulk action already in flight");
                return None;
            }
        }

        let Some((action, ids)) = plan(&*v) else {
            tracing::debug!("nothing to dispatch");
            return None;
        };

        if ids.iter().any(|id| !v.can_act_on(id)) {
            tracing::debug!(?ids, "row disabled while in flight");
            return None;
        }

        if scope == Scope::Single {
            let busy = match action {
                BulkAction::Delete => v.pending().delete,
                BulkAction::Approve | BulkAction::Unapprove => v.pending().approve,
            };
            if busy {
                tracing::debug!(%action, "same action already in flight");
                return None;
            }
        }

        set_flag(v.pending_mut(), scope, action, true);
        v.pending_mut().mark(&ids);

        Some(Dispatch {
            scope,
            action,
            ids,
            filter: v.filter().clone(),
        })
    }

    async fn run(&self, view: &ViewHandle<R::Entity>, dispatch: Dispatch) -> Outcome {
        tracing::info!(
            action = %dispatch.action,
            count = dispatch.ids.len(),
            "dispatching"
        );

        let results = self.dispatch(dispatch.action, &dispatch.ids).await;
        let mut outcome = Outcome::collect(dispatch.action, &dispatch.ids, results);

        for (id, error) in &outcome.failed {
            tracing::warn!(%id, kind = %error.kind(), %error, "mutation failed");
        }

        let refreshed = if view.is_mounted() {
            Some(self.remote.list(&dispatch.filter).await)
        } else {
            None
        };
        let refresh_expired = matches!(&refreshed, Some(Err(error)) if error.is_session_expired());

        match view.upgrade() {
            Some(shared) => {
                let mut v = shared.lock().await;
                if let Some(result) = refreshed {
                    if let Err(error) = &result {
                        tracing::warn!(%error, "refresh after mutation failed");
                    }
                    v.apply_fetch(result);
                }
                if dispatch.scope == Scope::Bulk {
                    v.clear_selection();
                }
                set_flag(v.pending_mut(), dispatch.scope, dispatch.action, false);
                v.pending_mut().release(&dispatch.ids);
            }
            None => {
                tracing::debug!("view unmounted before settle, discarding result");
                outcome.detached = true;
            }
        }

        tracing::info!(
            action = %outcome.action,
            settled = %outcome.settled(),
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "settled"
        );

        self.notifier.notify(notification(&outcome, dispatch.scope));

        if outcome.session_expired() || refresh_expired {
            self.expire_session().await;
        }

        outcome
    }

    async fn dispatch(&self, action: BulkAction, ids: &[EntityId]) -> BatchResult {
        match self.config.dispatch {
            DispatchMode::PerItem => {
                join_all(
                    ids.iter()
                        .map(|id| async move { (id.clone(), self.call(action, id).await) }),
                )
                .await
            }
            DispatchMode::Batch => match action {
                BulkAction::Approve => self.remote.bulk_approve(ids).await,
                BulkAction::Unapprove => self.remote.bulk_unapprove(ids).await,
                BulkAction::Delete => self.remote.bulk_delete(ids).await,
            },
        }
    }

    async fn call(&self, action: BulkAction, id: &EntityId) -> Result<(), RemoteError> {
        match action {
            BulkAction::Approve => self.remote.approve(id).await,
            BulkAction::Unapprove => self.remote.unapprove(id).await,
            BulkAction::Delete => self.remote.delete(id).await,
        }
    }

    async fn begin_fetch(&self, view: &ViewHandle<R::Entity>) -> Option<FilterState> {
        let shared = view.upgrade()?;
        let mut v = shared.lock().await;
        v.begin_fetch();
        Some(v.filter().clone())
    }

    async fn apply_fetch(
        &self,
        view: &ViewHandle<R::Entity>,
        result: Result<Vec<R::Entity>, RemoteError>,
    ) {
        match view.upgrade() {
            Some(shared) => shared.lock().await.apply_fetch(result),
            None => tracing::debug!("view unmounted, dropping fetched rows"),
        }
    }

    async fn expire_session(&self) {
        self.notifier.notify(Notification::new(
            Level::Error,
            "Session expired",
            "Please sign in again.",
        ));

        tokio::time::sleep(self.config.redirect_delay).await;
        self.navigator.redirect_to_login();
    }
}

fn set_flag(pending: &mut PendingFlags, scope: Scope, action: BulkAction, value: bool) {
    let flag = match (scope, action) {
        (Scope::Bulk, BulkAction::Delete) => &mut pending.bulk_delete,
        (Scope::Bulk, _) => &mut pending.bulk_approve,
        (Scope::Single, BulkAction::Delete) => &mut pending.delete,
        (Scope::Single, _) => &mut pending.approve,
    };
    *flag = value;
}

fn notification(outcome: &Outcome, scope: Scope) -> Notification {
    let title = match (scope, outcome.action) {
        (Scope::Bulk, BulkAction::Approve) => "Bulk approve",
        (Scope::Bulk, BulkAction::Unapprove) => "Bulk unapprove",
        (Scope::Bulk, BulkAction::Delete) => "Bulk delete",
        (Scope::Single, BulkAction::Approve) => "Approve",
        (Scope::Single, BulkAction::Unapprove) => "Unapprove",
        (Scope::Single, BulkAction::Delete) => "Delete",
    };

    let level = match outcome.settled() {
        Settled::Success => Level::Success,
        Settled::PartialFailure => Level::Warning,
        Settled::Failure => Level::Error,
    };

    Notification::new(level, title, outcome.message())
}
