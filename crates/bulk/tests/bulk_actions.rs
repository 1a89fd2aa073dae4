use std::time::Duration;

use mealplanner_bulk::{BulkAction, BulkConfig, DispatchMode, Level, Settled};
use mealplanner_shared::{Call, Entity, EntityId, MemoryRemote, RemoteError};

mod helpers;

use helpers::{SlowRemote, recipe};

fn ids(raw: &[&str]) -> Vec<EntityId> {
    raw.iter().map(|id| EntityId::from(*id)).collect()
}

#[tokio::test]
async fn test_refresh_loads_view() -> anyhow::Result<()> {
    let h = helpers::harness(
        MemoryRemote::new([recipe("1", false), recipe("2", true)]),
        helpers::instant(),
    )
    .await?;

    let view = h.view.lock().await;
    assert_eq!(view.filtered_len(), 2);
    assert!(!view.store().is_loading());
    assert_eq!(view.store().revision(), 1);

    Ok(())
}

#[tokio::test]
async fn test_all_approved_selection_unapproves() -> anyhow::Result<()> {
    let h = helpers::harness(
        MemoryRemote::new([recipe("1", true), recipe("2", true)]),
        helpers::instant(),
    )
    .await?;
    h.view.lock().await.select_all_visible();

    let outcome = h.coordinator.bulk_approve(&h.view.handle()).await.unwrap();

    assert_eq!(outcome.action, BulkAction::Unapprove);
    assert_eq!(outcome.settled(), Settled::Success);

    let view = h.view.lock().await;
    assert!(view.store().items().iter().all(|r| !r.is_approved()));
    assert!(view.selection().is_empty());
    assert!(view.pending().is_idle());
    assert_eq!(h.log.last().unwrap().message, "2 of 2 unapproved");

    Ok(())
}

#[tokio::test]
async fn test_mixed_selection_approves() -> anyhow::Result<()> {
    let h = helpers::harness(
        MemoryRemote::new([recipe("1", true), recipe("2", false)]),
        helpers::instant(),
    )
    .await?;
    h.view.lock().await.select_all_visible();

    let outcome = h.coordinator.bulk_approve(&h.view.handle()).await.unwrap();

    assert_eq!(outcome.action, BulkAction::Approve);
    let view = h.view.lock().await;
    assert!(view.store().items().iter().all(|r| r.is_approved()));

    Ok(())
}

#[tokio::test]
async fn test_partial_bulk_delete() -> anyhow::Result<()> {
    let remote = MemoryRemote::new([recipe("a", false), recipe("b", false), recipe("c", false)]);
    remote
        .fail_on("b", RemoteError::Server("locked by meal plan".to_owned()))
        .await;
    let h = helpers::harness(remote, helpers::instant()).await?;
    h.view.lock().await.select_all_visible();

    let outcome = h.coordinator.bulk_delete(&h.view.handle()).await.unwrap();

    assert_eq!(outcome.settled(), Settled::PartialFailure);
    assert_eq!(outcome.succeeded, ids(&["a", "c"]));

    let notification = h.log.last().unwrap();
    assert_eq!(notification.message, "2 of 3 deleted, 1 failed");
    assert_eq!(notification.level, Level::Warning);
    assert_eq!(h.log.entries().len(), 1);

    let view = h.view.lock().await;
    let remaining = view
        .store()
        .items()
        .iter()
        .map(|r| r.id().clone())
        .collect::<Vec<_>>();
    assert_eq!(remaining, ids(&["b"]));
    assert!(view.selection().is_empty());
    assert!(view.pending().is_idle());

    Ok(())
}

#[tokio::test]
async fn test_network_failure_resets_to_idle() -> anyhow::Result<()> {
    let remote = MemoryRemote::new([recipe("a", false), recipe("b", false)]);
    for id in ["a", "b"] {
        remote
            .fail_on(id, RemoteError::Network("connection reset".to_owned()))
            .await;
    }
    let h = helpers::harness(remote, helpers::instant()).await?;
    h.view.lock().await.select_all_visible();

    let outcome = h.coordinator.bulk_approve(&h.view.handle()).await.unwrap();

    assert_eq!(outcome.settled(), Settled::Failure);
    assert_eq!(h.log.last().unwrap().level, Level::Error);
    assert_eq!(h.log.last().unwrap().message, "0 of 2 approved, 2 failed");
    assert_eq!(h.navigator.redirects(), 0);

    let view = h.view.lock().await;
    assert!(view.pending().is_idle());
    assert!(view.selection().is_empty());
    assert!(view.store().items().iter().all(|r| !r.is_approved()));

    Ok(())
}

#[tokio::test]
async fn test_empty_selection_never_reaches_remote() -> anyhow::Result<()> {
    let h = helpers::harness(MemoryRemote::new([recipe("a", false)]), helpers::instant()).await?;

    assert!(h.coordinator.bulk_delete(&h.view.handle()).await.is_none());
    assert!(h.coordinator.bulk_approve(&h.view.handle()).await.is_none());

    assert_eq!(h.remote.calls().await, vec![Call::List]);
    assert!(h.log.entries().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_batch_dispatch_follows_selection_order() -> anyhow::Result<()> {
    let h = helpers::harness(
        MemoryRemote::new([recipe("a", false), recipe("b", false), recipe("c", false)]),
        BulkConfig {
            dispatch: DispatchMode::Batch,
            ..helpers::instant()
        },
    )
    .await?;
    {
        let mut view = h.view.lock().await;
        view.toggle(&"c".into(), true);
        view.toggle(&"a".into(), true);
    }

    h.coordinator.bulk_approve(&h.view.handle()).await.unwrap();

    assert_eq!(
        h.remote.calls().await,
        vec![
            Call::List,
            Call::Approve("c".into()),
            Call::Approve("a".into()),
            Call::List
        ]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_completion_is_keyed_by_id() -> anyhow::Result<()> {
    let remote = SlowRemote::new(
        vec![recipe("a", false), recipe("b", false), recipe("c", false)],
        &[("a", 30), ("b", 10), ("c", 20)],
    );
    let h = helpers::harness(remote, helpers::instant()).await?;
    h.view.lock().await.select_all_visible();

    let outcome = h.coordinator.bulk_approve(&h.view.handle()).await.unwrap();

    assert_eq!(outcome.succeeded, ids(&["a", "b", "c"]));
    assert_eq!(
        h.remote.inner.calls().await,
        vec![
            Call::List,
            Call::Approve("b".into()),
            Call::Approve("c".into()),
            Call::Approve("a".into()),
            Call::List
        ]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_selected_rows_are_locked_during_bulk() -> anyhow::Result<()> {
    let remote = SlowRemote::new(vec![recipe("a", false), recipe("b", false)], &[("a", 50)]);
    let h = helpers::harness(remote, helpers::instant()).await?;
    h.view.lock().await.toggle(&"a".into(), true);

    let handle = h.view.handle();
    let coordinator = h.coordinator.clone();
    let task = {
        let handle = handle.clone();
        tokio::spawn(async move { coordinator.bulk_delete(&handle).await })
    };
    h.remote.started.notified().await;

    {
        let view = h.view.lock().await;
        assert!(view.pending().bulk_delete);
        assert!(!view.can_act_on(&"a".into()));
        assert!(view.can_act_on(&"b".into()));
    }

    assert!(h.coordinator.delete(&handle, &"a".into()).await.is_none());
    assert!(h.coordinator.bulk_approve(&handle).await.is_none());

    let single = h
        .coordinator
        .toggle_approval(&handle, &"b".into())
        .await
        .unwrap();
    assert_eq!(single.action, BulkAction::Approve);

    let bulk = task.await?.unwrap();
    assert_eq!(bulk.settled(), Settled::Success);

    let view = h.view.lock().await;
    assert_eq!(view.store().items().len(), 1);
    assert!(view.store().items()[0].is_approved());
    assert!(view.pending().is_idle());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_bulk_refuses_rows_with_single_action_in_flight() -> anyhow::Result<()> {
    let remote = SlowRemote::new(vec![recipe("a", false), recipe("b", false)], &[("a", 50)]);
    let h = helpers::harness(remote, helpers::instant()).await?;

    let handle = h.view.handle();
    let coordinator = h.coordinator.clone();
    let task = {
        let handle = handle.clone();
        tokio::spawn(async move { coordinator.toggle_approval(&handle, &"a".into()).await })
    };
    h.remote.started.notified().await;

    h.view.lock().await.toggle(&"a".into(), true);
    assert!(h.coordinator.bulk_delete(&handle).await.is_none());
    assert!(h.view.lock().await.pending().is_pending(&"a".into()));

    {
        let mut view = h.view.lock().await;
        view.toggle(&"a".into(), false);
        view.toggle(&"b".into(), true);
    }
    let bulk = h.coordinator.bulk_approve(&handle).await.unwrap();
    assert_eq!(bulk.succeeded, ids(&["b"]));

    // settling the bulk action leaves the single action's hold on `a`
    {
        let view = h.view.lock().await;
        assert!(view.pending().is_pending(&"a".into()));
        assert!(!view.can_act_on(&"a".into()));
    }

    let single = task.await?.unwrap();
    assert_eq!(single.action, BulkAction::Approve);

    assert_eq!(
        h.remote.inner.calls().await,
        vec![
            Call::List,
            Call::Approve("b".into()),
            Call::List,
            Call::Approve("a".into()),
            Call::List
        ]
    );

    let view = h.view.lock().await;
    assert!(view.pending().is_idle());
    assert!(view.store().items().iter().all(|r| r.is_approved()));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unmounted_view_is_not_written() -> anyhow::Result<()> {
    let remote = SlowRemote::new(vec![recipe("a", false), recipe("b", false)], &[("a", 50)]);
    let h = helpers::harness(remote, helpers::instant()).await?;
    h.view.lock().await.toggle(&"a".into(), true);

    let handle = h.view.handle();
    let coordinator = h.coordinator.clone();
    let task = tokio::spawn(async move { coordinator.bulk_delete(&handle).await });
    h.remote.started.notified().await;

    drop(h.view);

    let outcome = task.await?.unwrap();
    assert!(outcome.detached);
    assert_eq!(outcome.succeeded, ids(&["a"]));

    // applied server-side, no refresh for a view that is gone
    assert_eq!(h.remote.inner.snapshot().await.len(), 1);
    assert_eq!(
        h.remote.inner.calls().await,
        vec![Call::List, Call::Delete("a".into())]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_session_expiry_redirects_after_delay() -> anyhow::Result<()> {
    let h = helpers::harness(
        MemoryRemote::new([recipe("a", false), recipe("b", false)]),
        BulkConfig::default(),
    )
    .await?;
    h.view.lock().await.select_all_visible();
    h.remote.expire_session(true);

    let started = tokio::time::Instant::now();
    let outcome = h.coordinator.bulk_delete(&h.view.handle()).await.unwrap();

    assert!(outcome.session_expired());
    assert!(started.elapsed() >= Duration::from_millis(1500));
    assert_eq!(h.navigator.redirects(), 1);

    let titles = h
        .log
        .entries()
        .into_iter()
        .map(|n| n.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Bulk delete", "Session expired"]);

    let view = h.view.lock().await;
    assert!(view.pending().is_idle());
    assert_eq!(view.store().items().len(), 2);
    assert_eq!(view.store().error(), Some(&RemoteError::Unauthorized));

    Ok(())
}
