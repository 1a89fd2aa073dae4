pub mod grocery;
pub mod recipes;

use std::fmt::Write as _;
use std::sync::Arc;

use mealplanner_bulk::{BulkCoordinator, NotificationLog, TracingNavigator};
use mealplanner_listing::{ListView, PageView, SharedView};
use mealplanner_shared::{Entity, FilterState, MemoryRemote};

use crate::Config;
use crate::error::AppError;

/// A list view over one collection, wired to its in-memory collaborator.
pub(crate) struct Session<E: Entity> {
    pub view: SharedView<E>,
    pub coordinator: BulkCoordinator<MemoryRemote<E>>,
    pub log: NotificationLog,
}

impl<E: Entity> Session<E> {
    pub async fn open(
        config: &Config,
        items: Vec<E>,
        filter: FilterState,
    ) -> Result<Self, AppError> {
        let log = NotificationLog::new();
        let coordinator = BulkCoordinator::new(
            Arc::new(MemoryRemote::new(items)),
            Arc::new(log.clone()),
            Arc::new(TracingNavigator),
        )
        .with_config(config.bulk.to_bulk_config());

        let mut view = ListView::new(config.listing.page_size);
        view.set_filter(filter);
        let view = SharedView::new(view);
        coordinator.refresh(&view.handle()).await?;

        Ok(Self {
            view,
            coordinator,
            log,
        })
    }

    /// Collection as the collaborator holds it now.
    pub async fn snapshot(&self) -> Vec<E> {
        self.coordinator.remote().snapshot().await
    }

    pub fn notifications(&self, out: &mut String) {
        for n in self.log.entries() {
            let _ = writeln!(out, "[{}] {}: {}", n.level, n.title, n.message);
        }
    }
}

pub(crate) fn page_footer<E>(page: &PageView<'_, E>, out: &mut String) {
    match page.range {
        Some((start, end)) => {
            let _ = writeln!(
                out,
                "Showing {start}-{end} of {} (page {}/{})",
                page.total_items, page.page, page.total_pages
            );
        }
        None => {
            let _ = writeln!(out, "No results");
        }
    }
}
