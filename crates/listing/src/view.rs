use std::collections::HashMap;

use mealplanner_shared::{Entity, EntityId, FilterState, RemoteError};

use crate::paginator::{clamp_page, paginate, total_pages};
use crate::pipeline::filter_indices;
use crate::selection::{Selection, SelectionState};
use crate::store::ItemStore;

/// In-flight markers used to disable controls.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingFlags {
    pub approve: bool,
    pub delete: bool,
    pub bulk_approve: bool,
    pub bulk_delete: bool,
    /// Number of in-flight actions holding each id.
    ids: HashMap<EntityId, usize>,
}

impl PendingFlags {
    pub fn is_bulk_in_flight(&self) -> bool {
        self.bulk_approve || self.bulk_delete
    }

    pub fn is_idle(&self) -> bool {
        !self.approve && !self.delete && !self.is_bulk_in_flight() && self.ids.is_empty()
    }

    pub fn is_pending(&self, id: &EntityId) -> bool {
        self.ids.contains_key(id)
    }

    pub fn mark<'a>(&mut self, ids: impl IntoIterator<Item = &'a EntityId>) {
        for id in ids {
            *self.ids.entry(id.clone()).or_default() += 1;
        }
    }

    /// Drops one hold per id; an id stays pending while another action
    /// still holds it.
    pub fn release<'a>(&mut self, ids: impl IntoIterator<Item = &'a EntityId>) {
        for id in ids {
            if let Some(count) = self.ids.get_mut(id) {
                *count -= 1;
                if *count == 0 {
                    self.ids.remove(id);
                }
            }
        }
    }
}

/// Rows of the current page plus paging metadata.
#[derive(Debug)]
pub struct PageView<'a, E> {
    pub items: Vec<&'a E>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub range: Option<(usize, usize)>,
}

/// Filter, sort, pagination and selection state of one list view.
///
/// Every change to the source collection or the filter re-runs the pipeline
/// and clamps the current page immediately, so a reader never observes a
/// page past the end.
#[derive(Debug)]
pub struct ListView<E> {
    store: ItemStore<E>,
    filter: FilterState,
    order: Vec<usize>,
    page: usize,
    page_size: usize,
    selection: Selection,
    pending: PendingFlags,
}

impl<E: Entity> ListView<E> {
    pub fn new(page_size: usize) -> Self {
        Self {
            store: ItemStore::default(),
            filter: FilterState::default(),
            order: Vec::new(),
            page: 1,
            page_size,
            selection: Selection::new(),
            pending: PendingFlags::default(),
        }
    }

    pub fn with_items(page_size: usize, items: Vec<E>) -> Self {
        let mut view = Self::new(page_size);
        view.apply_fetch(Ok(items));
        view
    }

    pub fn store(&self) -> &ItemStore<E> {
        &self.store
    }

    pub fn begin_fetch(&mut self) {
        self.store.begin_fetch();
    }

    /// Install a fetch result, pruning selections that no longer exist.
    pub fn apply_fetch(&mut self, result: Result<Vec<E>, RemoteError>) {
        let fetched = result.is_ok();
        self.store.finish_fetch(result);
        if !fetched {
            return;
        }

        if self.store.items().is_empty() {
            self.selection.clear();
        } else {
            let store = &self.store;
            let pruned = self.selection.retain(|id| store.contains(id));
            if pruned > 0 {
                tracing::debug!(pruned, "dropped stale selections");
            }
        }

        self.rerun();
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Changing the filter always returns to the first page.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.page = 1;
        self.rerun();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        let mut filter = self.filter.clone();
        filter.search = term.into();
        self.set_filter(filter);
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.order.len(), self.page_size)
    }

    pub fn filtered_len(&self) -> usize {
        self.order.len()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.order.len(), self.page_size);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn page(&self) -> PageView<'_, E> {
        let page = paginate(&self.order, self.page, self.page_size);
        let items = self.store.items();

        PageView {
            items: page.items.iter().map(|idx| &items[*idx]).collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            range: page.range(self.page_size),
        }
    }

    /// Whole filtered sequence, across all pages.
    pub fn filtered(&self) -> Vec<&E> {
        let items = self.store.items();
        self.order.iter().map(|idx| &items[*idx]).collect()
    }

    /// Ids of the rows on the current page.
    pub fn visible_ids(&self) -> Vec<EntityId> {
        self.page().items.iter().map(|item| item.id().clone()).collect()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select_all_visible(&mut self) {
        let visible = self.visible_ids();
        self.selection.select_all(&visible);
    }

    /// Unknown ids are ignored: the selection only ever holds fetched rows.
    pub fn toggle(&mut self, id: &EntityId, selected: bool) -> bool {
        if selected && !self.store.contains(id) {
            tracing::debug!(%id, "ignored selection of unknown id");
            return false;
        }

        self.selection.toggle(id, selected);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state(&self.visible_ids())
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(&self.visible_ids())
    }

    /// Selected entities in selection order.
    pub fn selected(&self) -> Vec<&E> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }

    pub fn pending(&self) -> &PendingFlags {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut PendingFlags {
        &mut self.pending
    }

    /// Single-row controls are disabled for rows already in flight and for
    /// selected rows while a bulk action runs.
    pub fn can_act_on(&self, id: &EntityId) -> bool {
        if self.pending.is_pending(id) {
            return false;
        }

        !(self.pending.is_bulk_in_flight() && self.selection.contains(id))
    }

    fn rerun(&mut self) {
        self.order = filter_indices(self.store.items(), &self.filter);

        let clamped = clamp_page(self.page, self.order.len(), self.page_size);
        if clamped != self.page {
            tracing::debug!(from = self.page, to = clamped, "clamped page");
            self.page = clamped;
        }
    }
}
