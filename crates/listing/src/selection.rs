use std::collections::HashSet;

use mealplanner_shared::EntityId;

/// Header checkbox state relative to the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Some,
    All,
}

/// Selected ids in insertion order.
///
/// Ids stay selected when they scroll or filter out of view; the derived
/// states are always computed against the caller's visible ids.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    order: Vec<EntityId>,
    members: HashSet<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set with exactly `visible`.
    pub fn select_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a EntityId>) {
        self.clear();
        for id in visible {
            self.insert(id.clone());
        }
    }

    pub fn toggle(&mut self, id: &EntityId, selected: bool) {
        if selected {
            self.insert(id.clone());
        } else if self.members.remove(id) {
            self.order.retain(|existing| existing != id);
        }
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    /// Drop every id `keep` rejects. Returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&EntityId) -> bool) -> usize {
        let before = self.order.len();
        self.order.retain(|id| keep(id));
        if self.order.len() != before {
            self.members = self.order.iter().cloned().collect();
        }
        before - self.order.len()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in the order they were selected.
    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    pub fn is_all_selected(&self, visible: &[EntityId]) -> bool {
        !self.is_empty()
            && self.len() == visible.len()
            && visible.iter().all(|id| self.contains(id))
    }

    /// At least one visible id selected, but not all of them.
    pub fn is_some_selected(&self, visible: &[EntityId]) -> bool {
        !self.is_all_selected(visible) && visible.iter().any(|id| self.contains(id))
    }

    pub fn state(&self, visible: &[EntityId]) -> SelectionState {
        if self.is_all_selected(visible) {
            SelectionState::All
        } else if self.is_some_selected(visible) {
            SelectionState::Some
        } else {
            SelectionState::None
        }
    }

    fn insert(&mut self, id: EntityId) {
        if self.members.insert(id.clone()) {
            self.order.push(id);
        }
    }
}
