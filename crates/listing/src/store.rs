use mealplanner_shared::{Entity, EntityId, RemoteError};

/// Last fetched snapshot of a remote collection.
#[derive(Debug, Clone)]
pub struct ItemStore<E> {
    items: Vec<E>,
    loading: bool,
    error: Option<RemoteError>,
    revision: u64,
}

impl<E> Default for ItemStore<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            revision: 0,
        }
    }
}

impl<E: Entity> ItemStore<E> {
    pub fn new(items: Vec<E>) -> Self {
        Self {
            items,
            revision: 1,
            ..Default::default()
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn get(&self, id: &EntityId) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&RemoteError> {
        self.error.as_ref()
    }

    /// Bumped on every successful fetch.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// A failed fetch keeps the previous snapshot and records the error.
    pub fn finish_fetch(&mut self, result: Result<Vec<E>, RemoteError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.revision += 1;
            }
            Err(error) => self.error = Some(error),
        }
    }
}
