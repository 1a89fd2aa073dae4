use std::sync::{Arc, Weak};

use tokio::sync::{Mutex, MutexGuard};

use crate::ListView;

/// Owner of a mounted list view. Dropping the last clone unmounts it.
#[derive(Debug)]
pub struct SharedView<E>(Arc<Mutex<ListView<E>>>);

impl<E> Clone for SharedView<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E> SharedView<E> {
    pub fn new(view: ListView<E>) -> Self {
        Self(Arc::new(Mutex::new(view)))
    }

    pub async fn lock(&self) -> MutexGuard<'_, ListView<E>> {
        self.0.lock().await
    }

    /// Non-owning handle for work that may outlive the view.
    pub fn handle(&self) -> ViewHandle<E> {
        ViewHandle(Arc::downgrade(&self.0))
    }
}

/// Weak reference to a mounted view; upgrading fails after unmount.
#[derive(Debug)]
pub struct ViewHandle<E>(Weak<Mutex<ListView<E>>>);

impl<E> Clone for ViewHandle<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E> ViewHandle<E> {
    pub fn upgrade(&self) -> Option<SharedView<E>> {
        self.0.upgrade().map(SharedView)
    }

    pub fn is_mounted(&self) -> bool {
        self.0.strong_count() > 0
    }
}
