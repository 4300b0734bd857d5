use settle_core::compose::remember_with_key;
use settle_core::signal::{Signal, signal};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    /// The index does not fall inside the list. The list is left untouched.
    #[error("index {index} out of bounds (len {len})")]
    OutOfBounds { index: usize, len: usize },
}

/// Observable list with the usual mutation helpers. Cloning the handle
/// shares the underlying list.
pub struct ListState<T: Clone + 'static> {
    items: Signal<Vec<T>>,
}

impl<T: Clone + 'static> ListState<T> {
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            items: signal(initial),
        }
    }

    /// Snapshot of the current items.
    pub fn items(&self) -> Vec<T> {
        self.items.get()
    }

    pub fn items_signal(&self) -> Signal<Vec<T>> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.with(|v| v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.items.with(|v| v.is_empty())
    }

    /// Replaces the whole list.
    pub fn set(&self, new_items: Vec<T>) {
        self.items.set(new_items);
    }

    pub fn push(&self, item: T) {
        self.items.update(|v| v.push(item));
    }

    /// Inserts at `index`, shifting later items. `index == len` appends.
    pub fn insert_at(&self, index: usize, item: T) -> Result<(), ListError> {
        let len = self.len();
        if index > len {
            return Err(ListError::OutOfBounds { index, len });
        }
        self.items.update(|v| v.insert(index, item));
        Ok(())
    }

    /// Replaces the item at `index`.
    pub fn update_at(&self, index: usize, item: T) -> Result<(), ListError> {
        let len = self.len();
        if index >= len {
            return Err(ListError::OutOfBounds { index, len });
        }
        self.items.update(|v| v[index] = item);
        Ok(())
    }

    /// Removes and returns the item at `index`.
    pub fn remove_at(&self, index: usize) -> Result<T, ListError> {
        let len = self.len();
        if index >= len {
            return Err(ListError::OutOfBounds { index, len });
        }
        let removed = self.items.with(|v| v[index].clone());
        self.items.update(|v| {
            v.remove(index);
        });
        Ok(removed)
    }

    pub fn clear(&self) {
        self.items.set(Vec::new());
    }
}

impl<T: Clone + 'static> Clone for ListState<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

/// Remembers one [`ListState`] per key; `init` runs only on the first pass.
pub fn use_list<T: Clone + 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> Vec<T>,
) -> ListState<T> {
    let key = key.into();
    let slot = remember_with_key(format!("list:{key}"), || ListState::new(init()));
    (*slot).clone()
}
