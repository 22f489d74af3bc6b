//! Process-lifetime item storage.
//!
//! Insertion order is preserved. The store does not check id uniqueness on its
//! own; callers look the id up first and hold exclusive access across the
//! lookup and the write.

use crate::domain::item::Item;

#[derive(Debug, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn list(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_index_by_id(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn insert(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Panics if `index` is out of bounds, like slice indexing.
    pub fn replace_at(&mut self, index: usize, item: Item) {
        self.items[index] = item;
    }

    /// Removes the item at `index`, shifting later items down.
    pub fn remove_at(&mut self, index: usize) -> Item {
        self.items.remove(index)
    }
}
