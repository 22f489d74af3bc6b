//! CRUD operations over the in-memory item store.
//!
//! Each operation is a single step against the store. The service takes
//! `&mut self` for writes, so whoever shares it (the HTTP layer wraps it in a
//! mutex) serializes the lookup-then-write sequences in `add`, `update` and
//! `delete`.

use crate::app::error::ItemError;
use crate::domain::item::Item;
use crate::storage::item_store::ItemStore;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

/// What listing an empty store produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyListPolicy {
    /// An empty store is reported as [`ItemError::EmptyStore`].
    #[default]
    Error,
    /// An empty store lists as an empty sequence.
    EmptyList,
}

#[derive(Debug, Default)]
pub struct ItemService {
    store: ItemStore,
    empty_list_policy: EmptyListPolicy,
}

impl ItemService {
    pub fn new(empty_list_policy: EmptyListPolicy) -> Self {
        Self {
            store: ItemStore::new(),
            empty_list_policy,
        }
    }

    pub fn list_all(&self) -> Result<&[Item], ItemError> {
        if self.store.is_empty() && self.empty_list_policy == EmptyListPolicy::Error {
            return Err(ItemError::EmptyStore);
        }
        Ok(self.store.list())
    }

    pub fn get_one(&self, id: i64) -> Result<&Item, ItemError> {
        let item = self.store.find_by_id(id).ok_or(ItemError::NotFound(id))?;
        debug!(id, ?item, "item found");
        Ok(item)
    }

    pub fn add(&mut self, input: &JsonValue) -> Result<Item, ItemError> {
        let item = Item::parse(input)?;
        if self.store.find_by_id(item.id).is_some() {
            return Err(ItemError::DuplicateId(item.id));
        }
        self.store.insert(item.clone());
        info!(id = item.id, count = self.store.len(), "item added");
        Ok(item)
    }

    /// Replaces the item stored under `id` with the normalized `input`.
    ///
    /// Checks run in order: existence, schema, then that the body keeps the same id.
    pub fn update(&mut self, id: i64, input: &JsonValue) -> Result<Item, ItemError> {
        let index = self
            .store
            .find_index_by_id(id)
            .ok_or(ItemError::NotFound(id))?;
        let item = Item::parse(input)?;
        if item.id != id {
            return Err(ItemError::IdChangeForbidden {
                path_id: id,
                body_id: item.id,
            });
        }
        self.store.replace_at(index, item.clone());
        info!(id, "item updated");
        Ok(item)
    }

    pub fn delete(&mut self, id: i64) -> Result<Item, ItemError> {
        let index = self
            .store
            .find_index_by_id(id)
            .ok_or(ItemError::NotFound(id))?;
        let removed = self.store.remove_at(index);
        info!(id, count = self.store.len(), "item deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(service: &ItemService) -> Vec<i64> {
        service.list_all().unwrap().iter().map(|i| i.id).collect()
    }

    #[test]
    fn add_keeps_insertion_order() {
        let mut service = ItemService::default();
        service
            .add(&json!({ "id": 2, "name": "B", "description": "b" }))
            .unwrap();
        service
            .add(&json!({ "id": 1, "name": "A", "description": "a" }))
            .unwrap();
        assert_eq!(ids(&service), vec![2, 1]);
    }

    #[test]
    fn duplicate_id_leaves_store_unchanged() {
        let mut service = ItemService::default();
        let first = service
            .add(&json!({ "id": 1, "name": "A", "description": "a" }))
            .unwrap();
        let err = service
            .add(&json!({ "id": 1, "name": "Other", "description": "other" }))
            .unwrap_err();
        assert_eq!(err, ItemError::DuplicateId(1));
        assert_eq!(service.list_all().unwrap(), &[first]);
    }

    #[test]
    fn get_returns_normalized_item() {
        let mut service = ItemService::default();
        let added = service
            .add(&json!({ "id": "5", "name": "Pen", "description": "blue", "extra": true }))
            .unwrap();
        let got = service.get_one(5).unwrap();
        assert_eq!(got, &added);
        assert_eq!(got.to_json()["id"], json!(5));
        assert_eq!(got.to_json()["extra"], json!(true));
    }

    #[test]
    fn update_cannot_change_id() {
        let mut service = ItemService::default();
        let original = service
            .add(&json!({ "id": 1, "name": "A", "description": "a" }))
            .unwrap();
        let err = service
            .update(1, &json!({ "id": 2, "name": "B", "description": "b" }))
            .unwrap_err();
        assert_eq!(
            err,
            ItemError::IdChangeForbidden {
                path_id: 1,
                body_id: 2
            }
        );
        assert_eq!(service.get_one(1).unwrap(), &original);
    }

    #[test]
    fn update_checks_existence_before_schema() {
        let mut service = ItemService::default();
        let err = service.update(9, &json!({})).unwrap_err();
        assert_eq!(err, ItemError::NotFound(9));

        service
            .add(&json!({ "id": 9, "name": "A", "description": "a" }))
            .unwrap();
        let err = service.update(9, &json!({ "id": 9 })).unwrap_err();
        assert!(matches!(err, ItemError::Validation(e) if e.field == "name"));
    }

    #[test]
    fn update_stores_normalized_body() {
        let mut service = ItemService::default();
        service
            .add(&json!({ "id": 1, "name": "A", "description": "a" }))
            .unwrap();
        let updated = service
            .update(1, &json!({ "id": "1", "name": "A2", "description": "a2" }))
            .unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(service.get_one(1).unwrap().name, "A2");
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let mut service = ItemService::default();
        service
            .add(&json!({ "id": 1, "name": "A", "description": "a" }))
            .unwrap();
        service.delete(1).unwrap();
        assert_eq!(service.get_one(1).unwrap_err(), ItemError::NotFound(1));
        assert_eq!(service.delete(1).unwrap_err(), ItemError::NotFound(1));
    }

    #[test]
    fn empty_list_policy() {
        let service = ItemService::new(EmptyListPolicy::Error);
        assert_eq!(service.list_all().unwrap_err(), ItemError::EmptyStore);

        let service = ItemService::new(EmptyListPolicy::EmptyList);
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn validation_error_is_surfaced() {
        let mut service = ItemService::default();
        let err = service
            .add(&json!({ "id": "abc", "name": "x", "description": "y" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "\"id\" must be a number");
        assert!(service.store.is_empty());
    }

    #[test]
    fn ids_beyond_safe_range_are_rejected_not_merged() {
        let mut service = ItemService::default();
        let err = service
            .add(&json!({ "id": "9007199254740993", "name": "x", "description": "y" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "\"id\" must be a safe number");

        let err = service
            .add(&json!({ "id": 9223372036854775808_u64, "name": "x", "description": "y" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "\"id\" must be a safe number");
        assert!(service.store.is_empty());

        service
            .add(&json!({ "id": "9007199254740991", "name": "x", "description": "y" }))
            .unwrap();
        assert_eq!(ids(&service), vec![9007199254740991]);
    }
}
