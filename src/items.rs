//! Item lifecycle.
//!
//! ```text
//! [none] --create--> ACTIVE
//! ACTIVE | COMPLETED --update--> same state
//! ACTIVE | COMPLETED --complete--> COMPLETED
//! ACTIVE | COMPLETED --soft_delete--> DELETED
//! ```
//!
//! Both flags only ever go from false to true, and no transition looks at the
//! other flag: a soft-deleted item can still be completed or edited, it just
//! stays deleted. Ownership is not checked here; that is the guard's job, done
//! by the caller before any of these run.

use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::{ItemDetails, NewItem, Priority, TodoItem};
use crate::store::{DetailsUpdate, ItemStore};

pub const ITEM_NOT_FOUND: &str = "Item not found";

#[derive(Clone)]
pub struct ItemManager {
    store: Arc<dyn ItemStore>,
}

impl ItemManager {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Validates the input and persists a new active item for `owner_id`.
    pub async fn create(&self, input: NewItem, owner_id: &str) -> Result<TodoItem, AppError> {
        input.validate()?;
        let priority = input.priority.parse::<Priority>()?;

        let item = TodoItem::new(input, priority, owner_id, Utc::now());
        self.store.insert_item(&item).await
    }

    /// Looks an item up by id regardless of owner or deletion state.
    pub async fn find_by_id(&self, item_id: &str) -> Result<TodoItem, AppError> {
        self.store
            .find_item(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ITEM_NOT_FOUND.into()))
    }

    /// Replaces description, due date and priority. The name never changes.
    pub async fn update(&self, item_id: &str, details: ItemDetails) -> Result<TodoItem, AppError> {
        details.validate()?;
        let priority = details.priority.parse::<Priority>()?;

        let update = DetailsUpdate {
            description: details.description,
            due_date: details.due_date,
            priority,
        };
        self.store
            .update_details(item_id, &update, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound(ITEM_NOT_FOUND.into()))
    }

    /// Marks the item completed, unconditionally. Completing a completed item
    /// is not an error.
    pub async fn complete(&self, item_id: &str) -> Result<TodoItem, AppError> {
        self.store
            .mark_completed(item_id, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound(ITEM_NOT_FOUND.into()))
    }

    /// Sets the soft-delete flag. The record stays retrievable by id.
    pub async fn soft_delete(&self, item_id: &str) -> Result<(), AppError> {
        if self.store.mark_deleted(item_id, Utc::now()).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(ITEM_NOT_FOUND.into()))
        }
    }

    /// Non-deleted items of `owner_id`, at most `limit` of them.
    pub async fn list(&self, owner_id: &str, limit: i64) -> Result<Vec<TodoItem>, AppError> {
        if limit <= 0 {
            return Err(AppError::Validation(format!(
                "limit must be a positive number (got {})",
                limit
            )));
        }
        self.store.list_items(owner_id, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemState;
    use crate::store::MemoryStore;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn manager() -> ItemManager {
        ItemManager::new(Arc::new(MemoryStore::new()))
    }

    fn new_item(name: &str, priority: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            description: "Semi-skimmed".to_string(),
            due_date: Utc::now() + Duration::days(1),
            priority: priority.to_string(),
        }
    }

    fn details(priority: &str) -> ItemDetails {
        ItemDetails {
            description: "Whole milk instead".to_string(),
            due_date: Utc::now() + Duration::days(2),
            priority: priority.to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_create_stamps_fresh_active_item() {
        let items = manager();
        let item = items.create(new_item("Buy milk", "HIGH"), "alice").await.unwrap();

        assert_eq!(item.owner_id, "alice");
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.state(), ItemState::Active);
        assert_eq!(item.created_at, item.updated_at);
        assert_eq!(items.find_by_id(&item.id).await.unwrap(), item);
    }

    #[actix_rt::test]
    async fn test_create_validates_name_and_priority() {
        let items = manager();

        let short = items.create(new_item("ab", "HIGH"), "alice").await;
        assert!(matches!(short, Err(AppError::Validation(_))));

        let bad_priority = items.create(new_item("Buy milk", "URGENT"), "alice").await;
        assert!(matches!(bad_priority, Err(AppError::Validation(_))));

        assert!(items.list("alice", 10).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_update_changes_details_only() {
        let items = manager();
        let item = items.create(new_item("Buy milk", "HIGH"), "alice").await.unwrap();

        let updated = items.update(&item.id, details("LOW")).await.unwrap();
        assert_eq!(updated.name, "Buy milk");
        assert_eq!(updated.description, "Whole milk instead");
        assert_eq!(updated.priority, Priority::Low);
        assert_eq!(updated.created_at, item.created_at);
        assert!(updated.updated_at >= item.updated_at);
    }

    #[actix_rt::test]
    async fn test_update_with_bad_priority_applies_nothing() {
        let items = manager();
        let item = items.create(new_item("Buy milk", "HIGH"), "alice").await.unwrap();

        let result = items.update(&item.id, details("URGENT")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(items.find_by_id(&item.id).await.unwrap(), item);
    }

    #[actix_rt::test]
    async fn test_missing_items_are_not_found() {
        let items = manager();

        assert!(matches!(items.find_by_id("nope").await, Err(AppError::NotFound(_))));
        assert!(matches!(items.update("nope", details("LOW")).await, Err(AppError::NotFound(_))));
        assert!(matches!(items.complete("nope").await, Err(AppError::NotFound(_))));
        assert!(matches!(items.soft_delete("nope").await, Err(AppError::NotFound(_))));
    }

    #[actix_rt::test]
    async fn test_complete_is_idempotent() {
        let items = manager();
        let item = items.create(new_item("Buy milk", "HIGH"), "alice").await.unwrap();

        let first = items.complete(&item.id).await.unwrap();
        let second = items.complete(&item.id).await.unwrap();
        assert!(first.is_completed);
        assert!(second.is_completed);
        assert_eq!(second.state(), ItemState::Completed);
    }

    #[actix_rt::test]
    async fn test_completed_items_stay_editable() {
        let items = manager();
        let item = items.create(new_item("Buy milk", "HIGH"), "alice").await.unwrap();
        items.complete(&item.id).await.unwrap();

        let updated = items.update(&item.id, details("MEDIUM")).await.unwrap();
        assert!(updated.is_completed);
        assert_eq!(updated.priority, Priority::Medium);
    }

    #[actix_rt::test]
    async fn test_soft_delete_hides_from_list_but_not_lookup() {
        let items = manager();
        let kept = items.create(new_item("Buy milk", "HIGH"), "alice").await.unwrap();
        let gone = items.create(new_item("Buy eggs", "LOW"), "alice").await.unwrap();

        items.soft_delete(&gone.id).await.unwrap();

        let listed = items.list("alice", 10).await.unwrap();
        assert_eq!(listed.iter().map(|i| i.id.clone()).collect::<Vec<_>>(), vec![kept.id]);

        let found = items.find_by_id(&gone.id).await.unwrap();
        assert!(found.is_deleted);
        assert_eq!(found.state(), ItemState::Deleted);

        // deleting again keeps it deleted
        items.soft_delete(&gone.id).await.unwrap();
    }

    #[actix_rt::test]
    async fn test_deleted_items_can_still_be_completed_and_edited() {
        let items = manager();
        let item = items.create(new_item("Buy milk", "HIGH"), "alice").await.unwrap();
        items.soft_delete(&item.id).await.unwrap();

        let completed = items.complete(&item.id).await.unwrap();
        assert!(completed.is_completed);
        assert!(completed.is_deleted);
        assert_eq!(completed.state(), ItemState::Deleted);

        let updated = items.update(&item.id, details("LOW")).await.unwrap();
        assert_eq!(updated.priority, Priority::Low);
        assert!(updated.is_deleted);
        assert!(updated.is_completed);

        assert!(items.list("alice", 10).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_list_limit() {
        let items = manager();
        for name in ["one", "two", "three"] {
            items.create(new_item(name, "LOW"), "alice").await.unwrap();
        }
        items.create(new_item("other", "LOW"), "bob").await.unwrap();

        let two: Vec<String> = items
            .list("alice", 2)
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(two, vec!["one".to_string(), "two".to_string()]);

        assert!(matches!(items.list("alice", 0).await, Err(AppError::Validation(_))));
        assert!(matches!(items.list("alice", -5).await, Err(AppError::Validation(_))));
    }
}
