use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{DetailsUpdate, ItemStore, UserStore};
use crate::error::AppError;
use crate::models::{TodoItem, User, UserCredentials};

/// In-process store backing the test suite and database-less local runs.
///
/// Items are kept in insertion order, which is the natural order `list_items`
/// reports. Each trait method takes the lock once, so every operation is
/// atomic with respect to the others.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    items: RwLock<Vec<TodoItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored user record, for inspecting what registration persisted.
    pub async fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.users.read().await.iter().any(|user| user.email == email))
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(AppError::Internal(format!(
                "unique constraint violated for users.email = {}",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.email == email)
            .map(|user| UserCredentials {
                user_id: user.id.clone(),
                password_hash: user.password_hash.clone(),
            }))
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn insert_item(&self, item: &TodoItem) -> Result<TodoItem, AppError> {
        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(AppError::Internal(format!("duplicate item id {}", item.id)));
        }
        items.push(item.clone());
        Ok(item.clone())
    }

    async fn find_item(&self, id: &str) -> Result<Option<TodoItem>, AppError> {
        Ok(self.items.read().await.iter().find(|item| item.id == id).cloned())
    }

    async fn list_items(&self, owner_id: &str, limit: i64) -> Result<Vec<TodoItem>, AppError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|item| !item.is_deleted && item.owner_id == owner_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_details(
        &self,
        id: &str,
        details: &DetailsUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TodoItem>, AppError> {
        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|item| item.id == id).map(|item| {
            item.description = details.description.clone();
            item.due_date = details.due_date;
            item.priority = details.priority;
            item.updated_at = updated_at;
            item.clone()
        }))
    }

    async fn mark_completed(
        &self,
        id: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TodoItem>, AppError> {
        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|item| item.id == id).map(|item| {
            item.is_completed = true;
            item.updated_at = updated_at;
            item.clone()
        }))
    }

    async fn mark_deleted(&self, id: &str, updated_at: DateTime<Utc>) -> Result<bool, AppError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.is_deleted = true;
                item.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn is_owned_by(&self, id: &str, owner_id: &str) -> Result<bool, AppError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .any(|item| item.id == id && item.owner_id == owner_id))
    }
}
