//! Persistence collaborator.
//!
//! The core only talks to storage through these two traits. Each method is a
//! single record-level operation; nothing here spans more than one write.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{Priority, TodoItem, User, UserCredentials};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Persists a new account. Fails if the email is already taken.
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError>;
}

/// Already-validated replacement values for an item's mutable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsUpdate {
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn insert_item(&self, item: &TodoItem) -> Result<TodoItem, AppError>;

    /// Looks an item up regardless of owner or deletion state.
    async fn find_item(&self, id: &str) -> Result<Option<TodoItem>, AppError>;

    /// Non-deleted items of `owner_id` in storage order, at most `limit` of them.
    async fn list_items(&self, owner_id: &str, limit: i64) -> Result<Vec<TodoItem>, AppError>;

    async fn update_details(
        &self,
        id: &str,
        details: &DetailsUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TodoItem>, AppError>;

    async fn mark_completed(
        &self,
        id: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TodoItem>, AppError>;

    /// Returns false when no item has this id.
    async fn mark_deleted(&self, id: &str, updated_at: DateTime<Utc>) -> Result<bool, AppError>;

    /// One probe answering "exists and belongs to `owner_id`".
    /// A missing item and a foreign item both yield `false`.
    async fn is_owned_by(&self, id: &str, owner_id: &str) -> Result<bool, AppError>;
}
