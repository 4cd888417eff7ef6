use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{DetailsUpdate, ItemStore, UserStore};
use crate::error::AppError;
use crate::models::{Priority, TodoItem, User, UserCredentials};

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
)";

const CREATE_ITEMS_TABLE: &str = "CREATE TABLE IF NOT EXISTS todo_items (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL REFERENCES users(id),
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    due_date TIMESTAMPTZ NOT NULL,
    priority TEXT NOT NULL,
    is_completed BOOLEAN NOT NULL DEFAULT FALSE,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)";

const CREATE_ITEMS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS todo_items_owner_idx ON todo_items (owner_id, created_at)";

const ITEM_COLUMNS: &str = "id, owner_id, name, description, due_date, priority, \
     is_completed, is_deleted, created_at, updated_at";

/// Postgres-backed store. Every value reaches SQL as a bound parameter.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Row shape of `todo_items`; priority is stored as text.
#[derive(Debug, FromRow)]
struct ItemRow {
    id: String,
    owner_id: String,
    name: String,
    description: String,
    due_date: DateTime<Utc>,
    priority: String,
    is_completed: bool,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for TodoItem {
    type Error = AppError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let priority = row.priority.parse::<Priority>().map_err(|_| {
            AppError::Internal(format!(
                "item {} has unknown stored priority {:?}",
                row.id, row.priority
            ))
        })?;

        Ok(TodoItem {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            due_date: row.due_date,
            priority,
            is_completed: row.is_completed,
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        for statement in [CREATE_USERS_TABLE, CREATE_ITEMS_TABLE, CREATE_ITEMS_OWNER_INDEX] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn into_item(row: Option<ItemRow>) -> Result<Option<TodoItem>, AppError> {
    row.map(TodoItem::try_from).transpose()
}

#[async_trait]
impl UserStore for PgStore {
    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query("INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)")
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT id, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(user_id, password_hash)| UserCredentials {
            user_id,
            password_hash,
        }))
    }
}

#[async_trait]
impl ItemStore for PgStore {
    async fn insert_item(&self, item: &TodoItem) -> Result<TodoItem, AppError> {
        let sql = format!(
            "INSERT INTO todo_items ({ITEM_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {ITEM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(&item.id)
            .bind(&item.owner_id)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.due_date)
            .bind(item.priority.as_str())
            .bind(item.is_completed)
            .bind(item.is_deleted)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(&self.pool)
            .await?;
        TodoItem::try_from(row)
    }

    async fn find_item(&self, id: &str) -> Result<Option<TodoItem>, AppError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM todo_items WHERE id = $1");
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        into_item(row)
    }

    async fn list_items(&self, owner_id: &str, limit: i64) -> Result<Vec<TodoItem>, AppError> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM todo_items \
             WHERE is_deleted = FALSE AND owner_id = $1 \
             ORDER BY created_at, id \
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(owner_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(TodoItem::try_from).collect()
    }

    async fn update_details(
        &self,
        id: &str,
        details: &DetailsUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TodoItem>, AppError> {
        let sql = format!(
            "UPDATE todo_items \
             SET description = $1, due_date = $2, priority = $3, updated_at = $4 \
             WHERE id = $5 \
             RETURNING {ITEM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(&details.description)
            .bind(details.due_date)
            .bind(details.priority.as_str())
            .bind(updated_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        into_item(row)
    }

    async fn mark_completed(
        &self,
        id: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TodoItem>, AppError> {
        let sql = format!(
            "UPDATE todo_items SET is_completed = TRUE, updated_at = $1 \
             WHERE id = $2 \
             RETURNING {ITEM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(updated_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        into_item(row)
    }

    async fn mark_deleted(&self, id: &str, updated_at: DateTime<Utc>) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE todo_items SET is_deleted = TRUE, updated_at = $1 WHERE id = $2")
                .bind(updated_at)
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn is_owned_by(&self, id: &str, owner_id: &str) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM todo_items WHERE id = $1 AND owner_id = $2)",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(owned)
    }
}
