use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Priority of a to-do item. Stored and transmitted in upper case.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            other => Err(AppError::Validation(format!(
                "priority must be one of HIGH, MEDIUM, LOW (got {:?})",
                other
            ))),
        }
    }
}

/// Lifecycle position of an item, derived from its two one-way flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Active,
    Completed,
    Deleted,
}

/// A to-do item as stored and returned by the API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TodoItem {
    /// Server-generated identifier (UUID v4 rendered as a string).
    pub id: String,
    /// Account that created the item. Never changes.
    pub owner_id: String,
    /// Set at creation and immutable afterwards.
    pub name: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    /// One-way: once true it is never reset.
    pub is_completed: bool,
    /// Soft-delete flag. One-way as well.
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    /// Advanced by every mutating operation.
    pub updated_at: DateTime<Utc>,
}

impl TodoItem {
    /// Builds a fresh active item owned by `owner_id`, stamping both timestamps with `now`.
    pub fn new(
        input: NewItem,
        priority: Priority,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name: input.name,
            description: input.description,
            due_date: input.due_date,
            priority,
            is_completed: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn state(&self) -> ItemState {
        if self.is_deleted {
            ItemState::Deleted
        } else if self.is_completed {
            ItemState::Completed
        } else {
            ItemState::Active
        }
    }
}

/// Payload of `POST /item/create`.
///
/// `priority` arrives as free text so an unknown value is reported as a
/// validation failure rather than a deserialisation failure.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct NewItem {
    #[validate(length(min = 3, max = 200, message = "name must be between 3 and 200 characters"))]
    pub name: String,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: String,
}

/// Mutable fields of an item, the payload of `PUT /item/update/{id}`.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct ItemDetails {
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: String,
}

/// Payload of `POST /item/list`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListItemsRequest {
    pub limit: i64,
}
