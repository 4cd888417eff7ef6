//! Ownership guard.
//!
//! Answers one question: may this subject touch this item? Missing items and
//! foreign items look the same from here, and any failure of the underlying
//! probe is returned as an error so the caller can never proceed on it.

use log::warn;
use std::sync::Arc;

use crate::error::AppError;
use crate::store::ItemStore;

pub const DOES_NOT_BELONG_TO_USER: &str = "Item does not belong to the current user";

#[derive(Clone)]
pub struct OwnershipGuard {
    items: Arc<dyn ItemStore>,
}

impl OwnershipGuard {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    /// Single existence-and-ownership probe.
    pub async fn is_owner(&self, item_id: &str, subject_id: &str) -> Result<bool, AppError> {
        if item_id.is_empty() || subject_id.is_empty() {
            return Ok(false);
        }
        self.items.is_owned_by(item_id, subject_id).await
    }

    /// `Forbidden` unless `subject_id` owns `item_id`.
    pub async fn authorize(&self, item_id: &str, subject_id: &str) -> Result<(), AppError> {
        if self.is_owner(item_id, subject_id).await? {
            Ok(())
        } else {
            warn!("denied access to item {} for subject {}", item_id, subject_id);
            Err(AppError::Forbidden(DOES_NOT_BELONG_TO_USER.into()))
        }
    }
}
