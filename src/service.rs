//! Session flows.
//!
//! `TodoService` is the only thing route handlers talk to. It wires the
//! credential store, token service, ownership guard and item lifecycle
//! together, and everything it returns is already an [`AppError`].

use log::{info, warn};
use std::sync::Arc;
use validator::Validate;

use crate::auth::{verify_password, CredentialStore, Identity, OwnershipGuard, TokenService};
use crate::config::Config;
use crate::error::AppError;
use crate::items::ItemManager;
use crate::models::{ItemDetails, LoginRequest, NewItem, RegisterRequest, TodoItem};
use crate::store::{ItemStore, UserStore};

pub const EMAIL_ADDRESS_ALREADY_EXISTS: &str = "User with the email id already exists";
pub const EMAIL_NOT_REGISTERED: &str = "Email id not registered";
pub const INVALID_PASSWORD: &str = "Invalid password";

#[derive(Clone)]
pub struct TodoService {
    credentials: CredentialStore,
    tokens: TokenService,
    guard: OwnershipGuard,
    items: ItemManager,
}

impl TodoService {
    pub fn new(config: &Config, users: Arc<dyn UserStore>, items: Arc<dyn ItemStore>) -> Self {
        Self::with_tokens(TokenService::from_config(config), users, items)
    }

    pub fn with_tokens(
        tokens: TokenService,
        users: Arc<dyn UserStore>,
        items: Arc<dyn ItemStore>,
    ) -> Self {
        Self {
            credentials: CredentialStore::new(users),
            tokens,
            guard: OwnershipGuard::new(items.clone()),
            items: ItemManager::new(items),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<(), AppError> {
        request.validate()?;

        if self.credentials.email_exists(&request.email).await? {
            warn!("registration rejected: {} already exists", request.email);
            return Err(AppError::AlreadyExists(EMAIL_ADDRESS_ALREADY_EXISTS.into()));
        }

        self.credentials
            .register(&request.email, &request.password)
            .await
            .map_err(|e| match e {
                AppError::Internal(_) => e,
                other => AppError::Internal(other.to_string()),
            })
    }

    /// Checks the credentials and returns a fresh bearer token.
    pub async fn login(&self, request: LoginRequest) -> Result<String, AppError> {
        request.validate()?;

        if !self.credentials.email_exists(&request.email).await? {
            warn!("login rejected: {} is not registered", request.email);
            return Err(AppError::NotRegistered(EMAIL_NOT_REGISTERED.into()));
        }

        let stored = self
            .credentials
            .verify_credentials(&request.email)
            .await
            .map_err(|e| match e {
                // vanished between the probe and the fetch
                AppError::NotFound(_) => AppError::NotRegistered(EMAIL_NOT_REGISTERED.into()),
                other => other,
            })?;

        if !verify_password(&request.password, &stored.password_hash)? {
            warn!("login rejected: wrong password for user {}", stored.user_id);
            return Err(AppError::Unauthorized(INVALID_PASSWORD.into()));
        }

        let token = self.tokens.issue(&stored.user_id, &request.email)?;
        info!("user {} logged in", stored.user_id);
        Ok(token)
    }

    pub async fn create_item(&self, token: &str, input: NewItem) -> Result<TodoItem, AppError> {
        let identity = self.authenticate(token)?;
        let item = self.items.create(input, &identity.subject_id).await?;
        info!("user {} created item {}", identity.subject_id, item.id);
        Ok(item)
    }

    /// Returns the item if it exists (`NotFound` otherwise) and belongs to the caller
    /// (`Forbidden` otherwise). Soft-deleted items are still returned.
    pub async fn get_item(&self, token: &str, item_id: &str) -> Result<TodoItem, AppError> {
        let identity = self.authenticate(token)?;
        let item = self.items.find_by_id(item_id).await?;
        self.guard.authorize(item_id, &identity.subject_id).await?;
        Ok(item)
    }

    pub async fn list_items(&self, token: &str, limit: i64) -> Result<Vec<TodoItem>, AppError> {
        let identity = self.authenticate(token)?;
        self.items.list(&identity.subject_id, limit).await
    }

    pub async fn update_item(
        &self,
        token: &str,
        item_id: &str,
        details: ItemDetails,
    ) -> Result<TodoItem, AppError> {
        let identity = self.authorize_item(token, item_id).await?;
        let item = self.items.update(item_id, details).await?;
        info!("user {} updated item {}", identity.subject_id, item_id);
        Ok(item)
    }

    pub async fn complete_item(&self, token: &str, item_id: &str) -> Result<TodoItem, AppError> {
        let identity = self.authorize_item(token, item_id).await?;
        let item = self.items.complete(item_id).await?;
        info!("user {} completed item {}", identity.subject_id, item_id);
        Ok(item)
    }

    pub async fn delete_item(&self, token: &str, item_id: &str) -> Result<(), AppError> {
        let identity = self.authorize_item(token, item_id).await?;
        self.items.soft_delete(item_id).await?;
        info!("user {} deleted item {}", identity.subject_id, item_id);
        Ok(())
    }

    fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        self.tokens.validate(token)
    }

    /// Token, then existence, then ownership. Each step has its own error.
    async fn authorize_item(&self, token: &str, item_id: &str) -> Result<Identity, AppError> {
        let identity = self.authenticate(token)?;
        self.items.find_by_id(item_id).await?;
        self.guard.authorize(item_id, &identity.subject_id).await?;
        Ok(identity)
    }
}
