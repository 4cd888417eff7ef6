//! Credential store adapter: password hashing on the way in, stored hash lookup
//! on the way out. Plaintext passwords never leave this module.

use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::models::{User, UserCredentials};
use crate::store::UserStore;

#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserStore>,
}

impl CredentialStore {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        self.users.email_exists(email).await
    }

    /// Hashes the password and persists a new account under a fresh id.
    ///
    /// Fails if the store rejects the write, e.g. when a concurrent
    /// registration claimed the same email first.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), AppError> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
        };
        self.users.insert_user(&user).await?;
        info!("registered user {} ({})", user.id, user.email);
        Ok(())
    }

    /// Returns the id and stored hash for `email`, or `NotFound` if there is no
    /// such account. Callers that need to tell "not registered" apart should
    /// probe `email_exists` first.
    pub async fn verify_credentials(&self, email: &str) -> Result<UserCredentials, AppError> {
        self.users
            .find_credentials(email)
            .await?
            .ok_or_else(|| AppError::NotFound("No account for this email".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::store::MemoryStore;

    #[actix_rt::test]
    async fn test_register_stores_only_a_hash() {
        let store = Arc::new(MemoryStore::new());
        let credentials = CredentialStore::new(store.clone());

        credentials.register("a@x.com", "P@ss1").await.unwrap();

        let stored = store.user_by_email("a@x.com").await.unwrap();
        assert_ne!(stored.password_hash, "P@ss1");
        assert!(verify_password("P@ss1", &stored.password_hash).unwrap());
        assert!(Uuid::parse_str(&stored.id).is_ok());
        assert!(credentials.email_exists("a@x.com").await.unwrap());
    }

    #[actix_rt::test]
    async fn test_duplicate_write_is_rejected_by_the_store() {
        let credentials = CredentialStore::new(Arc::new(MemoryStore::new()));
        credentials.register("a@x.com", "first").await.unwrap();

        let second = credentials.register("a@x.com", "second").await;
        assert!(matches!(second, Err(AppError::Internal(_))));
    }

    #[actix_rt::test]
    async fn test_verify_credentials() {
        let credentials = CredentialStore::new(Arc::new(MemoryStore::new()));
        credentials.register("a@x.com", "P@ss1").await.unwrap();

        let found = credentials.verify_credentials("a@x.com").await.unwrap();
        assert!(verify_password("P@ss1", &found.password_hash).unwrap());

        let missing = credentials.verify_credentials("nobody@x.com").await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
