//! Identity and authorization.
//!
//! - [`credentials`]: password hashing and account lookup.
//! - [`token`]: signed bearer tokens.
//! - [`guard`]: per-item ownership checks.
//! - [`extractors`]: pulls the bearer token out of an HTTP request.

pub mod credentials;
pub mod extractors;
pub mod guard;
pub mod password;
pub mod token;

pub use credentials::CredentialStore;
pub use extractors::BearerToken;
pub use guard::OwnershipGuard;
pub use password::{hash_password, verify_password};
pub use token::{extract_subject, Claims, Identity, TokenService};
