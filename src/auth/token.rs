use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppError;

/// Lifetime of every issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

const ALGORITHM: Algorithm = Algorithm::HS512;

/// Detail of the `Internal` error returned when asked to sign for a blank
/// subject or display name.
pub const INVALID_IDENTITY: &str = "invalid identity: refusing to issue a token without user_id and name";

/// Claims carried by a bearer token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Account id the token speaks for.
    #[serde(rename = "user_id")]
    pub subject_id: String,
    /// Human readable name of the account (its email).
    #[serde(rename = "name")]
    pub display_name: String,
    /// Expiry as seconds since the epoch.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

/// Identity established by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: String,
    pub display_name: String,
}

/// Subject of an already-verified claim set, or `None` when it is absent or blank.
///
/// This does no signature work; it only reads claims that came out of
/// [`TokenService::validate`].
pub fn extract_subject(claims: Option<&Claims>) -> Option<&str> {
    claims
        .map(|claims| claims.subject_id.as_str())
        .filter(|subject| !subject.trim().is_empty())
}

/// Signs and verifies bearer tokens with the process-wide HMAC secret.
///
/// Built once from [`Config`]; the keys are never replaced afterwards.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret)
    }

    /// Mints a token for `subject_id` that expires 24 hours from now.
    ///
    /// Refuses to sign for an empty subject or display name.
    pub fn issue(&self, subject_id: &str, display_name: &str) -> Result<String, AppError> {
        self.issue_at(subject_id, display_name, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        subject_id: &str,
        display_name: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        if subject_id.trim().is_empty() || display_name.trim().is_empty() {
            return Err(AppError::Internal(INVALID_IDENTITY.into()));
        }

        let claims = Claims {
            subject_id: subject_id.to_string(),
            display_name: display_name.to_string(),
            expires_at: (issued_at + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry and returns the identity the token asserts.
    ///
    /// Every failure is the same generic `Unauthenticated`, whatever the cause.
    pub fn validate(&self, token: &str) -> Result<Identity, AppError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)?.claims;

        let subject_id = extract_subject(Some(&claims))
            .ok_or_else(|| {
                debug!("token rejected: blank subject");
                AppError::Unauthenticated("Invalid or expired token".into())
            })?
            .to_string();
        if claims.display_name.trim().is_empty() {
            debug!("token rejected: blank display name");
            return Err(AppError::Unauthenticated("Invalid or expired token".into()));
        }

        Ok(Identity {
            subject_id,
            display_name: claims.display_name,
        })
    }
}
