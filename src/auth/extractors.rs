use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{Error as ActixError, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The raw bearer token of a request, taken from `Authorization: Bearer <token>`.
///
/// Extraction does not verify anything; handlers pass the string on to the
/// service, which validates it before touching any resource. A missing header,
/// a different scheme or an empty token is rejected with `Unauthenticated`.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn bearer_from(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

impl FromRequest for BearerToken {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match bearer_from(req) {
            Some(token) => ready(Ok(BearerToken(token))),
            None => {
                let err = AppError::Unauthenticated("Missing or malformed bearer token".into());
                ready(Err(err.into()))
            }
        }
    }
}
