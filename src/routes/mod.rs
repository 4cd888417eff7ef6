pub mod auth;
pub mod health;
pub mod items;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;

/// Malformed JSON bodies are client input errors like any other validation failure.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(format!("Bad request: {}", err)).into()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(auth::register)
        .service(auth::login)
        .service(
            web::scope("/item")
                .service(items::create_item)
                .service(items::list_items)
                .service(items::update_item)
                .service(items::complete_item)
                .service(items::delete_item)
                .service(items::get_item),
        );
}
