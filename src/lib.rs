#![doc = "The `todo_service` library crate."]
#![doc = ""]
#![doc = "Identity, authorization and item lifecycle for a multi-tenant to-do service,"]
#![doc = "plus the actix-web routes and storage backends around them. The binary"]
#![doc = "(`main.rs`) only reads configuration and starts the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod items;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;

pub use crate::error::AppError;
pub use crate::service::TodoService;
