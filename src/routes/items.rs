use crate::{
    auth::BearerToken,
    error::AppError,
    models::{ItemDetails, ListItemsRequest, MessageResponse, NewItem},
    service::TodoService,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};

pub const DELETE_ITEM_SUCCESSFUL: &str = "Item deleted successfully";

/// Creates a new item owned by the caller.
///
/// ## Request Body:
/// - `name`: 3 to 200 characters, immutable afterwards.
/// - `description` (optional): up to 1000 characters.
/// - `due_date`: RFC 3339 timestamp.
/// - `priority`: one of `HIGH`, `MEDIUM`, `LOW`.
///
/// ## Responses:
/// - `201 Created`: the new item.
/// - `400 Bad Request`: invalid name or priority.
/// - `401 Unauthorized`: missing or invalid token.
#[post("/create")]
pub async fn create_item(
    service: web::Data<TodoService>,
    token: BearerToken,
    payload: web::Json<NewItem>,
) -> Result<impl Responder, AppError> {
    let item = service.create_item(token.as_str(), payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(item))
}

/// Lists the caller's items that are not soft-deleted.
///
/// ## Request Body:
/// - `limit`: maximum number of items, must be positive.
#[post("/list")]
pub async fn list_items(
    service: web::Data<TodoService>,
    token: BearerToken,
    payload: web::Json<ListItemsRequest>,
) -> Result<impl Responder, AppError> {
    let items = service.list_items(token.as_str(), payload.limit).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// Retrieves one item, soft-deleted or not.
///
/// ## Responses:
/// - `200 OK`: the item.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden`: the item belongs to someone else.
/// - `404 Not Found`: no item has this id.
#[get("/{id}")]
pub async fn get_item(
    service: web::Data<TodoService>,
    token: BearerToken,
    item_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let item = service.get_item(token.as_str(), &item_id).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Replaces description, due date and priority of an item.
#[put("/update/{id}")]
pub async fn update_item(
    service: web::Data<TodoService>,
    token: BearerToken,
    item_id: web::Path<String>,
    payload: web::Json<ItemDetails>,
) -> Result<impl Responder, AppError> {
    let item = service
        .update_item(token.as_str(), &item_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Marks an item completed. Repeating the call is harmless.
#[patch("/complete/{id}")]
pub async fn complete_item(
    service: web::Data<TodoService>,
    token: BearerToken,
    item_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let item = service.complete_item(token.as_str(), &item_id).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Soft-deletes an item. It disappears from listings but stays retrievable by id.
#[delete("/delete/{id}")]
pub async fn delete_item(
    service: web::Data<TodoService>,
    token: BearerToken,
    item_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    service.delete_item(token.as_str(), &item_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(DELETE_ITEM_SUCCESSFUL)))
}
