use crate::{
    error::AppError,
    models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
    service::TodoService,
};
use actix_web::{post, web, HttpResponse, Responder};

pub const USER_REGISTERED_SUCCESSFUL: &str = "User registered successfully";
pub const USER_LOGIN_SUCCESSFUL: &str = "User is logged in successfully";

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: the account was created.
/// - `400 Bad Request`: malformed email or empty password.
/// - `403 Forbidden`: the email is already registered.
/// - `500 Internal Server Error`: storage failure.
#[post("/register")]
pub async fn register(
    service: web::Data<TodoService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    service.register(register_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new(USER_REGISTERED_SUCCESSFUL)))
}

/// Login user
///
/// ## Responses:
/// - `200 OK`: body carries the bearer token.
/// - `401 Unauthorized`: wrong password.
/// - `403 Forbidden`: the email is not registered.
/// - `500 Internal Server Error`: storage failure.
#[post("/login")]
pub async fn login(
    service: web::Data<TodoService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = service.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        response: USER_LOGIN_SUCCESSFUL.to_string(),
        token,
    }))
}
