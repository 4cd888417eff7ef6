#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use todo_service::auth::TokenService;
use todo_service::routes::{self, health};
use todo_service::store::MemoryStore;
use todo_service::TodoService;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "P@ss1";

pub fn service() -> TodoService {
    let store = Arc::new(MemoryStore::new());
    TodoService::with_tokens(TokenService::new(TEST_SECRET), store.clone(), store)
}

pub fn app(
    service: TodoService,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(service))
        .wrap(Logger::default())
        .service(health::health)
        .configure(routes::config)
}

pub async fn call<S, B>(app: &S, req: Request) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&body).into_owned(),
        ))
    };
    (status, json)
}

pub async fn register<S, B>(app: &S, email: &str, password: &str) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    call(app, req).await
}

pub async fn login<S, B>(app: &S, email: &str, password: &str) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    call(app, req).await
}

/// Registers `email` with the shared test password and returns a bearer token.
pub async fn signed_in<S, B>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = register(app, email, PASSWORD).await;
    assert_eq!(status, 201, "registration failed: {}", body);
    let (status, body) = login(app, email, PASSWORD).await;
    assert_eq!(status, 200, "login failed: {}", body);
    body["token"].as_str().expect("token in login response").to_string()
}

pub fn item_payload(name: &str, priority: &str) -> Value {
    json!({
        "name": name,
        "description": "Two litres, semi-skimmed",
        "due_date": (Utc::now() + Duration::days(1)).to_rfc3339(),
        "priority": priority,
    })
}

pub fn details_payload(priority: &str) -> Value {
    json!({
        "description": "Changed my mind",
        "due_date": (Utc::now() + Duration::days(2)).to_rfc3339(),
        "priority": priority,
    })
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
