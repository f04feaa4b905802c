//! End-to-end HTTP scenarios against the full router over an in-memory
//! database: checkout, kitchen lifecycle, admin session, and the degraded
//! catalog paths.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use spicetable_db::{Database, DbConfig};
use spicetable_server::config::Config;
use spicetable_server::notify::EmailNotifier;
use spicetable_server::{routes, AppState};

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let config = Config {
        port: 5000,
        database_url: "sqlite://:memory:".to_string(),
        session_secret: "test-secret".to_string(),
        session_lifetime_secs: 3600,
        smtp_email: None,
        smtp_password: None,
        app_url: "http://localhost:5000".to_string(),
        admin_email: "admin@restaurant.com".to_string(),
        admin_password: "admin123".to_string(),
    };
    let notifier = Arc::new(EmailNotifier::new(None));
    let state = Arc::new(AppState::new(&db, config, notifier));
    state.seed().await.unwrap();
    routes::router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value, axum::http::HeaderMap) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body, headers)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request.headers_mut().insert(
        header::COOKIE,
        header::HeaderValue::from_str(cookie).unwrap(),
    );
    request
}

async fn admin_cookie(app: &Router) -> String {
    let (status, _, headers) = send(
        app,
        post(
            "/api/admin/login",
            json!({"email": "admin@restaurant.com", "password": "admin123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn order_draft() -> Value {
    json!({
        "customerName": "Priya",
        "mobileNumber": "9876543210",
        "tableNumber": 4,
        "items": [
            {"menuItemId": 1, "quantity": 2, "customizations": {"Spice Level": ["Hot"]}}
        ],
        "total": 698
    })
}

#[tokio::test]
async fn menu_is_seeded_on_startup() {
    let app = app().await;

    let (status, body, _) = send(&app, get("/api/menu")).await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 20);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["name"], "Vegetable Manchurian");
    assert_eq!(items[0]["isAvailable"], true);
    assert_eq!(items[0]["customizations"]["options"][0]["maxChoices"], 1);

    let (status, body, _) = send(&app, get("/api/menu/13")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Gulab Jamun");

    let (status, _, _) = send(&app, get("/api/menu/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkout_and_kitchen_lifecycle() {
    let app = app().await;

    let (status, order, _) = send(&app, post("/api/orders", order_draft())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "in progress");
    assert_eq!(order["paymentStatus"], "pending");
    assert_eq!(order["paymentMethod"], "cash");
    assert_eq!(order["total"], 698.0);
    let id = order["id"].as_i64().unwrap();

    // Kitchen completes the order.
    let (status, body, _) = send(
        &app,
        post(&format!("/api/orders/{id}/status"), json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    // Terminal guard: completed → cancelled is a conflict.
    let (status, body, _) = send(
        &app,
        post(&format!("/api/orders/{id}/status"), json!({"status": "cancelled"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("completed"));

    // Unknown values and ids.
    let (status, _, _) = send(
        &app,
        post(&format!("/api/orders/{id}/status"), json!({"status": "done"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        post("/api/orders/9999/status", json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Payment axis stays open after completion.
    let (status, body, _) = send(
        &app,
        post(
            &format!("/api/orders/{id}/payment-status"),
            json!({"status": "paid"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paymentStatus"], "paid");
}

#[tokio::test]
async fn checkout_validation_messages() {
    let app = app().await;

    let mut draft = order_draft();
    draft["items"] = json!([]);
    let (status, body, _) = send(&app, post("/api/orders", draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let mut draft = order_draft();
    draft["mobileNumber"] = json!("12345");
    let (status, _, _) = send(&app, post("/api/orders", draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut draft = order_draft();
    draft["tableNumber"] = json!(0);
    let (status, _, _) = send(&app, post("/api/orders", draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_history_lookups() {
    let app = app().await;

    send(&app, post("/api/orders", order_draft())).await;
    let mut other = order_draft();
    other["customerName"] = json!("Meera");
    other["mobileNumber"] = json!("9123456780");
    other["userEmail"] = json!("meera@example.com");
    send(&app, post("/api/orders", other)).await;

    let (status, body, _) = send(&app, get("/api/orders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    // Newest first.
    assert_eq!(body[0]["customerName"], "Meera");

    let (_, body, _) = send(&app, get("/api/orders/mobile/9876543210")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["customerName"], "Priya");

    let (_, body, _) = send(&app, get("/api/users/meera@example.com/orders")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["customerName"], "Meera");

    let (_, body, _) = send(&app, get("/api/orders/mobile/0000000000")).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn admin_session_flow() {
    let app = app().await;

    // No cookie.
    let (status, _, _) = send(&app, get("/api/admin/user")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Wrong password and unknown email are indistinguishable.
    let (status, wrong, _) = send(
        &app,
        post(
            "/api/admin/login",
            json!({"email": "admin@restaurant.com", "password": "nope-nope"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, unknown, _) = send(
        &app,
        post(
            "/api/admin/login",
            json!({"email": "ghost@restaurant.com", "password": "nope-nope"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong["message"], unknown["message"]);

    // Successful login sets the session cookie.
    let cookie = admin_cookie(&app).await;
    assert!(cookie.starts_with("session="));

    let (status, body, _) = send(&app, with_cookie(get("/api/admin/user"), &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "admin@restaurant.com");
    assert_eq!(body["isAdmin"], true);
    assert!(body.get("password").is_none());

    // Logout clears the cookie.
    let (status, _, headers) = send(&app, post("/api/admin/logout", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
}

#[tokio::test]
async fn menu_crud_requires_admin() {
    let app = app().await;

    let new_item = json!({
        "name": "Tandoori Mushroom",
        "price": 329,
        "category": "Starters"
    });

    let (status, _, _) = send(&app, post("/api/menu", new_item.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let cookie = admin_cookie(&app).await;
    let (status, created, _) =
        send(&app, with_cookie(post("/api/menu", new_item), &cookie)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 21);
    assert_eq!(created["isAvailable"], true);

    // Missing required fields are a 400.
    let (status, _, _) = send(
        &app,
        with_cookie(post("/api/menu", json!({"name": "No price"})), &cookie),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Patch and delete.
    let patch = Request::builder()
        .method("PATCH")
        .uri("/api/menu/21")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie.clone())
        .body(Body::from(json!({"price": 359}).to_string()))
        .unwrap();
    let (status, patched, _) = send(&app, patch).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["price"], 359.0);

    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/menu/21")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = send(&app, get("/api/menu/21")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn availability_toggle_and_self_heal() {
    let app = app().await;
    let cookie = admin_cookie(&app).await;

    let (status, body, _) = send(
        &app,
        post("/api/menu/3/availability", json!({"isAvailable": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isAvailable"], false);

    // Missing / mistyped flag.
    let (status, _, _) = send(&app, post("/api/menu/3/availability", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _, _) = send(
        &app,
        post("/api/menu/3/availability", json!({"isAvailable": "yes"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Deleted seed items come back through the toggle.
    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/menu/3")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(&app, delete).await;

    let (status, healed, _) = send(
        &app,
        post("/api/menu/3/availability", json!({"isAvailable": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(healed["id"], 3);
    assert_eq!(healed["name"], "Mutter Paneer");

    // Ids outside catalog and seed list stay 404.
    let (status, _, _) = send(
        &app,
        post("/api/menu/500/availability", json!({"isAvailable": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn csv_export_shape_and_headers() {
    let app = app().await;
    send(&app, post("/api/orders", order_draft())).await;

    let (status, body, headers) = send(&app, get("/api/orders/export/csv")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/csv");
    assert!(headers
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("attachment; filename=orders-"));

    let text = body.as_str().unwrap();
    assert!(text.starts_with("Order ID,Customer Name"));
    assert!(text.contains("2x Item #1"));
}

#[tokio::test]
async fn kitchen_requires_a_session() {
    let app = app().await;

    let (status, _, _) = send(&app, get("/api/kitchen")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let cookie = admin_cookie(&app).await;
    let (status, body, _) = send(&app, with_cookie(get("/api/kitchen"), &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn password_reset_request_is_enumeration_safe() {
    let app = app().await;

    let (known_status, known, _) = send(
        &app,
        post("/api/admin/request-reset", json!({"email": "admin@restaurant.com"})),
    )
    .await;
    let (unknown_status, unknown, _) = send(
        &app,
        post("/api/admin/request-reset", json!({"email": "ghost@restaurant.com"})),
    )
    .await;

    assert_eq!(known_status, StatusCode::OK);
    assert_eq!(unknown_status, StatusCode::OK);
    assert_eq!(known["message"], unknown["message"]);

    // Malformed email shape is still a 400.
    let (status, _, _) = send(
        &app,
        post("/api/admin/request-reset", json!({"email": "not-an-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A made-up token never resets anything.
    let (status, _, _) = send(
        &app,
        post(
            "/api/admin/reset-password",
            json!({"token": "no-such-token", "newPassword": "newpass1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
