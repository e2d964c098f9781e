//! In-process stand-in for the REST backend and the auth service.
//!
//! Sessions are chosen by cookie: `session=customer`, `session=provider` or
//! `session=admin`. Every request is recorded as `"METHOD /path"`.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::COOKIE, header::ORIGIN, header::SET_COOKIE, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::config::{AppState, Settings};

#[derive(Default)]
pub struct MockData {
    pub categories: Vec<Value>,
    pub meals: Vec<Value>,
    pub providers: Vec<Value>,
    pub orders: Vec<Value>,
    pub users: Vec<Value>,
    pub requests: Vec<String>,
    /// Status `POST /api/orders` answers with instead of creating the order.
    pub order_failure: Option<u16>,
    next_id: u32,
}

impl MockData {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-new-{}", self.next_id)
    }
}

#[derive(Clone, Default)]
pub struct MockBackend {
    data: Arc<Mutex<MockData>>,
}

fn session_user(role: &str) -> Value {
    match role {
        "admin" => json!({"id": "admin-1", "name": "Avery Admin", "email": "admin@foodhub.test", "role": "ADMIN", "emailVerified": true}),
        "provider" => json!({"id": "prov-user-1", "name": "Luigi", "email": "luigi@foodhub.test", "role": "PROVIDER", "emailVerified": true}),
        _ => json!({"id": "cust-1", "name": "Casey", "email": "casey@foodhub.test", "role": "CUSTOMER", "emailVerified": true}),
    }
}

fn role_from(headers: &HeaderMap) -> Option<&'static str> {
    let cookie = headers.get(COOKIE)?.to_str().ok()?;
    ["customer", "provider", "admin"]
        .into_iter()
        .find(|role| cookie.split(';').any(|c| c.trim() == format!("session={role}")))
}

fn paginate(items: &[Value], query: &HashMap<String, String>) -> (Vec<Value>, Value) {
    let limit: usize = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(10).max(1);
    let page: usize = query.get("page").and_then(|v| v.parse().ok()).unwrap_or(1).max(1);
    let total = items.len();
    let total_pages = total.div_ceil(limit);
    let data = items.iter().skip((page - 1) * limit).take(limit).cloned().collect();
    (data, json!({"page": page, "limit": limit, "total": total, "totalPages": total_pages}))
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response()
}

impl MockBackend {
    pub fn seeded() -> Self {
        let data = MockData {
            categories: vec![
                json!({"id": "cat-1", "name": "Pizza"}),
                json!({"id": "cat-2", "name": "Sushi"}),
            ],
            providers: vec![json!({
                "id": "prov-1", "userId": "prov-user-1", "restaurantName": "Luigi's",
                "description": "Wood-fired pizza", "address": "1 Main St", "phone": "555-0100", "isOpen": true
            })],
            meals: vec![
                json!({
                    "id": "meal-1", "name": "Margherita", "description": "Tomato and basil", "price": 12.5,
                    "isAvailable": true, "categoryId": "cat-1", "category": {"id": "cat-1", "name": "Pizza"},
                    "providerId": "prov-1", "provider": {"id": "prov-1", "restaurantName": "Luigi's"},
                    "reviews": [{"id": "rev-1", "rating": 4, "comment": "Tasty", "customer": {"id": "cust-2", "name": "Robin"}}]
                }),
                json!({
                    "id": "meal-2", "name": "Salmon Roll", "description": "Fresh salmon", "price": 9.0,
                    "isAvailable": true, "categoryId": "cat-2", "category": {"id": "cat-2", "name": "Sushi"},
                    "providerId": "prov-1", "provider": {"id": "prov-1", "restaurantName": "Luigi's"},
                    "reviews": []
                }),
            ],
            orders: vec![json!({
                "id": "order-0001-abcd", "customerId": "cust-1", "customer": {"name": "Casey", "email": "casey@foodhub.test"},
                "providerId": "prov-1", "provider": {"id": "prov-1", "restaurantName": "Luigi's"},
                "deliveryAddress": "9 Side St", "paymentMethod": "COD", "totalPrice": 25.0, "status": "PENDING",
                "items": [{"id": "item-1", "mealId": "meal-1", "quantity": 2, "price": 12.5, "meal": {"name": "Margherita", "price": 12.5}}]
            })],
            users: vec![session_user("admin"), session_user("provider"), session_user("customer")],
            ..Default::default()
        };
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut MockData) -> R) -> R {
        let mut data = self.data.lock().unwrap();
        f(&mut data)
    }

    /// Requests whose `"METHOD /path"` starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.with(|d| d.requests.iter().filter(|r| r.starts_with(prefix)).count())
    }

    /// Serves the mock on an ephemeral port and returns its base URL.
    pub async fn serve(&self) -> String {
        let router = Router::new()
            .route("/auth/get-session", get(get_session))
            .route("/auth/sign-in/email", post(sign_in))
            .route("/auth/sign-out", post(sign_out))
            .route("/api/categories", get(list_categories).post(create_category))
            .route("/api/categories/{id}", get(get_category).patch(update_category))
            .route("/api/meals", get(list_meals))
            .route("/api/meals/{id}", get(get_meal).delete(delete_meal))
            .route("/api/providers", get(list_providers))
            .route("/api/reviews", post(create_review))
            .route("/api/orders", get(list_orders).post(create_order))
            .route("/api/orders/{id}", patch(update_order))
            .route("/api/orders/status/{id}", patch(update_order_status))
            .route("/api/users/profile", get(get_profile))
            .route("/api/users", get(list_users))
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }
}

async fn record(State(mock): State<MockBackend>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri().path());
    mock.with(|d| d.requests.push(line));
    next.run(request).await
}

async fn get_session(headers: HeaderMap) -> Json<Value> {
    match role_from(&headers) {
        Some(role) => Json(json!({"user": session_user(role), "session": {"id": "s-1"}})),
        None => Json(Value::Null),
    }
}

async fn sign_in(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if headers.get(ORIGIN).and_then(|o| o.to_str().ok()) != Some(STOREFRONT_URL) {
        return (StatusCode::FORBIDDEN, Json(json!({"message": "Invalid origin"}))).into_response();
    }
    let role = match body["email"].as_str() {
        Some("admin@foodhub.test") => "admin",
        Some("luigi@foodhub.test") => "provider",
        Some("casey@foodhub.test") => "customer",
        _ => return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid email or password"}))).into_response(),
    };
    (
        [(SET_COOKIE, format!("session={role}; Path=/; HttpOnly"))],
        Json(json!({"user": session_user(role)})),
    )
        .into_response()
}

async fn sign_out() -> Response {
    ([(SET_COOKIE, "session=; Path=/; Max-Age=0")], Json(json!({"success": true}))).into_response()
}

async fn list_categories(State(mock): State<MockBackend>) -> Json<Value> {
    Json(Value::Array(mock.with(|d| d.categories.clone())))
}

async fn get_category(State(mock): State<MockBackend>, Path(id): Path<String>) -> Response {
    mock.with(|d| {
        let Some(mut category) = d.categories.iter().find(|c| c["id"] == id.as_str()).cloned() else {
            return not_found();
        };
        let meals: Vec<Value> = d.meals.iter().filter(|m| m["categoryId"] == id.as_str()).cloned().collect();
        category["meals"] = Value::Array(meals);
        Json(category).into_response()
    })
}

async fn create_category(State(mock): State<MockBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if role_from(&headers) != Some("admin") {
        return StatusCode::FORBIDDEN.into_response();
    }
    mock.with(|d| {
        let category = json!({"id": d.next_id("cat"), "name": body["name"]});
        d.categories.push(category.clone());
        (StatusCode::CREATED, Json(category)).into_response()
    })
}

async fn update_category(
    State(mock): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    mock.with(|d| match d.categories.iter_mut().find(|c| c["id"] == id.as_str()) {
        Some(category) => {
            category["name"] = body["name"].clone();
            Json(category.clone()).into_response()
        }
        None => not_found(),
    })
}

async fn list_meals(State(mock): State<MockBackend>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    mock.with(|d| {
        let filtered: Vec<Value> = d
            .meals
            .iter()
            .filter(|m| query.get("providerId").is_none_or(|p| m["providerId"] == p.as_str()))
            .cloned()
            .collect();
        let (data, meta) = paginate(&filtered, &query);
        Json(json!({"data": data, "meta": meta}))
    })
}

async fn get_meal(State(mock): State<MockBackend>, Path(id): Path<String>) -> Response {
    mock.with(|d| match d.meals.iter().find(|m| m["id"] == id.as_str()) {
        Some(meal) => Json(json!({"data": meal})).into_response(),
        None => not_found(),
    })
}

async fn delete_meal(State(mock): State<MockBackend>, Path(id): Path<String>) -> Response {
    mock.with(|d| {
        let before = d.meals.len();
        d.meals.retain(|m| m["id"] != id.as_str());
        if d.meals.len() == before {
            not_found()
        } else {
            Json(json!({"success": true})).into_response()
        }
    })
}

async fn list_providers(State(mock): State<MockBackend>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    mock.with(|d| {
        let (data, meta) = paginate(&d.providers, &query);
        Json(json!({"data": data, "meta": meta}))
    })
}

async fn create_review(State(mock): State<MockBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let Some(role) = role_from(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let author = session_user(role);
    mock.with(|d| {
        let review = json!({
            "id": d.next_id("rev"),
            "rating": body["rating"],
            "comment": body["comment"],
            "customer": {"id": author["id"], "name": author["name"]}
        });
        let Some(meal) = d.meals.iter_mut().find(|m| m["id"] == body["mealId"]) else {
            return not_found();
        };
        if let Some(reviews) = meal["reviews"].as_array_mut() {
            reviews.push(review.clone());
        }
        (StatusCode::CREATED, Json(review)).into_response()
    })
}

async fn list_orders(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if role_from(&headers).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    mock.with(|d| {
        let (orders, meta) = paginate(&d.orders, &query);
        Json(json!({"orders": orders, "meta": meta})).into_response()
    })
}

async fn create_order(State(mock): State<MockBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if role_from(&headers) != Some("customer") {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    mock.with(|d| {
        if let Some(status) = d.order_failure {
            let status = StatusCode::from_u16(status).unwrap();
            return (status, Json(json!({"message": "Session expired"}))).into_response();
        }
        let mut order = body.clone();
        order["id"] = json!(d.next_id("order"));
        order["status"] = json!("PENDING");
        d.orders.push(order.clone());
        (StatusCode::CREATED, Json(order)).into_response()
    })
}

async fn update_order(
    State(mock): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    mock.with(|d| {
        let Some(order) = d.orders.iter_mut().find(|o| o["id"] == id.as_str()) else {
            return not_found();
        };
        for line in body["items"].as_array().into_iter().flatten() {
            let items = order["items"].as_array_mut().into_iter().flatten();
            for item in items.filter(|i| i["mealId"] == line["mealId"]) {
                item["quantity"] = line["quantity"].clone();
            }
        }
        if !body["totalPrice"].is_null() {
            order["totalPrice"] = body["totalPrice"].clone();
        }
        Json(order.clone()).into_response()
    })
}

async fn update_order_status(
    State(mock): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    mock.with(|d| match d.orders.iter_mut().find(|o| o["id"] == id.as_str()) {
        Some(order) => {
            order["status"] = body["status"].clone();
            Json(order.clone()).into_response()
        }
        None => not_found(),
    })
}

async fn get_profile(headers: HeaderMap) -> Response {
    match role_from(&headers) {
        Some(role) => {
            let mut profile = session_user(role);
            if role == "provider" {
                profile["providerProfile"] = json!({"id": "prov-1", "restaurantName": "Luigi's", "isOpen": true});
            }
            Json(json!({"data": profile})).into_response()
        }
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn list_users(State(mock): State<MockBackend>, headers: HeaderMap) -> Response {
    if role_from(&headers) != Some("admin") {
        return StatusCode::FORBIDDEN.into_response();
    }
    Json(json!({"data": mock.with(|d| d.users.clone())})).into_response()
}

// ---
// Storefront wiring
// ---

const STOREFRONT_URL: &str = "http://localhost:3000";

/// Settings pointing at a mock served on `backend_url`, cached reads kept until invalidated.
pub fn settings_for(backend_url: &str) -> Settings {
    Settings {
        api_url: backend_url.to_string(),
        auth_url: format!("{backend_url}/auth"),
        frontend_api: STOREFRONT_URL.to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        revalidate: None,
    }
}

pub async fn state_for(mock: &MockBackend) -> AppState {
    let url = mock.serve().await;
    AppState::new(settings_for(&url)).unwrap()
}

/// Serves the whole storefront against `mock` and returns its base URL.
pub async fn spawn_app(mock: &MockBackend) -> String {
    let state = state_for(mock).await;
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, crate::app(state)).await.unwrap();
    });
    format!("http://{addr}")
}

/// Browser-like client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
