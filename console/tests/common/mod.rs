//! In-process fake of the clinic backend for integration tests.
//!
//! Serves the subset of the REST contract the console uses, keeps its data in
//! memory, and records every request it receives as `"METHOD /path"`.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use clinic_console::app::{App, AppEvent, RecordingView};
use clinic_console::config::ConsoleConfig;
use clinic_console::services::{ApiClient, SessionHandle, TokenStorage};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";
pub const PASSWORD: &str = "secret";
const STAMP: &str = "2024-01-01T09:00:00";

pub struct Store {
    pub patients: Vec<Value>,
    pub appointments: Vec<Value>,
    pub records: Vec<Value>,
    pub users: Vec<Value>,
    pub departments: Vec<Value>,
    pub roles: Vec<Value>,
    pub permissions: Vec<Value>,
    next_id: i64,
    /// Login answers without `access_token` when false
    pub issue_token: bool,
    /// Every authenticated route answers 401 when false
    pub token_valid: bool,
    /// `my-permissions` answers 500 when true
    pub permissions_broken: bool,
    pub requests: Vec<String>,
}

pub type Shared = Arc<Mutex<Store>>;

fn role(id: i64, name: &str) -> Value {
    json!({ "id": id, "name": name, "priority": 10, "created_at": STAMP })
}

fn permission(id: i64, resource: &str, action: &str) -> Value {
    json!({
        "id": id,
        "name": format!("{}:{}", resource, action),
        "description": format!("{} {}", action, resource),
        "resource": resource,
        "action": action,
        "created_at": STAMP
    })
}

fn user(id: i64, username: &str, full_name: &str, role: Value) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@clinic.test", username),
        "full_name": full_name,
        "is_active": true,
        "created_at": STAMP,
        "roles": [role]
    })
}

fn patient(id: i64, first: &str, last: &str, phone: &str, email: Value) -> Value {
    json!({
        "id": id,
        "first_name": first,
        "last_name": last,
        "birth_date": "1990-05-01",
        "phone": phone,
        "email": email,
        "is_active": true,
        "created_at": STAMP,
        "updated_at": STAMP
    })
}

fn appointment(id: i64, date: &str, status: &str) -> Value {
    json!({
        "id": id,
        "patient_id": 1,
        "doctor_id": 2,
        "appointment_date": date,
        "appointment_time": "10:00:00",
        "duration_minutes": 30,
        "reason": "Огляд",
        "status": status,
        "created_at": STAMP,
        "updated_at": STAMP
    })
}

impl Store {
    fn seeded() -> Self {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        Self {
            patients: vec![
                patient(1, "Іван", "Петренко", "+380501112233", json!("ivan@example.com")),
                patient(2, "Олена", "Коваль", "+380671234567", Value::Null),
            ],
            appointments: vec![
                appointment(1, &today, "scheduled"),
                appointment(2, "2024-01-02", "completed"),
            ],
            records: vec![json!({
                "id": 1,
                "patient_id": 1,
                "doctor_id": 2,
                "diagnosis": "ГРВІ",
                "treatment": "Постільний режим",
                "is_confidential": false,
                "visit_date": STAMP,
                "created_at": STAMP,
                "updated_at": STAMP
            })],
            users: vec![
                user(1, "admin", "Адмін Системи", role(1, "Адміністратор")),
                user(2, "doctor", "Лікаренко Петро", role(2, "Лікар")),
            ],
            departments: vec![json!({
                "id": 1,
                "name": "Терапія",
                "is_active": true,
                "created_at": STAMP
            })],
            roles: vec![{
                let mut r = role(1, "Адміністратор");
                r["permissions"] = json!([permission(1, "patients", "read")]);
                r
            }],
            permissions: vec![
                permission(1, "patients", "read"),
                permission(2, "patients", "write"),
            ],
            next_id: 100,
            issue_token: true,
            token_valid: true,
            permissions_broken: false,
            requests: Vec::new(),
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

/// Record the request and check the bearer token
fn guard(store: &mut Store, headers: &HeaderMap, label: String) -> Result<(), Response> {
    store.requests.push(label);
    let expected = format!("Bearer {}", TOKEN);
    let presented = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if store.token_valid && presented == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }
}

fn listing(store: &Shared, headers: &HeaderMap, label: &str, pick: fn(&Store) -> &Vec<Value>) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, headers, label.to_string()) {
        return r;
    }
    Json(Value::from(pick(&s).clone())).into_response()
}

fn find(items: &[Value], id: i64) -> Option<usize> {
    items.iter().position(|v| v["id"] == json!(id))
}

async fn login(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = store.lock();
    s.requests.push("POST /auth/login".to_string());
    if body["password"] != json!(PASSWORD) {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect username or password");
    }
    if !s.issue_token {
        return Json(json!({ "token_type": "bearer" })).into_response();
    }
    Json(json!({ "access_token": TOKEN, "token_type": "bearer" })).into_response()
}

async fn me(State(store): State<Shared>, headers: HeaderMap) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, "GET /auth/me".to_string()) {
        return r;
    }
    Json(s.users[0].clone()).into_response()
}

async fn list_patients(State(store): State<Shared>, headers: HeaderMap) -> Response {
    listing(&store, &headers, "GET /patients", |s| &s.patients)
}

async fn get_patient(State(store): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, format!("GET /patients/{}", id)) {
        return r;
    }
    match find(&s.patients, id) {
        Some(i) => Json(s.patients[i].clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Patient not found"),
    }
}

async fn create_patient(
    State(store): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, "POST /patients".to_string()) {
        return r;
    }
    if s.patients.iter().any(|p| p["phone"] == body["phone"]) {
        return detail(StatusCode::BAD_REQUEST, "Patient with this phone already exists");
    }
    let id = s.next_id();
    body["id"] = json!(id);
    body["is_active"] = json!(true);
    body["created_at"] = json!(STAMP);
    body["updated_at"] = json!(STAMP);
    s.patients.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_patient(
    State(store): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, format!("PUT /patients/{}", id)) {
        return r;
    }
    let Some(i) = find(&s.patients, id) else {
        return detail(StatusCode::NOT_FOUND, "Patient not found");
    };
    if let Some(fields) = body.as_object() {
        for (key, value) in fields {
            s.patients[i][key.as_str()] = value.clone();
        }
    }
    Json(s.patients[i].clone()).into_response()
}

async fn delete_patient(State(store): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, format!("DELETE /patients/{}", id)) {
        return r;
    }
    match find(&s.patients, id) {
        Some(i) => {
            s.patients.remove(i);
            StatusCode::NO_CONTENT.into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Patient not found"),
    }
}

async fn list_appointments(State(store): State<Shared>, headers: HeaderMap) -> Response {
    listing(&store, &headers, "GET /appointments", |s| &s.appointments)
}

async fn update_appointment(
    State(store): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, format!("PUT /appointments/{}", id)) {
        return r;
    }
    let Some(i) = find(&s.appointments, id) else {
        return detail(StatusCode::NOT_FOUND, "Appointment not found");
    };
    if let Some(fields) = body.as_object() {
        for (key, value) in fields {
            s.appointments[i][key.as_str()] = value.clone();
        }
    }
    Json(s.appointments[i].clone()).into_response()
}

/// Marks the appointment cancelled and acknowledges, like the real backend
async fn delete_appointment(State(store): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, format!("DELETE /appointments/{}", id)) {
        return r;
    }
    match find(&s.appointments, id) {
        Some(i) => {
            s.appointments[i]["status"] = json!("cancelled");
            Json(json!({ "message": "Appointment cancelled" })).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Appointment not found"),
    }
}

async fn list_records(State(store): State<Shared>, headers: HeaderMap) -> Response {
    listing(&store, &headers, "GET /medical-records", |s| &s.records)
}

async fn delete_record(State(store): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, format!("DELETE /medical-records/{}", id)) {
        return r;
    }
    match find(&s.records, id) {
        Some(i) => {
            s.records.remove(i);
            Json(json!({ "message": "Medical record deleted" })).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Record not found"),
    }
}

async fn list_users(State(store): State<Shared>, headers: HeaderMap) -> Response {
    listing(&store, &headers, "GET /users", |s| &s.users)
}

async fn create_user(
    State(store): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, "POST /users".to_string()) {
        return r;
    }
    let id = s.next_id();
    if let Some(fields) = body.as_object_mut() {
        fields.remove("password");
    }
    body["id"] = json!(id);
    body["is_active"] = json!(true);
    body["created_at"] = json!(STAMP);
    body["roles"] = json!([]);
    s.users.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn assign_role(
    State(store): State<Shared>,
    headers: HeaderMap,
    Path((id, role_id)): Path<(i64, i64)>,
) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, format!("POST /users/{}/roles/{}", id, role_id)) {
        return r;
    }
    let Some(i) = find(&s.users, id) else {
        return detail(StatusCode::NOT_FOUND, "User not found");
    };
    let name = if role_id == 2 { "Лікар" } else { "Адміністратор" };
    if let Some(roles) = s.users[i]["roles"].as_array_mut() {
        roles.push(role(role_id, name));
    }
    Json(json!({ "message": "Role assigned" })).into_response()
}

/// User 1 is the logged-in admin and cannot delete itself
async fn delete_user(State(store): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, format!("DELETE /users/{}", id)) {
        return r;
    }
    if id == 1 {
        return detail(StatusCode::BAD_REQUEST, "Cannot delete your own account");
    }
    match find(&s.users, id) {
        Some(i) => {
            s.users.remove(i);
            Json(json!({ "message": "User deleted" })).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn list_departments(State(store): State<Shared>, headers: HeaderMap) -> Response {
    listing(&store, &headers, "GET /departments", |s| &s.departments)
}

/// Answers with an acknowledgement body rather than 204
async fn delete_department(State(store): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut s = store.lock();
    if let Err(r) = guard(&mut s, &headers, format!("DELETE /departments/{}", id)) {
        return r;
    }
    match find(&s.departments, id) {
        Some(i) => {
            s.departments.remove(i);
            Json(json!({ "message": "Department deleted" })).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Department not found"),
    }
}

async fn list_roles(State(store): State<Shared>, headers: HeaderMap) -> Response {
    listing(&store, &headers, "GET /rbac/roles", |s| &s.roles)
}

async fn list_permissions(State(store): State<Shared>, headers: HeaderMap) -> Response {
    listing(&store, &headers, "GET /rbac/permissions", |s| &s.permissions)
}

async fn my_permissions(State(store): State<Shared>, headers: HeaderMap) -> Response {
    {
        let mut s = store.lock();
        if s.permissions_broken {
            s.requests.push("GET /rbac/my-permissions".to_string());
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }
    listing(&store, &headers, "GET /rbac/my-permissions", |s| &s.permissions)
}

/// 500 with no body
async fn broken() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// 200 with a literal JSON `null` body
async fn null_body() -> Response {
    Json(Value::Null).into_response()
}

async fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

fn router(store: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/me", get(me))
        .route("/api/patients", get(list_patients).post(create_patient))
        .route(
            "/api/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/api/appointments", get(list_appointments))
        .route(
            "/api/appointments/:id",
            axum::routing::put(update_appointment).delete(delete_appointment),
        )
        .route("/api/medical-records", get(list_records))
        .route("/api/medical-records/:id", axum::routing::delete(delete_record))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/:id/roles/:role_id", axum::routing::post(assign_role))
        .route("/api/users/:id", axum::routing::delete(delete_user))
        .route("/api/departments", get(list_departments))
        .route("/api/departments/:id", axum::routing::delete(delete_department))
        .route("/api/rbac/roles", get(list_roles))
        .route("/api/rbac/permissions", get(list_permissions))
        .route("/api/rbac/my-permissions", get(my_permissions))
        .route("/api/broken", get(broken))
        .route("/api/null", get(null_body))
        .route("/api/empty", get(no_content))
        .with_state(store)
}

pub struct FakeBackend {
    pub base_url: String,
    pub store: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let store: Shared = Arc::new(Mutex::new(Store::seeded()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(store.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{}/api", addr),
            store,
        }
    }

    pub fn config(&self) -> ConsoleConfig {
        ConsoleConfig {
            api_url: self.base_url.clone(),
            history_file: None,
            ..Default::default()
        }
    }

    /// Client over `storage`, plus the receiving end of its event channel
    pub fn client(&self, storage: Arc<dyn TokenStorage>) -> (ApiClient, async_channel::Receiver<AppEvent>) {
        let (tx, rx) = async_channel::unbounded();
        let client = ApiClient::new(&self.config(), SessionHandle::new(storage))
            .unwrap()
            .with_events(tx);
        (client, rx)
    }

    pub fn app(&self, storage: Arc<dyn TokenStorage>, view: RecordingView) -> App {
        let (client, rx) = self.client(storage);
        App::new(Arc::new(client), Box::new(view), rx)
    }

    pub fn requests(&self) -> Vec<String> {
        self.store.lock().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.store.lock().requests.clear();
    }

    /// Make every later authenticated request answer 401
    pub fn expire_tokens(&self) {
        self.store.lock().token_valid = false;
    }
}
