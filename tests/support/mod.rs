//! API remota simulada con axum para los tests de integración

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Deserialize;
use serde_json::{json, Value};
use tempfile::TempDir;

use pickup_console::config::environment::EnvironmentConfig;
use pickup_console::dto::auth_dto::LoginForm;
use pickup_console::models::auth::Session;
use pickup_console::models::driver::DriverForm;
use pickup_console::models::service_request::{ServiceRequestForm, ServiceType};
use pickup_console::services::auth_service::AuthService;
use pickup_console::services::status_policy::TransitionMode;
use pickup_console::state::AppState;

const TIMESTAMP: &str = "2030-01-01T09:00:00";

#[derive(Default)]
pub struct Backend {
    users: HashMap<String, (String, Vec<String>)>,
    tokens: HashMap<String, Vec<String>>,
    services: Vec<Value>,
    drivers: Vec<Value>,
    next_service_id: i64,
    next_driver_id: i64,
    /// Nombre de cada endpoint llamado, en orden
    pub calls: Vec<&'static str>,
    pub last_employee_header: Option<String>,
    pub last_request_id: Option<String>,
    /// Mientras esté activo, los listados devuelven 500
    pub fail_lists: bool,
}

impl Backend {
    fn with_users() -> Self {
        let mut backend = Backend::default();
        for (user, pass, role) in [
            ("admin", "admin123", "ROLE_ADMIN"),
            ("ops", "ops123", "ROLE_SC_OPS"),
            ("viewer", "viewer123", "ROLE_VIEWER"),
        ] {
            backend
                .users
                .insert(user.to_string(), (pass.to_string(), vec![role.to_string()]));
        }
        backend
    }

    /// Roles del token del header Authorization
    fn authorize(&mut self, headers: &HeaderMap) -> Result<Vec<String>, StatusCode> {
        self.last_employee_header = headers
            .get("empname")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.last_request_id = headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(StatusCode::UNAUTHORIZED)?;
        self.tokens.get(token).cloned().ok_or(StatusCode::UNAUTHORIZED)
    }

    fn service_index(&self, id: i64) -> Result<usize, StatusCode> {
        self.services
            .iter()
            .position(|s| s["id"] == json!(id))
            .ok_or(StatusCode::NOT_FOUND)
    }

    fn driver_index(&self, id: i64) -> Result<usize, StatusCode> {
        self.drivers
            .iter()
            .position(|d| d["id"] == json!(id))
            .ok_or(StatusCode::NOT_FOUND)
    }
}

type Shared = Arc<Mutex<Backend>>;

pub struct FakeApi {
    pub base_url: String,
    pub backend: Shared,
}

impl FakeApi {
    pub async fn start() -> Self {
        let backend: Shared = Arc::new(Mutex::new(Backend::with_users()));

        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/services", post(create_service))
            .route("/services/recent", get(recent_services))
            .route("/services/by-date", get(services_by_date))
            .route("/services/:id", put(update_service).delete(delete_service))
            .route("/admin/update-service-status", put(update_status))
            .route("/drivers", get(list_drivers).post(create_driver))
            .route("/drivers/:id", put(update_driver).delete(delete_driver));
        let app = Router::new().nest("/api", api).with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeApi {
            base_url: format!("http://{}/api", addr),
            backend,
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.backend.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.backend.lock().unwrap().calls.iter().filter(|c| **c == name).count()
    }

    pub fn set_fail_lists(&self, fail: bool) {
        self.backend.lock().unwrap().fail_lists = fail;
    }

    /// Invalida todos los tokens emitidos (sesión expirada)
    pub fn revoke_tokens(&self) {
        self.backend.lock().unwrap().tokens.clear();
    }

    pub fn last_employee_header(&self) -> Option<String> {
        self.backend.lock().unwrap().last_employee_header.clone()
    }

    pub fn last_request_id(&self) -> Option<String> {
        self.backend.lock().unwrap().last_request_id.clone()
    }

    /// Inserta una solicitud directamente, como si la hubiera creado otro usuario
    pub fn seed_service(&self, mut service: Value) -> i64 {
        let mut b = self.backend.lock().unwrap();
        b.next_service_id += 1;
        let id = b.next_service_id;
        service["id"] = json!(id);
        b.services.push(service);
        id
    }

    pub fn seed_driver(&self, name: &str) -> i64 {
        let mut b = self.backend.lock().unwrap();
        b.next_driver_id += 1;
        let id = b.next_driver_id;
        b.drivers.push(json!({
            "id": id,
            "name": name,
            "phoneNumber": "9876500000",
            "licenseNumber": format!("DL-{}", id),
            "address": "Depot 1"
        }));
        id
    }

    pub fn service(&self, id: i64) -> Option<Value> {
        let b = self.backend.lock().unwrap();
        b.services.iter().find(|s| s["id"] == json!(id)).cloned()
    }

    pub fn config(&self, dir: &TempDir) -> EnvironmentConfig {
        EnvironmentConfig {
            api_base_url: self.base_url.clone(),
            store_path: dir.path().join("store.json"),
            ..Default::default()
        }
    }

    pub fn state(&self, dir: &TempDir) -> AppState {
        AppState::new(self.config(dir)).unwrap()
    }

    pub fn strict_state(&self, dir: &TempDir) -> AppState {
        let config = EnvironmentConfig {
            transition_mode: TransitionMode::Strict,
            ..self.config(dir)
        };
        AppState::new(config).unwrap()
    }
}

pub async fn login_as(state: &AppState, username: &str, password: &str) -> Session {
    let form = LoginForm {
        username: username.to_string(),
        password: password.to_string(),
        employee_name: "Front Desk".to_string(),
    };
    AuthService::new(state).login(&form).await.unwrap()
}

pub fn valid_form() -> ServiceRequestForm {
    ServiceRequestForm {
        customer_name: "Asha Rao".to_string(),
        customer_phone_number: "9876543210".to_string(),
        customer_email: Some("asha@example.com".to_string()),
        vehicle_number: "KA01AB1234".to_string(),
        vehicle_model: Some("Octavia".to_string()),
        service_type: ServiceType::PickupFromCustomerLocation,
        service_location: "12 MG Road, Bengaluru 560001".to_string(),
        pickup_time: Some("2099-06-15T10:30".to_string()),
        created_by: None,
    }
}

pub fn seeded_service(status: &str, pickup_time: &str) -> Value {
    json!({
        "customerName": "Ravi Kumar",
        "customerPhoneNumber": "+91 9123456789",
        "vehicleNumber": "MH12XY9876",
        "vehicleBrand": "Skoda",
        "serviceType": "DROP_TO_CUSTOMER_LOCATION",
        "serviceLocation": "Flat 4B, Palm Residency, Pune",
        "pickupTime": pickup_time,
        "status": status,
        "driver": null,
        "createdBy": "someone",
        "createdByName": "Other Desk"
    })
}

pub fn driver_form(name: &str) -> DriverForm {
    DriverForm {
        name: name.to_string(),
        phone_number: "9876501234".to_string(),
        license_number: "KA-0120230001".to_string(),
        address: "Depot 2, Bengaluru".to_string(),
        other_details: None,
    }
}

// ---- handlers ----

async fn login(State(b): State<Shared>, Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("login");

    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();
    let roles = match b.users.get(&username) {
        Some((expected, roles)) if expected == password => roles.clone(),
        _ => return Err(StatusCode::UNAUTHORIZED),
    };

    let claims = json!({ "sub": username, "exp": 4_102_444_800u64 });
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret"))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    b.tokens.insert(token.clone(), roles.clone());

    Ok(Json(json!({ "jwt": token, "roles": roles })))
}

async fn create_service(
    State(b): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("create_service");
    b.authorize(&headers)?;

    b.next_service_id += 1;
    body["id"] = json!(b.next_service_id);
    body["status"] = json!("PENDING");
    body["driver"] = Value::Null;
    body["createdAt"] = json!(TIMESTAMP);
    body["lastUpdatedAt"] = json!(TIMESTAMP);
    b.services.push(body.clone());
    Ok(Json(body))
}

async fn update_service(
    State(b): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("update_service");
    b.authorize(&headers)?;

    let index = b.service_index(id)?;
    let existing = b.services[index].clone();
    body["id"] = json!(id);
    if body.get("status").is_none() {
        body["status"] = existing["status"].clone();
    }
    body["driver"] = existing["driver"].clone();
    body["createdAt"] = existing["createdAt"].clone();
    body["lastUpdatedAt"] = json!("2030-01-02T09:00:00");
    b.services[index] = body.clone();
    Ok(Json(body))
}

async fn delete_service(
    State(b): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("delete_service");
    b.authorize(&headers)?;

    let index = b.service_index(id)?;
    b.services.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

async fn recent_services(State(b): State<Shared>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("recent_services");
    b.authorize(&headers)?;
    if b.fail_lists {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(Value::Array(b.services.clone())))
}

#[derive(Deserialize)]
struct DateQuery {
    date: String,
}

async fn services_by_date(
    State(b): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("services_by_date");
    b.authorize(&headers)?;
    if b.fail_lists {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let items = b
        .services
        .iter()
        .filter(|s| {
            s["pickupTime"]
                .as_str()
                .map(|t| t.starts_with(&query.date))
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    Ok(Json(Value::Array(items)))
}

async fn update_status(
    State(b): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("update_status");
    let roles = b.authorize(&headers)?;
    if !roles.iter().any(|r| r == "ROLE_ADMIN") {
        return Err(StatusCode::FORBIDDEN);
    }

    let id = body["serviceRequestId"].as_i64().ok_or(StatusCode::BAD_REQUEST)?;
    let index = b.service_index(id)?;
    let driver = match body["driverId"].as_i64() {
        Some(driver_id) => {
            let d = b.driver_index(driver_id).map_err(|_| StatusCode::BAD_REQUEST)?;
            b.drivers[d].clone()
        }
        None => Value::Null,
    };

    let service = &mut b.services[index];
    service["status"] = body["status"].clone();
    if !driver.is_null() {
        service["driver"] = driver;
    }
    Ok(Json(service.clone()))
}

async fn list_drivers(State(b): State<Shared>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("list_drivers");
    b.authorize(&headers)?;
    Ok(Json(Value::Array(b.drivers.clone())))
}

async fn create_driver(
    State(b): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("create_driver");
    b.authorize(&headers)?;

    b.next_driver_id += 1;
    body["id"] = json!(b.next_driver_id);
    body["createdAt"] = json!(TIMESTAMP);
    b.drivers.push(body.clone());
    Ok(Json(body))
}

async fn update_driver(
    State(b): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("update_driver");
    b.authorize(&headers)?;

    let index = b.driver_index(id)?;
    body["id"] = json!(id);
    body["createdAt"] = b.drivers[index]["createdAt"].clone();
    b.drivers[index] = body.clone();
    Ok(Json(body))
}

async fn delete_driver(
    State(b): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut b = b.lock().unwrap();
    b.calls.push("delete_driver");
    b.authorize(&headers)?;

    let index = b.driver_index(id)?;
    b.drivers.remove(index);
    Ok(StatusCode::NO_CONTENT)
}
