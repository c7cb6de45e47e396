//! Cliente HTTP para la API de recogidas
//!
//! Este módulo contiene el cliente HTTP de la API remota: autenticación,
//! CRUD de solicitudes, cambio de estado y CRUD de conductores.

use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::service_dto::{ByDateQuery, UpdateServiceStatusRequest};
use crate::models::auth::Session;
use crate::models::driver::{Driver, DriverForm, DriverId};
use crate::models::service_request::{ServiceRequest, ServiceRequestId, ServiceRequestPayload};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::bearer_header;

const EMPLOYEE_HEADER: &str = "empname";
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Cliente HTTP para la API de recogidas
#[derive(Clone)]
pub struct PickupApiClient {
    client: Client,
    base_url: String,
    send_employee_header: bool,
}

impl PickupApiClient {
    /// Crear nuevo cliente HTTP con la URL configurada
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            send_employee_header: config.send_employee_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request con Authorization (y `empname` si está activo)
    fn authorized(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header(reqwest::header::AUTHORIZATION, bearer_header(&session.token));
        if self.send_employee_header {
            builder = builder.header(EMPLOYEE_HEADER, session.employee_name.as_str());
        }
        builder
    }

    async fn execute(&self, builder: RequestBuilder, operation: &'static str) -> AppResult<Response> {
        let request_id = Uuid::new_v4();
        let span = info_span!("api_call", %request_id, operation);

        async move {
            let response = builder
                .header(REQUEST_ID_HEADER, request_id.to_string())
                .send()
                .await
                .map_err(|e| {
                    error!("❌ Error de red en {}: {}", operation, e);
                    AppError::Http(e)
                })?;

            let status = response.status();
            debug!("📡 {} -> {}", operation, status);
            if status.is_success() {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, operation, body))
        }
        .instrument(span)
        .await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &'static str,
    ) -> AppResult<T> {
        let response = self.execute(builder, operation).await?;
        response.json::<T>().await.map_err(|e| {
            error!("❌ Respuesta ilegible en {}: {}", operation, e);
            AppError::Http(e)
        })
    }

    async fn send_empty(&self, builder: RequestBuilder, operation: &'static str) -> AppResult<()> {
        self.execute(builder, operation).await.map(|_| ())
    }

    /// POST /auth/login
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let builder = self.client.post(self.url("auth/login")).json(request);
        match self.send_json(builder, "login").await {
            Ok(response) => Ok(response),
            Err(AppError::Unauthorized(_))
            | Err(AppError::Forbidden(_))
            | Err(AppError::ExternalApi { status: 400, .. }) => {
                warn!("🔒 Credenciales inválidas para '{}'", request.username);
                Err(AppError::InvalidCredentials)
            }
            Err(e) => Err(e),
        }
    }

    /// POST /services
    pub async fn create_service(
        &self,
        session: &Session,
        payload: &ServiceRequestPayload,
    ) -> AppResult<ServiceRequest> {
        let builder = self.authorized(Method::POST, "services", session).json(payload);
        self.send_json(builder, "create_service").await
    }

    /// PUT /services/{id}
    pub async fn update_service(
        &self,
        session: &Session,
        id: ServiceRequestId,
        payload: &ServiceRequestPayload,
    ) -> AppResult<ServiceRequest> {
        let builder = self
            .authorized(Method::PUT, &format!("services/{}", id), session)
            .json(payload);
        self.send_json(builder, "update_service").await
    }

    /// DELETE /services/{id}
    pub async fn delete_service(&self, session: &Session, id: ServiceRequestId) -> AppResult<()> {
        let builder = self.authorized(Method::DELETE, &format!("services/{}", id), session);
        self.send_empty(builder, "delete_service").await
    }

    /// GET /services/recent
    pub async fn recent_services(&self, session: &Session) -> AppResult<Vec<ServiceRequest>> {
        let builder = self.authorized(Method::GET, "services/recent", session);
        self.send_json(builder, "recent_services").await
    }

    /// GET /services/by-date?date=YYYY-MM-DD
    pub async fn services_by_date(
        &self,
        session: &Session,
        date: NaiveDate,
    ) -> AppResult<Vec<ServiceRequest>> {
        let query = ByDateQuery { date: date.format("%Y-%m-%d").to_string() };
        let builder = self
            .authorized(Method::GET, "services/by-date", session)
            .query(&query);
        self.send_json(builder, "services_by_date").await
    }

    /// PUT /admin/update-service-status
    pub async fn update_service_status(
        &self,
        session: &Session,
        request: &UpdateServiceStatusRequest,
    ) -> AppResult<ServiceRequest> {
        let builder = self
            .authorized(Method::PUT, "admin/update-service-status", session)
            .json(request);
        self.send_json(builder, "update_service_status").await
    }

    /// GET /drivers
    pub async fn list_drivers(&self, session: &Session) -> AppResult<Vec<Driver>> {
        let builder = self.authorized(Method::GET, "drivers", session);
        self.send_json(builder, "list_drivers").await
    }

    /// POST /drivers
    pub async fn create_driver(&self, session: &Session, form: &DriverForm) -> AppResult<Driver> {
        let builder = self.authorized(Method::POST, "drivers", session).json(form);
        self.send_json(builder, "create_driver").await
    }

    /// PUT /drivers/{id}
    pub async fn update_driver(
        &self,
        session: &Session,
        id: DriverId,
        form: &DriverForm,
    ) -> AppResult<Driver> {
        let builder = self
            .authorized(Method::PUT, &format!("drivers/{}", id), session)
            .json(form);
        self.send_json(builder, "update_driver").await
    }

    /// DELETE /drivers/{id}
    pub async fn delete_driver(&self, session: &Session, id: DriverId) -> AppResult<()> {
        let builder = self.authorized(Method::DELETE, &format!("drivers/{}", id), session);
        self.send_empty(builder, "delete_driver").await
    }
}

fn map_status_error(status: StatusCode, operation: &str, body: String) -> AppError {
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        body
    };

    match status {
        StatusCode::UNAUTHORIZED => {
            warn!("🔒 Token rechazado en {}", operation);
            AppError::Unauthorized(message)
        }
        StatusCode::FORBIDDEN => {
            warn!("⛔ Acceso denegado en {}", operation);
            AppError::Forbidden(message)
        }
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => {
            error!("❌ Error HTTP {} en {}: {}", status, operation, message);
            AppError::ExternalApi { status: status.as_u16(), message }
        }
    }
}
