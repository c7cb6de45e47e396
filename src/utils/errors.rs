//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores de la consola y su
//! traducción a mensajes para el usuario.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::models::status::RequestStatus;

/// Campos del formulario de una solicitud de servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    CustomerName,
    CustomerPhoneNumber,
    CustomerEmail,
    VehicleNumber,
    VehicleModel,
    ServiceLocation,
    PickupTime,
    DriverName,
    DriverLicenseNumber,
    EmployeeName,
    Username,
    Password,
}

impl FormField {
    /// Nombre del campo tal como viaja en el JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::CustomerName => "customerName",
            FormField::CustomerPhoneNumber => "customerPhoneNumber",
            FormField::CustomerEmail => "customerEmail",
            FormField::VehicleNumber => "vehicleNumber",
            FormField::VehicleModel => "vehicleModel",
            FormField::ServiceLocation => "serviceLocation",
            FormField::PickupTime => "pickupTime",
            FormField::DriverName => "name",
            FormField::DriverLicenseNumber => "licenseNumber",
            FormField::EmployeeName => "employeeName",
            FormField::Username => "username",
            FormField::Password => "password",
        }
    }

    /// Mapea la clave que produce `validator` (nombre del campo Rust)
    pub fn from_validator_key(key: &str) -> Option<Self> {
        match key {
            "customer_name" => Some(FormField::CustomerName),
            "customer_phone_number" => Some(FormField::CustomerPhoneNumber),
            "customer_email" => Some(FormField::CustomerEmail),
            "vehicle_number" => Some(FormField::VehicleNumber),
            "vehicle_model" => Some(FormField::VehicleModel),
            "service_location" => Some(FormField::ServiceLocation),
            "pickup_time" => Some(FormField::PickupTime),
            "name" => Some(FormField::DriverName),
            "license_number" => Some(FormField::DriverLicenseNumber),
            "employee_name" => Some(FormField::EmployeeName),
            "username" => Some(FormField::Username),
            "password" => Some(FormField::Password),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores de validación por campo (vacío ⇒ formulario válido)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Convierte el resultado de `validator` en mensajes por campo
    pub fn from_validation(errors: &validator::ValidationErrors) -> Self {
        let mut result = Self::new();
        for (key, field_errors) in errors.field_errors() {
            let Some(field) = FormField::from_validator_key(key) else {
                continue;
            };
            if let Some(message) = field_errors.iter().find_map(|e| e.message.as_ref()) {
                result.insert(field, message.to_string());
            } else {
                result.insert(field, format!("Invalid value for {}.", field));
            }
        }
        result
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("driver required for this status ({0})")]
    DriverRequired(RequestStatus),

    #[error("Transition not allowed: {from} -> {to}")]
    TransitionNotAllowed { from: RequestStatus, to: RequestStatus },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("External API error ({status}): {message}")]
    ExternalApi { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(FieldErrors::from_validation(&errors))
    }
}

impl AppError {
    /// Mensaje mostrado al usuario final
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Please correct the errors above.".to_string(),
            AppError::DriverRequired(_) => "Please select a driver for this status.".to_string(),
            AppError::TransitionNotAllowed { from, to } => {
                format!("Status cannot change from {} to {}.", from, to)
            }
            AppError::InvalidCredentials => "Invalid username or password".to_string(),
            AppError::NotAuthenticated => "Please log in to continue.".to_string(),
            AppError::Unauthorized(_) | AppError::Jwt(_) => {
                "Your session is no longer valid. Please log in again.".to_string()
            }
            AppError::Forbidden(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::ExternalApi { .. } | AppError::Http(_) => {
                "Something went wrong while contacting the server. Please try again.".to_string()
            }
            AppError::Storage(_) | AppError::Serialization(_) => {
                "Could not read or write local data.".to_string()
            }
            AppError::Config(msg) => format!("Configuration problem: {}", msg),
        }
    }

    /// Errores de autenticación: el usuario debe volver al login
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AppError::InvalidCredentials
                | AppError::NotAuthenticated
                | AppError::Unauthorized(_)
                | AppError::Jwt(_)
        )
    }

    /// Errores detectados localmente, antes de cualquier llamada de red
    pub fn is_local_rejection(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::DriverRequired(_)
                | AppError::TransitionNotAllowed { .. }
        )
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación de un único campo
pub fn validation_error(field: FormField, message: &str) -> AppError {
    let mut errors = FieldErrors::new();
    errors.insert(field, message);
    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {}: {}", operation, reason))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::CustomerName, "first");
        errors.insert(FormField::CustomerName, "second");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::CustomerName), Some("first"));
    }

    #[test]
    fn test_auth_errors_require_login() {
        assert!(AppError::InvalidCredentials.requires_login());
        assert!(AppError::Unauthorized("expired".to_string()).requires_login());
        assert!(!AppError::NotFound("x".to_string()).requires_login());
        assert_eq!(
            AppError::InvalidCredentials.user_message(),
            "Invalid username or password"
        );
    }

    #[test]
    fn test_remote_errors_have_generic_message() {
        let error = AppError::ExternalApi { status: 500, message: "boom".to_string() };
        assert!(!error.user_message().contains("boom"));
        assert!(!error.is_local_rejection());
        assert!(AppError::DriverRequired(RequestStatus::DriverAssigned).is_local_rejection());
    }

    #[test]
    fn test_validator_keys_map_to_wire_names() {
        assert_eq!(
            FormField::from_validator_key("customer_phone_number").map(|f| f.as_str()),
            Some("customerPhoneNumber")
        );
        assert!(FormField::from_validator_key("unknown").is_none());
    }
}
