//! Modelo de ServiceRequest
//!
//! Solicitud de recogida o entrega de un vehículo, el formulario que la
//! crea/edita y el payload que se envía a la API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::driver::{Driver, DriverId};
use crate::models::status::{RequestStatus, StatusCategory};
use crate::utils::datetime::{format_wire, local_datetime};
use crate::utils::validation::{EMAIL_REGEX, PHONE_REGEX, VEHICLE_NUMBER_REGEX};

/// Identificador de solicitud asignado por el servidor
pub type ServiceRequestId = i64;

/// Marca fija de todos los vehículos atendidos
pub const VEHICLE_BRAND: &str = "Skoda";

/// Extremo fijo del trayecto (el taller)
pub const SERVICE_CENTRE: &str = "service centre";

/// Tipo de servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    #[default]
    PickupFromCustomerLocation,
    DropToCustomerLocation,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::PickupFromCustomerLocation => "PICKUP_FROM_CUSTOMER_LOCATION",
            ServiceType::DropToCustomerLocation => "DROP_TO_CUSTOMER_LOCATION",
        }
    }

    /// Etiqueta corta para listados
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::PickupFromCustomerLocation => "Pickup",
            ServiceType::DropToCustomerLocation => "Drop",
        }
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pickup" | "pickup_from_customer_location" => Ok(ServiceType::PickupFromCustomerLocation),
            "drop" | "drop_to_customer_location" => Ok(ServiceType::DropToCustomerLocation),
            other => Err(format!("unknown service type '{}'", other)),
        }
    }
}

/// ServiceRequest tal como lo devuelve la API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: ServiceRequestId,
    pub customer_name: String,
    pub customer_phone_number: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub vehicle_number: String,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default = "default_brand")]
    pub vehicle_brand: String,
    pub service_type: ServiceType,
    pub service_location: String,
    #[serde(with = "local_datetime")]
    pub pickup_time: NaiveDateTime,
    pub status: RequestStatus,
    #[serde(default, rename = "driver", alias = "assignedDriver")]
    pub assigned_driver: Option<Driver>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default, with = "local_datetime::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "local_datetime::option", skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<NaiveDateTime>,
}

fn default_brand() -> String {
    VEHICLE_BRAND.to_string()
}

impl ServiceRequest {
    pub fn category(&self) -> StatusCategory {
        crate::services::status_policy::category(self.status)
    }

    pub fn driver_id(&self) -> Option<DriverId> {
        self.assigned_driver.as_ref().map(|d| d.id)
    }

    /// Origen del trayecto según el tipo de servicio
    pub fn from_address(&self) -> &str {
        match self.service_type {
            ServiceType::PickupFromCustomerLocation => &self.service_location,
            ServiceType::DropToCustomerLocation => SERVICE_CENTRE,
        }
    }

    /// Destino del trayecto según el tipo de servicio
    pub fn to_address(&self) -> &str {
        match self.service_type {
            ServiceType::PickupFromCustomerLocation => SERVICE_CENTRE,
            ServiceType::DropToCustomerLocation => &self.service_location,
        }
    }

    /// Formulario de edición precargado con los valores actuales
    pub fn to_form(&self) -> ServiceRequestForm {
        ServiceRequestForm {
            customer_name: self.customer_name.clone(),
            customer_phone_number: self.customer_phone_number.clone(),
            customer_email: self.customer_email.clone(),
            vehicle_number: self.vehicle_number.clone(),
            vehicle_model: self.vehicle_model.clone(),
            service_type: self.service_type,
            service_location: self.service_location.clone(),
            pickup_time: Some(format_wire(&self.pickup_time)),
            created_by: self.created_by.clone(),
        }
    }
}

/// Formulario de creación/edición, con los valores tal como los escribe el usuario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestForm {
    #[validate(length(min = 3, max = 50, message = "Customer name must be between 3 and 50 characters."))]
    pub customer_name: String,

    #[validate(regex(path = "PHONE_REGEX", message = "Enter a valid Indian mobile or landline number."))]
    pub customer_phone_number: String,

    #[validate(regex(path = "EMAIL_REGEX", message = "Enter a valid email address."))]
    pub customer_email: Option<String>,

    #[validate(regex(
        path = "VEHICLE_NUMBER_REGEX",
        message = "Enter a valid vehicle number with 5 to 16 characters and no spaces."
    ))]
    pub vehicle_number: String,

    #[validate(length(min = 2, max = 20, message = "Vehicle model must be between 2 and 20 characters."))]
    pub vehicle_model: Option<String>,

    #[serde(default)]
    pub service_type: ServiceType,

    #[validate(length(min = 15, max = 300, message = "Service location must be between 15 and 300 characters."))]
    pub service_location: String,

    /// Validado aparte: depende del reloj de India
    pub pickup_time: Option<String>,

    #[serde(default)]
    pub created_by: Option<String>,
}

impl ServiceRequestForm {
    /// Los opcionales vacíos cuentan como ausentes
    pub fn normalized(mut self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        self.customer_email = blank_to_none(self.customer_email);
        self.vehicle_model = blank_to_none(self.vehicle_model);
        self.pickup_time = blank_to_none(self.pickup_time);
        self.created_by = blank_to_none(self.created_by);
        self
    }
}

/// Payload enviado en POST/PUT /services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ServiceRequestId>,
    pub customer_name: String,
    pub customer_phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub vehicle_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    pub vehicle_brand: String,
    pub service_type: ServiceType,
    pub service_location: String,
    #[serde(with = "local_datetime")]
    pub pickup_time: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_name: Option<String>,
}

impl ServiceRequestPayload {
    /// Construye el payload a partir de un formulario ya validado
    pub fn from_form(form: ServiceRequestForm, pickup_time: NaiveDateTime) -> Self {
        Self {
            id: None,
            customer_name: form.customer_name,
            customer_phone_number: form.customer_phone_number,
            customer_email: form.customer_email,
            vehicle_number: form.vehicle_number,
            vehicle_model: form.vehicle_model,
            vehicle_brand: VEHICLE_BRAND.to_string(),
            service_type: form.service_type,
            service_location: form.service_location,
            pickup_time,
            status: None,
            created_by: form.created_by,
            created_by_name: None,
        }
    }
}
