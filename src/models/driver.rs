//! Modelo de Driver
//!
//! Conductor que puede ser asignado a una solicitud de servicio.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::datetime::local_datetime;

/// Identificador de conductor asignado por el servidor
pub type DriverId = i64;

/// Driver tal como lo devuelve la API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub other_details: Option<String>,
    #[serde(default, with = "local_datetime::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "local_datetime::option", skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<NaiveDateTime>,
}

/// Request para crear o actualizar un conductor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DriverForm {
    #[validate(length(min = 1, max = 100, message = "Driver name is required."))]
    pub name: String,

    pub phone_number: String,

    #[validate(length(min = 1, max = 50, message = "License number is required."))]
    pub license_number: String,

    pub address: String,

    #[serde(default)]
    pub other_details: Option<String>,
}

impl From<&Driver> for DriverForm {
    fn from(driver: &Driver) -> Self {
        Self {
            name: driver.name.clone(),
            phone_number: driver.phone_number.clone().unwrap_or_default(),
            license_number: driver.license_number.clone().unwrap_or_default(),
            address: driver.address.clone().unwrap_or_default(),
            other_details: driver.other_details.clone(),
        }
    }
}
