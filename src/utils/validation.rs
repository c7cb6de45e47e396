//! Utilidades de validación
//!
//! Validación pura de los formularios de la consola. Ninguna función de
//! este módulo falla: devuelven un mapa campo → mensaje, vacío si todo es
//! válido, y el llamador decide si continúa.

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use validator::Validate;

use crate::dto::auth_dto::LoginForm;
use crate::models::driver::DriverForm;
use crate::models::service_request::ServiceRequestForm;
use crate::utils::datetime::{now_in_india, parse_date, parse_local_datetime};
use crate::utils::errors::{bad_request_error, AppError, AppResult, FieldErrors, FormField};

lazy_static! {
    /// Móvil o fijo indio: prefijo opcional +91 / 0 / 91 y 10 dígitos empezando por 7, 8 o 9
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^(\+91[\-\s]?)?0?(91)?[789][0-9]{9}$").unwrap();

    /// Forma laxa de email (sin anclar)
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"\S+@\S+\.\S+").unwrap();

    pub static ref VEHICLE_NUMBER_REGEX: Regex = Regex::new(r"^\S{5,16}$").unwrap();
}

pub const PICKUP_TIME_REQUIRED: &str = "Pickup time is required.";
pub const PICKUP_TIME_INVALID: &str = "Pickup time must be a valid date and time.";
pub const PICKUP_TIME_IN_PAST: &str = "Pickup time must be in the future.";

/// Valida el formulario contra un "ahora" explícito (hora de pared de India)
pub fn validate_service_form_at(form: &ServiceRequestForm, now_india: NaiveDateTime) -> FieldErrors {
    let form = form.clone().normalized();

    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from_validation(&e),
    };

    match form.pickup_time.as_deref() {
        None => errors.insert(FormField::PickupTime, PICKUP_TIME_REQUIRED),
        Some(raw) => match parse_local_datetime(raw) {
            None => errors.insert(FormField::PickupTime, PICKUP_TIME_INVALID),
            Some(pickup) if pickup <= now_india => {
                errors.insert(FormField::PickupTime, PICKUP_TIME_IN_PAST)
            }
            Some(_) => {}
        },
    }

    errors
}

/// Valida el formulario contra la hora actual de India
pub fn validate_service_form(form: &ServiceRequestForm) -> FieldErrors {
    validate_service_form_at(form, now_in_india())
}

pub fn validate_driver_form(form: &DriverForm) -> FieldErrors {
    match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from_validation(&e),
    }
}

pub fn validate_login_form(form: &LoginForm) -> FieldErrors {
    match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from_validation(&e),
    }
}

/// Convierte un mapa de errores en `Result` para los flujos que deben cortar
pub fn ensure_valid(errors: FieldErrors) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Validar y convertir string a fecha `YYYY-MM-DD`
pub fn validate_schedule_date(value: &str) -> AppResult<NaiveDate> {
    parse_date(value).ok_or_else(|| bad_request_error("Date must use the YYYY-MM-DD format."))
}
