//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! fechas de India y JWT.

pub mod datetime;
pub mod errors;
pub mod jwt;
pub mod validation;

pub use errors::{AppError, AppResult, FieldErrors, FormField};
