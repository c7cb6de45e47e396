//! DTOs de la API remota
//!
//! Requests y responses que solo existen en el cable.

pub mod auth_dto;
pub mod service_dto;

pub use auth_dto::{LoginForm, LoginRequest, LoginResponse};
pub use service_dto::{ByDateQuery, UpdateServiceStatusRequest};
