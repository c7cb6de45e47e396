//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al JSON de la API remota.

pub mod auth;
pub mod driver;
pub mod service_request;
pub mod status;

pub use auth::{Role, Session};
pub use driver::{Driver, DriverForm, DriverId};
pub use service_request::{
    ServiceRequest, ServiceRequestForm, ServiceRequestId, ServiceRequestPayload, ServiceType,
};
pub use status::{RequestStatus, StatusCategory};
