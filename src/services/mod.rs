//! Services module
//!
//! Este módulo contiene la lógica de negocio de la consola: política de
//! estados, permisos por rol y los flujos que orquestan llamadas a la API.

pub mod auth_service;
pub mod authorization_service;
pub mod driver_service;
pub mod pickup_service;
pub mod status_policy;

pub use auth_service::AuthService;
pub use authorization_service::AuthorizationService;
pub use driver_service::DriverService;
pub use pickup_service::{CachedPickupList, MutationOutcome, PickupBoard, PickupListScope, PickupService};
pub use status_policy::{StatusChange, StatusCounts, StatusPolicy, TransitionMode};
