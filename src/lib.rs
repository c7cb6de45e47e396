//! Consola de operaciones para solicitudes de recogida y entrega de vehículos
//!
//! Cliente tipado sobre la API remota: validación de formularios, política
//! de estados, permisos por rol, sesión explícita y orquestación de
//! peticiones con refresco completo de la lista tras cada cambio.

pub mod cache;
pub mod cli;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use state::{AppState, SessionContext};
pub use utils::errors::{AppError, AppResult};
