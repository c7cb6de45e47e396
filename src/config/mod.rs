//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de entorno de la consola.

pub mod environment;

pub use environment::*;
