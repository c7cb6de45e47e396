//! Cache
//!
//! Almacenamiento local persistente de la consola.

pub mod cache_config;
pub mod local_store;

pub use local_store::LocalStore;
