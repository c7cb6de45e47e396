//! Configuración de cache
//!
//! Claves fijas del almacenamiento local de la consola.

/// Sesión completa (roles, usuario, empleado, token) en un solo registro
pub const SESSION_KEY: &str = "session";

/// Última fecha elegida en la vista de agenda
pub const SELECTED_DATE_KEY: &str = "selectedDate";

/// Última lista de solicitudes descargada
pub const PICKUPS_KEY: &str = "pickups";
