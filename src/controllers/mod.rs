//! Controllers - handlers de los subcomandos de la consola

pub mod auth_controller;
pub mod driver_controller;
pub mod pickup_controller;
pub mod render;

use tracing::warn;

use crate::cli::Command;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Ejecuta un subcomando; un token rechazado cierra la sesión local
pub async fn dispatch(state: &AppState, command: Command) -> AppResult<()> {
    let result = match command {
        Command::Login {
            username,
            password,
            employee_name,
        } => auth_controller::login(state, username, password, employee_name).await,
        Command::Logout => auth_controller::logout(state).await,
        Command::Whoami => auth_controller::whoami(state).await,
        Command::Pickups(cmd) => pickup_controller::handle(state, cmd).await,
        Command::Drivers(cmd) => driver_controller::handle(state, cmd).await,
    };

    if let Err(AppError::Unauthorized(_)) = &result {
        warn!("🔒 Token rechazado por la API, cerrando sesión local");
        if let Err(e) = state.session.clear().await {
            warn!("⚠️ No se pudo borrar la sesión local: {}", e);
        }
    }
    result
}
