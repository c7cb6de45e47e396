use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use tracing::debug;

use pickup_console::cli::Cli;
use pickup_console::config::environment::EnvironmentConfig;
use pickup_console::controllers::{self, render};
use pickup_console::state::AppState;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    // Configurar logging (a stderr para no mezclarse con la salida)
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    debug!("🚚 Pickup console ({}) -> {}", config.environment, config.api_base_url);

    let state = AppState::bootstrap(config)
        .await
        .context("No se pudo inicializar el estado local")?;

    match controllers::dispatch(&state, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            debug!("❌ {:?}", e);
            render::error(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}
