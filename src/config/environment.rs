//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno de la consola.

use std::env;
use std::path::PathBuf;

use crate::services::status_policy::TransitionMode;
use crate::utils::errors::{AppError, AppResult};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_STORE_PATH: &str = ".pickup-console/store.json";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    /// Sin timeout salvo que se configure
    pub request_timeout_secs: Option<u64>,
    pub store_path: PathBuf,
    pub log_level: tracing::Level,
    pub transition_mode: TransitionMode,
    /// Envía el header `empname` con el nombre del empleado
    pub send_employee_header: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            log_level: tracing::Level::INFO,
            transition_mode: TransitionMode::Permissive,
            send_employee_header: true,
        }
    }
}

impl EnvironmentConfig {
    /// Lee la configuración de las variables `PICKUP_*`
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let api_base_url = env::var("PICKUP_API_BASE_URL")
            .unwrap_or(defaults.api_base_url)
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "PICKUP_API_BASE_URL must be an http(s) URL, got '{}'",
                api_base_url
            )));
        }

        let request_timeout_secs = match env::var("PICKUP_REQUEST_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config("PICKUP_REQUEST_TIMEOUT_SECS must be a valid number".to_string())
            })?),
            _ => None,
        };

        let log_level = match env::var("PICKUP_LOG_LEVEL") {
            Ok(raw) => raw.trim().parse::<tracing::Level>().map_err(|_| {
                AppError::Config(format!("PICKUP_LOG_LEVEL '{}' is not a log level", raw))
            })?,
            Err(_) => defaults.log_level,
        };

        let transition_mode = if parse_flag("PICKUP_STRICT_TRANSITIONS", false)? {
            TransitionMode::Strict
        } else {
            TransitionMode::Permissive
        };

        Ok(Self {
            environment: env::var("PICKUP_ENVIRONMENT").unwrap_or(defaults.environment),
            api_base_url,
            request_timeout_secs,
            store_path: env::var("PICKUP_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            log_level,
            transition_mode,
            send_employee_header: parse_flag("PICKUP_SEND_EMPLOYEE_HEADER", true)?,
        })
    }
}

fn parse_flag(name: &str, default: bool) -> AppResult<bool> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            "" => Ok(default),
            _ => Err(AppError::Config(format!("{} must be true or false, got '{}'", name, raw))),
        },
    }
}
