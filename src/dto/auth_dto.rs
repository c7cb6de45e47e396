use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::auth::Role;

// Login request enviado a la API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Login response de la API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub jwt: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

// Formulario de login de la consola
#[derive(Debug, Clone, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,

    #[validate(length(min = 1, max = 15, message = "Employee name must be between 1 and 15 characters."))]
    pub employee_name: String,
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}
