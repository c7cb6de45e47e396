//! Utilidades JWT
//!
//! El cliente no verifica la firma del token (no conoce el secreto); solo
//! comprueba que lo devuelto por el login tenga forma de JWT antes de
//! guardarlo en la sesión.

use jsonwebtoken::decode_header;

use crate::utils::errors::AppError;

/// Validar formato de token (básico)
pub fn validate_token_format(token: &str) -> Result<(), AppError> {
    if token.is_empty() {
        return Err(AppError::Jwt("Token cannot be empty".to_string()));
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AppError::Jwt("Token must have 3 dot-separated parts".to_string()));
    }

    decode_header(token)
        .map(|_| ())
        .map_err(|e| AppError::Jwt(format!("Invalid token header: {}", e)))
}

/// Valor del header Authorization
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token)
}
