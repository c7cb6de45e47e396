use tracing::{info, warn};

use crate::dto::auth_dto::LoginForm;
use crate::models::auth::Session;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::validate_token_format;
use crate::utils::validation::{ensure_valid, validate_login_form};

/// Servicio de autenticación
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Autentica contra la API y establece la sesión
    pub async fn login(&self, form: &LoginForm) -> AppResult<Session> {
        ensure_valid(validate_login_form(form))?;

        let response = self.state.client.login(&form.to_request()).await?;

        if let Err(e) = validate_token_format(&response.jwt) {
            warn!("🔒 Token de login mal formado para '{}': {}", form.username, e);
            return Err(AppError::InvalidCredentials);
        }

        let session = Session {
            roles: response.roles,
            username: form.username.clone(),
            employee_name: form.employee_name.clone(),
            token: response.jwt,
        };
        self.state.session.establish(session.clone()).await?;

        info!(
            "✅ Login correcto: '{}' como {}",
            session.username,
            session
                .primary_role()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "sin rol".to_string())
        );
        Ok(session)
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.state.session.clear().await
    }

    pub async fn current(&self) -> AppResult<Session> {
        self.state.session.current().await
    }
}
