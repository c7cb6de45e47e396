use colored::*;

use crate::controllers::render;
use crate::dto::auth_dto::LoginForm;
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// Comando de login
pub async fn login(
    state: &AppState,
    username: String,
    password: String,
    employee_name: String,
) -> AppResult<()> {
    let form = LoginForm {
        username,
        password,
        employee_name,
    };
    let session = AuthService::new(state).login(&form).await?;

    render::success(&format!("Logged in as {}", session.username));
    if let Some(role) = session.primary_role() {
        println!("  Role: {}", role.to_string().bold());
    }
    Ok(())
}

/// Comando de logout
pub async fn logout(state: &AppState) -> AppResult<()> {
    AuthService::new(state).logout().await?;
    render::success("Logged out");
    Ok(())
}

pub async fn whoami(state: &AppState) -> AppResult<()> {
    let session = AuthService::new(state).current().await?;

    println!("{}", session.username.bold());
    println!("  Employee: {}", session.employee_name);
    let roles = session
        .roles
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("  Roles:    {}", if roles.is_empty() { "-".to_string() } else { roles });
    println!("  API:      {}", state.client.base_url());
    println!("  Store:    {}", state.store.path().display());
    println!("  Status:   {:?} transitions", state.policy.mode());
    Ok(())
}
