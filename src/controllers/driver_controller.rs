use crate::cli::{DriverCommand, DriverFields};
use crate::controllers::render;
use crate::models::driver::{DriverForm, DriverId};
use crate::services::driver_service::DriverService;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub async fn handle(state: &AppState, command: DriverCommand) -> AppResult<()> {
    let service = DriverService::new(state);

    match command {
        DriverCommand::List => {
            render::driver_list(&service.list().await?);
        }
        DriverCommand::Create { fields } => {
            let form = fields.apply(DriverForm::default());
            let (created, drivers) = service.create(&form).await?;
            render::success(&format!("Driver #{} '{}' created", created.id, created.name));
            render::driver_list(&drivers);
        }
        DriverCommand::Update { id, fields } => {
            let form = current_form(&service, id, fields).await?;
            let (updated, drivers) = service.update(id, &form).await?;
            render::success(&format!("Driver #{} updated", updated.id));
            render::driver_list(&drivers);
        }
        DriverCommand::Delete { id } => {
            let drivers = service.delete(id).await?;
            render::success(&format!("Driver #{} deleted", id));
            render::driver_list(&drivers);
        }
    }
    Ok(())
}

/// Formulario con los valores actuales del conductor y los cambios pedidos
async fn current_form(service: &DriverService<'_>, id: DriverId, fields: DriverFields) -> AppResult<DriverForm> {
    let drivers = service.list().await?;
    let driver = drivers
        .iter()
        .find(|d| d.id == id)
        .ok_or_else(|| not_found_error("Driver", &id.to_string()))?;
    Ok(fields.apply(DriverForm::from(driver)))
}
