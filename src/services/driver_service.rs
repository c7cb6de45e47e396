use tracing::info;

use crate::models::driver::{Driver, DriverForm, DriverId};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::{ensure_valid, validate_driver_form};

/// CRUD de conductores; cada mutación devuelve la lista refrescada
pub struct DriverService<'a> {
    state: &'a AppState,
}

impl<'a> DriverService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        let session = self.state.session.current().await?;
        let drivers = self.state.client.list_drivers(&session).await?;
        info!("🚗 {} conductores descargados", drivers.len());
        Ok(drivers)
    }

    pub async fn create(&self, form: &DriverForm) -> AppResult<(Driver, Vec<Driver>)> {
        ensure_valid(validate_driver_form(form))?;
        let session = self.state.session.current().await?;

        let created = self.state.client.create_driver(&session, form).await?;
        info!("✅ Conductor {} '{}' creado", created.id, created.name);
        Ok((created, self.list().await?))
    }

    pub async fn update(&self, id: DriverId, form: &DriverForm) -> AppResult<(Driver, Vec<Driver>)> {
        ensure_valid(validate_driver_form(form))?;
        let session = self.state.session.current().await?;

        let updated = self.state.client.update_driver(&session, id, form).await?;
        info!("✏️ Conductor {} actualizado", id);
        Ok((updated, self.list().await?))
    }

    pub async fn delete(&self, id: DriverId) -> AppResult<Vec<Driver>> {
        let session = self.state.session.current().await?;
        self.state.client.delete_driver(&session, id).await?;
        info!("🗑️ Conductor {} eliminado", id);
        self.list().await
    }
}
