//! Orquestación de solicitudes de servicio
//!
//! Flujos de creación, edición, borrado, listado y cambio de estado. Tras
//! cada mutación se vuelve a descargar la lista completa y se reemplaza la
//! copia local; si algo falla la copia local no se toca.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cache::cache_config::{PICKUPS_KEY, SELECTED_DATE_KEY};
use crate::dto::service_dto::UpdateServiceStatusRequest;
use crate::models::auth::Session;
use crate::models::driver::{Driver, DriverId};
use crate::models::service_request::{
    ServiceRequest, ServiceRequestForm, ServiceRequestId, ServiceRequestPayload,
};
use crate::models::status::RequestStatus;
use crate::services::authorization_service::AuthorizationService;
use crate::services::status_policy::StatusCounts;
use crate::state::AppState;
use crate::utils::datetime::{now_in_india, parse_date, parse_local_datetime};
use crate::utils::errors::{not_found_error, validation_error, AppResult, FormField};
use crate::utils::validation::{ensure_valid, validate_service_form, PICKUP_TIME_INVALID};

/// Lista que se está mirando: las de hoy o las de una fecha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "camelCase")]
pub enum PickupListScope {
    Recent,
    ByDate(NaiveDate),
}

impl std::fmt::Display for PickupListScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickupListScope::Recent => f.write_str("Today's Created Pickups"),
            PickupListScope::ByDate(date) => write!(f, "Pickups Schedule for {}", date),
        }
    }
}

/// Copia local de la última lista descargada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedPickupList {
    pub scope: PickupListScope,
    pub fetched_at: NaiveDateTime,
    pub items: Vec<ServiceRequest>,
}

impl CachedPickupList {
    pub fn find(&self, id: ServiceRequestId) -> Option<&ServiceRequest> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.items)
    }
}

/// Resultado de una mutación: lo guardado y la lista ya refrescada
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub saved: Option<ServiceRequest>,
    pub list: CachedPickupList,
}

/// Vista de tablero: solicitudes, conteos y conductores disponibles
#[derive(Debug, Clone)]
pub struct PickupBoard {
    pub list: CachedPickupList,
    pub counts: StatusCounts,
    pub drivers: Vec<Driver>,
}

pub struct PickupService<'a> {
    state: &'a AppState,
}

impl<'a> PickupService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Descarga la lista y reemplaza la copia local
    pub async fn list(&self, scope: PickupListScope) -> AppResult<CachedPickupList> {
        let session = self.state.session.current().await?;
        self.refresh(&session, scope).await
    }

    /// Última lista guardada, sin red
    pub async fn cached(&self) -> AppResult<Option<CachedPickupList>> {
        self.state.store.get(PICKUPS_KEY).await
    }

    pub async fn selected_date(&self) -> AppResult<Option<NaiveDate>> {
        let raw: Option<String> = self.state.store.get(SELECTED_DATE_KEY).await?;
        Ok(raw.as_deref().and_then(parse_date))
    }

    /// Guarda la fecha elegida y descarga su agenda
    pub async fn select_date(&self, date: NaiveDate) -> AppResult<CachedPickupList> {
        self.state
            .store
            .set(SELECTED_DATE_KEY, &date.format("%Y-%m-%d").to_string())
            .await?;
        self.list(PickupListScope::ByDate(date)).await
    }

    /// Solicitud concreta dentro de la lista indicada
    pub async fn get(&self, id: ServiceRequestId, scope: PickupListScope) -> AppResult<ServiceRequest> {
        let session = self.state.session.current().await?;
        self.find(&session, id, scope).await
    }

    /// Lista + conductores en paralelo
    pub async fn board(&self, scope: PickupListScope) -> AppResult<PickupBoard> {
        let session = self.state.session.current().await?;
        let (list, drivers) = futures::try_join!(
            self.refresh(&session, scope),
            self.state.client.list_drivers(&session)
        )?;
        let counts = list.counts();
        Ok(PickupBoard { list, counts, drivers })
    }

    pub async fn create(
        &self,
        form: &ServiceRequestForm,
        scope: PickupListScope,
    ) -> AppResult<MutationOutcome> {
        ensure_valid(validate_service_form(form))?;
        let session = self.state.session.current().await?;

        let form = form.clone().normalized();
        let pickup_time = parsed_pickup_time(&form)?;
        let mut payload = ServiceRequestPayload::from_form(form, pickup_time);
        if payload.created_by.is_none() {
            payload.created_by = Some(session.username.clone());
        }
        payload.created_by_name = Some(session.employee_name.clone());

        let saved = self.state.client.create_service(&session, &payload).await?;
        info!("✅ Solicitud {} creada por '{}'", saved.id, session.username);

        let list = self.refresh(&session, scope).await?;
        Ok(MutationOutcome { saved: Some(saved), list })
    }

    pub async fn edit(
        &self,
        id: ServiceRequestId,
        form: &ServiceRequestForm,
        scope: PickupListScope,
    ) -> AppResult<MutationOutcome> {
        let session = self.state.session.current().await?;
        let existing = self.find(&session, id, scope).await?;
        AuthorizationService::new(&session).ensure_can_edit(existing.status)?;

        ensure_valid(validate_service_form(form))?;
        let form = form.clone().normalized();
        let pickup_time = parsed_pickup_time(&form)?;

        let mut payload = ServiceRequestPayload::from_form(form, pickup_time);
        payload.id = Some(id);
        payload.status = Some(existing.status);
        payload.created_by = payload.created_by.or(existing.created_by.clone());
        payload.created_by_name = existing.created_by_name.clone();

        let saved = self.state.client.update_service(&session, id, &payload).await?;
        info!("✏️ Solicitud {} actualizada por '{}'", id, session.username);

        let list = self.refresh(&session, scope).await?;
        Ok(MutationOutcome { saved: Some(saved), list })
    }

    pub async fn delete(&self, id: ServiceRequestId, scope: PickupListScope) -> AppResult<MutationOutcome> {
        let session = self.state.session.current().await?;
        let existing = self.find(&session, id, scope).await?;
        AuthorizationService::new(&session).ensure_can_edit(existing.status)?;

        self.state.client.delete_service(&session, id).await?;
        info!("🗑️ Solicitud {} eliminada por '{}'", id, session.username);

        let list = self.refresh(&session, scope).await?;
        Ok(MutationOutcome { saved: None, list })
    }

    pub async fn change_status(
        &self,
        id: ServiceRequestId,
        target: RequestStatus,
        driver_id: Option<DriverId>,
        scope: PickupListScope,
    ) -> AppResult<MutationOutcome> {
        let session = self.state.session.current().await?;
        AuthorizationService::new(&session).ensure_can_change_status()?;

        let existing = self.find(&session, id, scope).await?;
        let change = self.state.policy.check_change(existing.status, target, driver_id)?;

        let request = UpdateServiceStatusRequest {
            service_request_id: id,
            driver_id: change.driver_id,
            status: change.target,
        };
        let saved = self.state.client.update_service_status(&session, &request).await?;
        info!(
            "🔄 Solicitud {}: {} -> {} (driver {:?})",
            id, existing.status, change.target, change.driver_id
        );

        let list = self.refresh(&session, scope).await?;
        Ok(MutationOutcome { saved: Some(saved), list })
    }

    /// Busca en la copia local; si no está, refresca una vez y vuelve a buscar
    async fn find(
        &self,
        session: &Session,
        id: ServiceRequestId,
        scope: PickupListScope,
    ) -> AppResult<ServiceRequest> {
        if let Some(cached) = self.cached().await? {
            if cached.scope == scope {
                if let Some(found) = cached.find(id) {
                    return Ok(found.clone());
                }
            }
        }

        warn!("🔍 Solicitud {} no está en cache, refrescando {:?}", id, scope);
        let fresh = self.refresh(session, scope).await?;
        fresh
            .find(id)
            .cloned()
            .ok_or_else(|| not_found_error("Service request", &id.to_string()))
    }

    async fn refresh(&self, session: &Session, scope: PickupListScope) -> AppResult<CachedPickupList> {
        let items = match scope {
            PickupListScope::Recent => self.state.client.recent_services(session).await?,
            PickupListScope::ByDate(date) => self.state.client.services_by_date(session, date).await?,
        };

        let list = CachedPickupList {
            scope,
            fetched_at: now_in_india(),
            items,
        };
        self.state.store.set(PICKUPS_KEY, &list).await?;
        info!("📋 {} solicitudes descargadas ({})", list.items.len(), scope);
        Ok(list)
    }
}

fn parsed_pickup_time(form: &ServiceRequestForm) -> AppResult<NaiveDateTime> {
    form.pickup_time
        .as_deref()
        .and_then(parse_local_datetime)
        .ok_or_else(|| validation_error(FormField::PickupTime, PICKUP_TIME_INVALID))
}
