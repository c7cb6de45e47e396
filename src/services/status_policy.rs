//! Política de estados
//!
//! Categorías de estado, regla de conductor obligatorio y, opcionalmente,
//! la tabla de transiciones permitidas. Se evalúa en el cliente antes de
//! llamar a la API; el servidor vuelve a validar.

use std::collections::BTreeMap;

use crate::models::driver::DriverId;
use crate::models::service_request::ServiceRequest;
use crate::models::status::{RequestStatus, StatusCategory};
use crate::utils::errors::{AppError, AppResult};

/// Categoría de visualización de cada estado
pub fn category(status: RequestStatus) -> StatusCategory {
    match status {
        RequestStatus::Pending => StatusCategory::Pending,
        RequestStatus::AdminCancelled => StatusCategory::Cancelled,
        RequestStatus::AdminAccepted
        | RequestStatus::DriverAssigned
        | RequestStatus::DriverPickupDone
        | RequestStatus::DriverDropDone => StatusCategory::InProgress,
        RequestStatus::Completed => StatusCategory::Completed,
    }
}

/// Indica si el estado exige un conductor asignado
pub fn requires_driver(status: RequestStatus) -> bool {
    match status {
        RequestStatus::Pending | RequestStatus::AdminAccepted | RequestStatus::AdminCancelled => false,
        RequestStatus::DriverAssigned
        | RequestStatus::DriverPickupDone
        | RequestStatus::DriverDropDone
        | RequestStatus::Completed => true,
    }
}

/// Estados alcanzables desde `current` en modo estricto (además de sí mismo)
pub fn allowed_next(current: RequestStatus) -> &'static [RequestStatus] {
    use RequestStatus::*;
    match current {
        Pending => &[AdminAccepted, AdminCancelled, DriverAssigned],
        AdminAccepted => &[Pending, AdminCancelled, DriverAssigned],
        AdminCancelled => &[Pending],
        DriverAssigned => &[AdminAccepted, AdminCancelled, DriverPickupDone],
        DriverPickupDone => &[DriverDropDone],
        DriverDropDone => &[Completed],
        Completed => &[],
    }
}

/// Modo de control de transiciones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionMode {
    /// Cualquier estado puede elegirse; el servidor decide
    #[default]
    Permissive,
    /// Solo las transiciones de `allowed_next`
    Strict,
}

/// Cambio de estado ya aceptado por la política
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub target: RequestStatus,
    pub driver_id: Option<DriverId>,
}

/// Política de cambios de estado
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusPolicy {
    mode: TransitionMode,
}

impl StatusPolicy {
    pub fn new(mode: TransitionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    /// Comprueba un cambio de estado sin tocar la red
    pub fn check_change(
        &self,
        current: RequestStatus,
        target: RequestStatus,
        driver_id: Option<DriverId>,
    ) -> AppResult<StatusChange> {
        if requires_driver(target) && driver_id.is_none() {
            return Err(AppError::DriverRequired(target));
        }

        if self.mode == TransitionMode::Strict
            && current != target
            && !allowed_next(current).contains(&target)
        {
            return Err(AppError::TransitionNotAllowed { from: current, to: target });
        }

        Ok(StatusChange { target, driver_id })
    }
}

/// Conteo por categoría para el tablero
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts(BTreeMap<StatusCategory, usize>);

impl StatusCounts {
    pub fn tally(requests: &[ServiceRequest]) -> Self {
        let mut counts = BTreeMap::new();
        for category in StatusCategory::ALL {
            counts.insert(category, 0);
        }
        for request in requests {
            *counts.entry(category(request.status)).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn get(&self, category: StatusCategory) -> usize {
        self.0.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatusCategory, usize)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }
}
