use crate::models::auth::Session;
use crate::models::status::RequestStatus;
use crate::utils::errors::{forbidden_error, AppResult};

/// Servicio de autorización: qué puede hacer cada rol sobre una solicitud
///
/// Son compuertas de interfaz; la API remota aplica su propia autorización.
pub struct AuthorizationService<'a> {
    session: &'a Session,
}

impl<'a> AuthorizationService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Editar: ADMIN siempre; SC_OPS solo mientras la solicitud está pendiente
    pub fn can_edit(&self, status: RequestStatus) -> bool {
        if self.session.is_admin() {
            return true;
        }
        if !self.session.is_sc_ops() {
            return false;
        }
        match status {
            RequestStatus::Pending => true,
            RequestStatus::AdminAccepted
            | RequestStatus::AdminCancelled
            | RequestStatus::DriverAssigned
            | RequestStatus::DriverPickupDone
            | RequestStatus::DriverDropDone
            | RequestStatus::Completed => false,
        }
    }

    /// Cambiar estado o asignar conductor: solo ADMIN
    pub fn can_change_status(&self) -> bool {
        self.session.is_admin()
    }

    pub fn ensure_can_edit(&self, status: RequestStatus) -> AppResult<()> {
        if self.can_edit(status) {
            Ok(())
        } else {
            Err(forbidden_error(
                "edit request",
                &format!("role {} may not edit a {} request", self.role_label(), status),
            ))
        }
    }

    pub fn ensure_can_change_status(&self) -> AppResult<()> {
        if self.can_change_status() {
            Ok(())
        } else {
            Err(forbidden_error(
                "change status",
                &format!("role {} may not change request status", self.role_label()),
            ))
        }
    }

    fn role_label(&self) -> String {
        self.session
            .primary_role()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "NONE".to_string())
    }
}
