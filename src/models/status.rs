//! Estados de una solicitud de servicio
//!
//! Enumeración cerrada de estados y sus categorías de visualización.
//! Cada punto de consumo hace `match` exhaustivo sobre estos enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Estado del ciclo de vida de una solicitud de recogida/entrega
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    AdminAccepted,
    AdminCancelled,
    DriverAssigned,
    DriverPickupDone,
    DriverDropDone,
    Completed,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 7] = [
        RequestStatus::Pending,
        RequestStatus::AdminAccepted,
        RequestStatus::AdminCancelled,
        RequestStatus::DriverAssigned,
        RequestStatus::DriverPickupDone,
        RequestStatus::DriverDropDone,
        RequestStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::AdminAccepted => "ADMIN_ACCEPTED",
            RequestStatus::AdminCancelled => "ADMIN_CANCELLED",
            RequestStatus::DriverAssigned => "DRIVER_ASSIGNED",
            RequestStatus::DriverPickupDone => "DRIVER_PICKUP_DONE",
            RequestStatus::DriverDropDone => "DRIVER_DROP_DONE",
            RequestStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

/// Categoría agregada para conteos y colores del tablero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusCategory {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(rename = "INPROGRESS")]
    InProgress,
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 4] = [
        StatusCategory::Pending,
        StatusCategory::Cancelled,
        StatusCategory::InProgress,
        StatusCategory::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Pending => "PENDING",
            StatusCategory::Cancelled => "CANCELLED",
            StatusCategory::InProgress => "INPROGRESS",
            StatusCategory::Completed => "COMPLETED",
        }
    }

    /// Color del badge de estado
    pub fn display_color(&self) -> &'static str {
        match self {
            StatusCategory::Pending => "#b0bec5",
            StatusCategory::Cancelled => "#f44336",
            StatusCategory::InProgress => "#ffeb3b",
            StatusCategory::Completed => "#4caf50",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
