use serde::{Deserialize, Serialize};

use crate::models::{DriverId, RequestStatus, ServiceRequestId};

// Request para PUT /admin/update-service-status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceStatusRequest {
    pub service_request_id: ServiceRequestId,
    pub driver_id: Option<DriverId>,
    pub status: RequestStatus,
}

// Query de GET /services/by-date
#[derive(Debug, Clone, Serialize)]
pub struct ByDateQuery {
    pub date: String,
}
