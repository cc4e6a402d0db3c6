//! API Request/Response Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::models::errors::AppError;
use crate::utils::telemetry::StatsSnapshot;

// ============================================
// Scan
// ============================================

/// Body of `POST /scan-barcode`
///
/// The web client sends `code`; the Next.js route uses `barcode`.
#[derive(Debug, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
}

impl ScanRequest {
    /// The barcode to resolve: non-empty `code` wins over `barcode`
    pub fn into_barcode(self) -> Option<String> {
        self.code
            .filter(|c| !c.is_empty())
            .or(self.barcode.filter(|b| !b.is_empty()))
    }
}

// ============================================
// Errors
// ============================================

/// Error body: `{ "error": "...", "code": "..." }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.message.clone(),
            code: err.code_str().to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.code_str(), "Request failed: {}", self);
        } else {
            warn!(code = self.code_str(), "Request rejected: {}", self.message);
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

// ============================================
// Status / Health
// ============================================

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: i64,
}

// ============================================
// Stats
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    #[serde(flatten)]
    pub scans: StatsSnapshot,
    pub uptime_seconds: u64,
    pub api_version: String,
}
