//! API Request Handlers

use axum::extract::{rejection::JsonRejection, Json, State};
use std::sync::Arc;
use std::time::Instant;

use super::types::*;
use crate::core::resolver::BarcodeResolver;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::ScanResult;
use crate::utils::constants::{APP_VERSION, SERVICE_STATUS};
use crate::utils::telemetry::ScanStats;

/// Shared application state
pub struct AppState {
    pub resolver: BarcodeResolver,
    pub stats: Arc<ScanStats>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(resolver: BarcodeResolver) -> Self {
        Self {
            resolver,
            stats: Arc::new(ScanStats::new()),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Liveness
// ============================================

pub async fn root_status() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: SERVICE_STATUS.to_string(),
    })
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthData> {
    Json(HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsData> {
    Json(StatsData {
        scans: state.stats.snapshot(),
        uptime_seconds: state.uptime_seconds(),
        api_version: APP_VERSION.to_string(),
    })
}

// ============================================
// Barcode Scan
// ============================================

pub async fn scan_barcode(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> AppResult<Json<ScanResult>> {
    let Json(req) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let Some(barcode) = req.into_barcode() else {
        state.stats.record_rejection();
        return Err(AppError::missing_barcode());
    };

    match state.resolver.resolve(&barcode).await {
        Ok(result) => {
            state.stats.record_result(&result);
            Ok(Json(result))
        }
        Err(err) => {
            if err.code == ErrorCode::InvalidBarcode {
                state.stats.record_rejection();
            }
            Err(err)
        }
    }
}
