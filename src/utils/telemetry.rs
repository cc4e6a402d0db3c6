//! Scan counters
//!
//! In-process, lock-free tallies of how scans were resolved. Nothing is
//! persisted; counters reset on restart.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::types::{ResolutionSource, ScanResult};

#[derive(Debug, Default)]
pub struct ScanStats {
    catalog: AtomicU64,
    external: AtomicU64,
    fallback: AtomicU64,
    rejected: AtomicU64,
    points_awarded: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_scans: u64,
    pub catalog_hits: u64,
    pub external_hits: u64,
    pub fallback_estimates: u64,
    pub rejected: u64,
    pub points_awarded: u64,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an accepted scan under the tier that resolved it
    pub fn record_result(&self, result: &ScanResult) {
        let counter = match result.source {
            ResolutionSource::Catalog => &self.catalog,
            ResolutionSource::External => &self.external,
            ResolutionSource::Fallback => &self.fallback,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.points_awarded
            .fetch_add(u64::from(result.points_earned), Ordering::Relaxed);
    }

    /// Count a scan that failed validation
    pub fn record_rejection(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let catalog_hits = self.catalog.load(Ordering::Relaxed);
        let external_hits = self.external.load(Ordering::Relaxed);
        let fallback_estimates = self.fallback.load(Ordering::Relaxed);
        let rejected = self.rejected.load(Ordering::Relaxed);

        StatsSnapshot {
            total_scans: catalog_hits + external_hits + fallback_estimates + rejected,
            catalog_hits,
            external_hits,
            fallback_estimates,
            rejected,
            points_awarded: self.points_awarded.load(Ordering::Relaxed),
        }
    }
}
