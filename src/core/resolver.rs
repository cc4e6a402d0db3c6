//! Barcode Resolver - catalog, external lookup, fallback estimator
//!
//! Resolution order:
//! 1. Built-in catalog (no I/O)
//! 2. External product database (one request, failures count as a miss)
//! 3. Digit-derived fallback for well-formed barcodes
//!
//! Points are derived from the resolved weight in every case. The only
//! error a caller can see is a malformed barcode rejected by step 3.

use std::sync::Arc;
use tracing::{debug, info};

use super::catalog;
use super::weight::{calculate_points, catalog_weight_kg, fallback_weight_kg};
use crate::models::config::ScannerConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ExternalLookup, ResolutionSource, ScanResult};
use crate::providers::{DisabledLookup, OpenFoodFactsClient, ProductLookup};
use crate::utils::constants::{MIN_BARCODE_LEN, UNKNOWN_BOTTLE_NAME};

/// Resolves barcodes to scan results
///
/// Stateless apart from the shared lookup client; one instance serves all
/// requests concurrently.
#[derive(Clone)]
pub struct BarcodeResolver {
    lookup: Arc<dyn ProductLookup>,
}

impl BarcodeResolver {
    pub fn new(lookup: Arc<dyn ProductLookup>) -> Self {
        Self { lookup }
    }

    /// Resolver that never leaves the process
    pub fn offline() -> Self {
        Self::new(Arc::new(DisabledLookup))
    }

    /// Resolver backed by Open Food Facts unless disabled in config
    pub fn from_config(config: &ScannerConfig) -> AppResult<Self> {
        if !config.external_lookup_enabled {
            return Ok(Self::offline());
        }
        let client = OpenFoodFactsClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Resolve a barcode into weight, product name and points
    pub async fn resolve(&self, barcode: &str) -> AppResult<ScanResult> {
        if let Some(result) = resolve_from_catalog(barcode) {
            debug!(barcode = %barcode, "Catalog hit");
            return Ok(result);
        }

        let result = match self.lookup.lookup(barcode).await {
            ExternalLookup::Found(product) => ScanResult::new(
                barcode,
                product.name,
                product.weight_kg,
                calculate_points(product.weight_kg),
                ResolutionSource::External,
            ),
            ExternalLookup::NotFound => resolve_fallback(barcode)?,
        };

        info!(
            barcode = %barcode,
            source = result.source.as_str(),
            weight_kg = result.weight_kg,
            points = result.points_earned,
            "Barcode resolved"
        );

        Ok(result)
    }
}

/// Step 1: catalog lookup with the per-barcode weight variation
pub fn resolve_from_catalog(barcode: &str) -> Option<ScanResult> {
    let entry = catalog::lookup(barcode)?;
    let weight_kg = catalog_weight_kg(entry.base_weight_kg, barcode);
    Some(ScanResult::new(
        barcode,
        entry.name,
        weight_kg,
        calculate_points(weight_kg),
        ResolutionSource::Catalog,
    ))
}

/// Step 3 accepts only all-digit barcodes of length 8 or more
pub fn is_valid_fallback_barcode(barcode: &str) -> bool {
    barcode.len() >= MIN_BARCODE_LEN && barcode.bytes().all(|b| b.is_ascii_digit())
}

/// Step 3: generic estimate for any well-formed barcode
pub fn resolve_fallback(barcode: &str) -> AppResult<ScanResult> {
    if !is_valid_fallback_barcode(barcode) {
        return Err(AppError::invalid_barcode());
    }
    let weight_kg = fallback_weight_kg(barcode);
    Ok(ScanResult::new(
        barcode,
        UNKNOWN_BOTTLE_NAME,
        weight_kg,
        calculate_points(weight_kg),
        ResolutionSource::Fallback,
    ))
}
