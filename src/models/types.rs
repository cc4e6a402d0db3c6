//! Domain types shared by the resolver, the providers and the API layer.

use serde::Serialize;

use crate::utils::constants::{TRASH_TYPE_PET, VERIFIED_PREFIX};

/// Catalog record for a known bottle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductEntry {
    pub name: &'static str,
    pub brand: &'static str,
    /// Empty bottle weight before the per-barcode variation
    pub base_weight_kg: f64,
}

/// Product metadata returned by the external product database
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalProduct {
    /// Display name: brand, product name and quantity
    pub name: String,
    pub brand: String,
    /// Free-text quantity as published, e.g. "600 ml"
    pub quantity_text: String,
    /// Estimated bottle weight, already rounded to 3 decimals
    pub weight_kg: f64,
}

/// Outcome of an external lookup
///
/// Transport and decoding failures are folded into `NotFound` by the
/// provider, so the resolver never sees an error from this tier.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalLookup {
    Found(ExternalProduct),
    NotFound,
}

/// Which tier produced the weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionSource {
    Catalog,
    External,
    Fallback,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::External => "external",
            Self::Fallback => "fallback",
        }
    }
}

/// Response payload of a successful scan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Echoed verbatim from the request
    pub barcode: String,
    pub trash_type: String,
    pub product_name: String,
    /// Kilograms, 3-decimal precision
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    pub points_earned: u32,
    pub message: String,
    #[serde(skip)]
    pub source: ResolutionSource,
}

impl ScanResult {
    pub fn new(
        barcode: impl Into<String>,
        product_name: impl Into<String>,
        weight_kg: f64,
        points_earned: u32,
        source: ResolutionSource,
    ) -> Self {
        let product_name = product_name.into();
        Self {
            barcode: barcode.into(),
            trash_type: TRASH_TYPE_PET.to_string(),
            message: format!("{}{}", VERIFIED_PREFIX, product_name),
            product_name,
            weight_kg,
            points_earned,
            source,
        }
    }
}
