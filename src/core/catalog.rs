//! Built-in bottle catalog
//!
//! Known PET bottles sold in Indonesia, keyed by exact barcode. The table is
//! built once on first access and never mutated, so concurrent readers need
//! no locking.

use std::collections::HashMap;

use crate::models::types::ProductEntry;

lazy_static::lazy_static! {
    static ref CATALOG: HashMap<&'static str, ProductEntry> = {
        let entries: [(&'static str, &'static str, &'static str, f64); 8] = [
            // Le Minerale
            ("8996001600399", "Le Minerale 1500ml", "Le Minerale", 0.035),
            ("8996001600375", "Le Minerale 330ml", "Le Minerale", 0.012),
            ("8996001600269", "Le Minerale 600ml", "Le Minerale", 0.018),
            // Aqua
            ("8886008101053", "Aqua 600ml", "Aqua", 0.016),
            ("8992696404441", "Aqua 1500ml", "Aqua", 0.032),
            // Cleo
            ("8996129800640", "Cleo 1500ml", "Cleo", 0.035),
            ("8996129803504", "Cleo 550ml", "Cleo", 0.015),
            // Santri (demo)
            ("8991234567890", "Santri 600ml", "Santri", 0.016),
        ];

        entries
            .into_iter()
            .map(|(barcode, name, brand, base_weight_kg)| {
                (barcode, ProductEntry { name, brand, base_weight_kg })
            })
            .collect()
    };
}

/// Exact-match catalog lookup
pub fn lookup(barcode: &str) -> Option<&'static ProductEntry> {
    CATALOG.get(barcode)
}

/// Number of catalog entries
pub fn len() -> usize {
    CATALOG.len()
}

/// All catalog barcodes, in no particular order
pub fn barcodes() -> impl Iterator<Item = &'static str> {
    CATALOG.keys().copied()
}
