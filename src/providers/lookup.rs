//! External product lookup seam
//!
//! The resolver only sees this trait. Implementations must never fail:
//! anything that goes wrong upstream is reported as `NotFound`.

use async_trait::async_trait;

use crate::models::types::ExternalLookup;

#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Look up product metadata for a barcode
    async fn lookup(&self, barcode: &str) -> ExternalLookup;
}

/// Lookup used when the external tier is switched off
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLookup;

#[async_trait]
impl ProductLookup for DisabledLookup {
    async fn lookup(&self, _barcode: &str) -> ExternalLookup {
        ExternalLookup::NotFound
    }
}
