//! E-Recycle Scanner Library
//!
//! Resolves plastic bottle barcodes into an estimated bottle weight and a
//! reward points award, using:
//! - a built-in catalog of known bottles
//! - the Open Food Facts product database
//! - a digit-derived fallback estimate for unknown barcodes
//!
//! The resolver is transport-agnostic; `api` binds it to HTTP and the
//! `erecycle_scanner` binary binds it to the command line.

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::resolver::BarcodeResolver;
pub use crate::core::weight::{calculate_points, estimate_bottle_weight};
pub use models::config::ScannerConfig;
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{ExternalLookup, ExternalProduct, ProductEntry, ResolutionSource, ScanResult};
pub use providers::{DisabledLookup, OpenFoodFactsClient, ProductLookup};
pub use utils::telemetry::{ScanStats, StatsSnapshot};
