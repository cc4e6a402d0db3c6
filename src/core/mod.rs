//! Core Module - Business Logic
//!
//! Catalog, weight estimation, points and the barcode resolver. No I/O here
//! except through the `ProductLookup` seam.

pub mod catalog;
pub mod resolver;
pub mod weight;

pub use resolver::*;
pub use weight::*;
