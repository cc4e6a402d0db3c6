//! Providers Module - External Data Sources
//!
//! Product metadata lookups. Open Food Facts is the only backend today.

pub mod lookup;
pub mod openfoodfacts;

pub use lookup::*;
pub use openfoodfacts::*;
