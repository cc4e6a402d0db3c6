//! Constants Module - Single Source of Truth
//!
//! Fixed labels, messages and numeric defaults used by the scanner.
//! Other modules refer to these instead of repeating literals.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "E-Recycle Scanner";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for outbound HTTP requests
pub const USER_AGENT: &str = "E-Recycle/1.0";

/// Static liveness message returned by `GET /`
pub const SERVICE_STATUS: &str = "E-Recycle AI Service Running";

// ============================================
// SCAN RESULT LABELS
// ============================================

/// Every accepted scan is classified as a PET bottle
pub const TRASH_TYPE_PET: &str = "Botol Plastik (PET)";

/// Product name used by the fallback estimator
pub const UNKNOWN_BOTTLE_NAME: &str = "Botol Plastik (Unknown)";

/// Product name used when the external record has no `product_name`
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// Prefix of the result message
pub const VERIFIED_PREFIX: &str = "Verified: ";

/// Rejection message for malformed barcodes (8+ digits required)
pub const INVALID_BARCODE_MESSAGE: &str = "Format barcode tidak valid. Harus 8+ digit angka.";

/// Rejection message for requests without a barcode
pub const MISSING_BARCODE_MESSAGE: &str = "No barcode provided";

// ============================================
// WEIGHT & POINTS
// ============================================

/// Weight used when the quantity text is missing or unparseable (15 g)
pub const DEFAULT_BOTTLE_WEIGHT_KG: f64 = 0.015;

/// Base bottle weight in grams before the volume term
pub const BOTTLE_BASE_GRAMS: f64 = 10.0;

/// Grams of plastic per millilitre of volume
pub const GRAMS_PER_ML: f64 = 0.02;

/// Lower clamp for estimated bottle weight
pub const MIN_BOTTLE_GRAMS: f64 = 8.0;

/// Upper clamp for estimated bottle weight
pub const MAX_BOTTLE_GRAMS: f64 = 50.0;

/// Reward points per kilogram
pub const POINTS_PER_KG: f64 = 1000.0;

/// Minimum points for any accepted scan
pub const MIN_POINTS: u32 = 5;

/// Minimum barcode length accepted by the fallback estimator
pub const MIN_BARCODE_LEN: usize = 8;

/// Seed used when the last four barcode characters do not parse
pub const FALLBACK_SEED: u32 = 999;

/// Fallback weight = (seed mod MODULUS) + OFFSET grams
pub const FALLBACK_GRAMS_MODULUS: u32 = 25;
pub const FALLBACK_GRAMS_OFFSET: u32 = 15;

// ============================================
// EXTERNAL SERVICE DEFAULTS
// ============================================

/// Open Food Facts public endpoint
pub const DEFAULT_OFF_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Request timeout for product lookups (seconds)
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 5;

// ============================================
// SERVER DEFAULTS
// ============================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
