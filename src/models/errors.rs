//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so it can be traced in logs.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - SCAN_xxx: barcode validation errors
//! - API_xxx: request errors
//! - UPSTREAM_xxx: product database errors (never surfaced to callers)
//! - CFG_xxx: configuration errors

use std::fmt;

use crate::utils::constants::{INVALID_BARCODE_MESSAGE, MISSING_BARCODE_MESSAGE};

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// HTTP status the API layer answers with
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Scan Errors
    // ============================================
    /// Barcode is not all digits or shorter than 8 characters
    InvalidBarcode,
    /// Request carried no barcode
    MissingBarcode,

    // ============================================
    // API Errors
    // ============================================
    /// Malformed request body
    ApiBadRequest,

    // ============================================
    // Upstream (Open Food Facts) Errors
    // ============================================
    /// Connection failed or non-200 status
    UpstreamUnavailable,
    /// Request exceeded the lookup timeout
    UpstreamTimeout,
    /// Body could not be decoded
    UpstreamInvalidResponse,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Generic Errors
    // ============================================
    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidBarcode => "SCAN_INVALID_BARCODE",
            Self::MissingBarcode => "SCAN_MISSING_BARCODE",
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            Self::UpstreamInvalidResponse => "UPSTREAM_INVALID_RESPONSE",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidBarcode | Self::MissingBarcode | Self::ApiBadRequest => 400,
            Self::UpstreamUnavailable | Self::UpstreamInvalidResponse => 502,
            Self::UpstreamTimeout => 504,
            Self::ConfigInvalidValue | Self::Internal => 500,
        }
    }

    /// Upstream errors are recovered locally by falling through to the next tier
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable | Self::UpstreamTimeout | Self::UpstreamInvalidResponse
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Barcode rejected by the fallback validator
    pub fn invalid_barcode() -> Self {
        Self::new(ErrorCode::InvalidBarcode, INVALID_BARCODE_MESSAGE)
    }

    /// Request without a barcode
    pub fn missing_barcode() -> Self {
        Self::new(ErrorCode::MissingBarcode, MISSING_BARCODE_MESSAGE)
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// Product database unreachable or answered with an error status
    pub fn upstream_unavailable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamUnavailable, msg)
    }

    /// Invalid configuration value
    pub fn invalid_config(key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {:?}", key, value),
        )
    }

    /// Internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::with_source(ErrorCode::UpstreamTimeout, "Request timeout", err)
        } else if err.is_decode() {
            Self::with_source(ErrorCode::UpstreamInvalidResponse, "Malformed response body", err)
        } else if err.is_connect() {
            Self::with_source(ErrorCode::UpstreamUnavailable, "Connection failed", err)
        } else {
            Self::new(ErrorCode::UpstreamUnavailable, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::UpstreamInvalidResponse, "JSON parse error", err)
    }
}
