//! Open Food Facts API Client
//!
//! Used for product metadata ONLY: display name and the free-text quantity
//! from which the bottle weight is estimated.
//!
//! API: https://world.openfoodfacts.org/api/v2/product/{barcode}.json
//! Free, no API key required. One request per lookup, no retries.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::lookup::ProductLookup;
use crate::core::weight::estimate_bottle_weight;
use crate::models::config::ScannerConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ExternalLookup, ExternalProduct};
use crate::utils::constants::{UNKNOWN_PRODUCT_NAME, USER_AGENT};

/// Open Food Facts product response
#[derive(Debug, Deserialize)]
pub struct OffResponse {
    /// 1 = product found
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub product: Option<Map<String, Value>>,
}

/// The subset of the product record we use
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OffProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    /// Free text, e.g. "600 ml" or "1,5 L"
    #[serde(default)]
    pub quantity: Option<String>,
}

impl OffProduct {
    /// Display name: "{brands} {product_name} ({quantity})"
    pub fn display_name(&self) -> String {
        let product_name = non_empty(&self.product_name).unwrap_or(UNKNOWN_PRODUCT_NAME);
        let mut name = match non_empty(&self.brands) {
            Some(brands) => format!("{} {}", brands, product_name).trim().to_string(),
            None => product_name.to_string(),
        };
        if let Some(quantity) = non_empty(&self.quantity) {
            name.push_str(&format!(" ({})", quantity));
        }
        name
    }

    /// Convert into the resolver-facing record, estimating weight from quantity
    pub fn into_external(self) -> ExternalProduct {
        let name = self.display_name();
        let quantity_text = self.quantity.unwrap_or_default();
        ExternalProduct {
            name,
            brand: self.brands.unwrap_or_default(),
            weight_kg: estimate_bottle_weight(&quantity_text),
            quantity_text,
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Open Food Facts API client
pub struct OpenFoodFactsClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl OpenFoodFactsClient {
    /// Client for an arbitrary endpoint (mirrors, local test servers)
    pub fn with_base_url(base_url: &str, timeout: Duration) -> AppResult<Self> {
        Self::build(base_url, timeout, USER_AGENT)
    }

    pub fn from_config(config: &ScannerConfig) -> AppResult<Self> {
        Self::build(&config.off_base_url, config.lookup_timeout, &config.user_agent)
    }

    fn build(base_url: &str, timeout: Duration, user_agent: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::invalid_config("OFF_BASE_URL", &format!("{} ({})", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::invalid_config("OFF_BASE_URL", base_url.as_str()));
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// `<base>/api/v2/product/{barcode}.json`, with the barcode percent-encoded
    pub fn product_url(&self, barcode: &str) -> Url {
        let file_name = format!("{}.json", barcode);
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v2", "product", file_name.as_str()]);
        }
        url
    }

    /// Fetch the product record
    ///
    /// `Ok(None)` when the database answers but does not know the barcode.
    pub async fn fetch_product(&self, barcode: &str) -> AppResult<Option<OffProduct>> {
        let url = self.product_url(barcode);

        debug!(barcode = %barcode, url = %url, "Open Food Facts: fetching product");

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(AppError::upstream_unavailable(format!(
                "Open Food Facts API error: {}",
                response.status()
            )));
        }

        let body = response.bytes().await?;
        let data: OffResponse = serde_json::from_slice(&body)?;

        if data.status != Some(1) {
            return Ok(None);
        }

        match data.product {
            Some(product) if !product.is_empty() => {
                let product: OffProduct = serde_json::from_value(Value::Object(product))?;
                Ok(Some(product))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl ProductLookup for OpenFoodFactsClient {
    async fn lookup(&self, barcode: &str) -> ExternalLookup {
        match self.fetch_product(barcode).await {
            Ok(Some(product)) => {
                let product = product.into_external();
                info!(
                    barcode = %barcode,
                    name = %product.name,
                    weight_kg = product.weight_kg,
                    "Open Food Facts: product found"
                );
                ExternalLookup::Found(product)
            }
            Ok(None) => {
                debug!(barcode = %barcode, "Open Food Facts: product not found");
                ExternalLookup::NotFound
            }
            Err(e) if e.code.is_upstream() => {
                warn!(barcode = %barcode, code = e.code_str(), "Open Food Facts API error: {}", e);
                ExternalLookup::NotFound
            }
            Err(e) => {
                error!(barcode = %barcode, code = e.code_str(), "Open Food Facts lookup failed: {}", e);
                ExternalLookup::NotFound
            }
        }
    }
}
