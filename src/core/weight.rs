//! Bottle weight estimation and reward points
//!
//! Pure functions only. Every weight leaving this module is rounded to
//! three decimals (gram precision) before points are derived from it.

use regex::Regex;

use crate::utils::constants::{
    BOTTLE_BASE_GRAMS, DEFAULT_BOTTLE_WEIGHT_KG, FALLBACK_GRAMS_MODULUS, FALLBACK_GRAMS_OFFSET,
    FALLBACK_SEED, GRAMS_PER_ML, MAX_BOTTLE_GRAMS, MIN_BOTTLE_GRAMS, MIN_POINTS, POINTS_PER_KG,
};

lazy_static::lazy_static! {
    /// First number, optional whitespace, optional unit. Alternation order
    /// matters: "litre" and "liter" match as "l".
    static ref VOLUME_PATTERN: Regex =
        Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(ml|l|cl|litre|liter)?")
            .expect("Invalid volume regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VolumeUnit {
    Millilitre,
    Centilitre,
    Litre,
}

impl VolumeUnit {
    /// Unit token as captured; no token means millilitres
    fn from_token(token: Option<&str>) -> Self {
        match token.map(|t| t.to_ascii_lowercase()).as_deref() {
            Some("l" | "litre" | "liter") => Self::Litre,
            Some("cl") => Self::Centilitre,
            _ => Self::Millilitre,
        }
    }

    fn to_ml(self, value: f64) -> f64 {
        match self {
            Self::Litre => value * 1000.0,
            Self::Centilitre => value * 10.0,
            Self::Millilitre => value,
        }
    }
}

/// Round to 3 decimal places, halves away from zero
///
/// Same result as the web app's `Math.round(x * 1000) / 1000`, so a
/// half-gram estimate such as 19.5 g becomes 0.020.
#[inline]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Estimate empty PET bottle weight (kg) from a free-text quantity
///
/// `"600 ml"` -> 0.022, `"1.5 L"` -> 0.040, anything without a number -> 0.015.
/// The result always lies in `[0.008, 0.050]`.
pub fn estimate_bottle_weight(quantity_text: &str) -> f64 {
    if quantity_text.is_empty() {
        return DEFAULT_BOTTLE_WEIGHT_KG;
    }

    let Some(ml) = parse_volume_ml(quantity_text) else {
        return DEFAULT_BOTTLE_WEIGHT_KG;
    };

    let grams = (BOTTLE_BASE_GRAMS + ml * GRAMS_PER_ML).clamp(MIN_BOTTLE_GRAMS, MAX_BOTTLE_GRAMS);
    round3(grams / 1000.0)
}

/// Millilitres from the first volume in the text, case-insensitive
fn parse_volume_ml(text: &str) -> Option<f64> {
    let caps = VOLUME_PATTERN.captures(text)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = VolumeUnit::from_token(caps.get(2).map(|m| m.as_str()));
    Some(unit.to_ml(value))
}

/// Per-barcode variation added to catalog weights: `(last digit mod 5) / 1000`
///
/// A non-digit final character contributes nothing.
pub fn catalog_variation_kg(barcode: &str) -> f64 {
    let last_digit = barcode
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .unwrap_or(0);
    f64::from(last_digit % 5) / 1000.0
}

/// Catalog weight: base plus variation, rounded
pub fn catalog_weight_kg(base_weight_kg: f64, barcode: &str) -> f64 {
    round3(base_weight_kg + catalog_variation_kg(barcode))
}

/// Seed for the fallback estimator: last four characters as an integer,
/// or 999 when they do not parse
pub fn fallback_seed(barcode: &str) -> u32 {
    let tail_start = barcode
        .char_indices()
        .rev()
        .nth(3)
        .map(|(i, _)| i)
        .unwrap_or(0);
    barcode[tail_start..].parse().unwrap_or(FALLBACK_SEED)
}

/// Fallback weight in kg: `(seed mod 25) + 15` grams
pub fn fallback_weight_kg(barcode: &str) -> f64 {
    let grams = fallback_seed(barcode) % FALLBACK_GRAMS_MODULUS + FALLBACK_GRAMS_OFFSET;
    round3(f64::from(grams) / 1000.0)
}

/// Reward points: 1000 per kg, floored, never below 5
pub fn calculate_points(weight_kg: f64) -> u32 {
    let points = (POINTS_PER_KG * weight_kg).floor();
    if points < f64::from(MIN_POINTS) {
        MIN_POINTS
    } else {
        points as u32
    }
}
