//! Weight units for precious metals and their conversion to value.
//!
//! Every conversion goes through grams: a weight is first expressed in grams
//! using a fixed multiplier, then priced per troy ounce.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1035;
pub const GRAMS_PER_VORI: f64 = 11.664;
pub const GRAMS_PER_ROTI: f64 = GRAMS_PER_VORI / 96.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetalUnit {
    #[default]
    Gram,
    TroyOunce,
    Vori,
    /// Gram of 21 carat gold.
    #[serde(rename = "21k")]
    Carat21,
    /// Gram of 22 carat gold.
    #[serde(rename = "22k")]
    Carat22,
    Roti,
}

impl MetalUnit {
    pub const ALL: [MetalUnit; 6] = [
        MetalUnit::Gram,
        MetalUnit::TroyOunce,
        MetalUnit::Vori,
        MetalUnit::Carat21,
        MetalUnit::Carat22,
        MetalUnit::Roti,
    ];

    /// Grams in one unit.
    pub fn grams_per_unit(&self) -> f64 {
        match self {
            MetalUnit::Gram | MetalUnit::Carat21 | MetalUnit::Carat22 => 1.0,
            MetalUnit::TroyOunce => GRAMS_PER_TROY_OUNCE,
            MetalUnit::Vori => GRAMS_PER_VORI,
            MetalUnit::Roti => GRAMS_PER_ROTI,
        }
    }

    pub fn purity(&self) -> f64 {
        match self {
            MetalUnit::Carat21 => 0.875,
            MetalUnit::Carat22 => 0.916,
            _ => 1.0,
        }
    }

    pub fn to_grams(&self, weight: f64) -> f64 {
        weight * self.grams_per_unit()
    }

    /// Value of `weight` at a price quoted per troy ounce, after purity.
    pub fn value(&self, weight: f64, price_per_ounce: f64) -> f64 {
        let grams = self.to_grams(weight.max(0.0));
        (grams / GRAMS_PER_TROY_OUNCE) * self.purity() * price_per_ounce
    }
}

/// Re-expresses a weight in another unit. Purity is not applied.
pub fn convert_weight(weight: f64, from: MetalUnit, to: MetalUnit) -> f64 {
    from.to_grams(weight) / to.grams_per_unit()
}

/// Lenient numeric parse used for every user-entered number. Anything that is
/// not a finite number reads as zero.
pub fn parse_number(text: &str) -> f64 {
    text.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Like [`parse_number`], but weights are never negative.
pub fn parse_weight(text: &str) -> f64 {
    parse_number(text).max(0.0)
}

impl Display for MetalUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MetalUnit::Gram => "g",
                MetalUnit::TroyOunce => "oz",
                MetalUnit::Vori => "vori",
                MetalUnit::Carat21 => "21k",
                MetalUnit::Carat22 => "22k",
                MetalUnit::Roti => "roti",
            }
        )
    }
}

impl FromStr for MetalUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(MetalUnit::Gram),
            "oz" | "ounce" | "troy-ounce" | "ozt" => Ok(MetalUnit::TroyOunce),
            "vori" | "bhori" => Ok(MetalUnit::Vori),
            "21k" | "21-carat" | "21ct" => Ok(MetalUnit::Carat21),
            "22k" | "22-carat" | "22ct" => Ok(MetalUnit::Carat22),
            "roti" | "rati" => Ok(MetalUnit::Roti),
            _ => Err(anyhow!("Invalid weight unit: {}", s)),
        }
    }
}
