//! Shipping method configuration — the core data model
//!
//! A `ShippingMethod` is an administrator-configured shipping option.
//! Each method has:
//! - A unique code for reference
//! - Eligibility criteria (destination country, order value, weight)
//! - A cost rule (base charge plus an optional weight tariff)
//!
//! ## Example Method
//!
//! ```yaml
//! code: STANDARD
//! name: "Standard Delivery"
//! description: "Tracked delivery within 3-5 business days"
//! base_cost: 4.99
//! tariff:
//!   free_allowance: 1000
//!   per_kg: 1.50
//! criteria:
//!   supported_countries: [GB, IE]
//!   min_order_value: 0
//!   max_order_value: 1000
//!   max_weight: 20000
//!   free_shipping_threshold: 60
//! estimated_delivery: "3-5 business days"
//! display_order: 10
//! ```

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A complete shipping method configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(
    title = "Shipping Method",
    description = "Administrator-configured shipping option"
)]
pub struct ShippingMethod {
    /// Unique short identifier (e.g. `STANDARD`, `EXPRESS`)
    pub code: String,

    /// Human-readable name
    pub name: String,

    /// Description shown to shoppers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Base monetary charge (currency minor units implicit, GBP)
    #[serde(default)]
    pub base_cost: Decimal,

    /// Weight tariff — additional charge from total cart weight.
    /// Absent means no weight-based charge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tariff: Option<WeightTariff>,

    /// Eligibility criteria
    #[serde(default)]
    pub criteria: Criteria,

    /// Inactive methods are excluded from aggregate evaluation
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Sort key for presenting multiple eligible methods
    #[serde(default)]
    pub display_order: i32,

    /// Display text, e.g. "3-5 business days"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,

    /// Metadata
    #[serde(default, skip_serializing_if = "MethodMeta::is_empty")]
    pub meta: MethodMeta,
}

fn default_true() -> bool {
    true
}

impl Default for ShippingMethod {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            description: None,
            base_cost: Decimal::ZERO,
            tariff: None,
            criteria: Criteria::default(),
            is_active: true,
            display_order: 0,
            estimated_delivery: None,
            meta: MethodMeta::default(),
        }
    }
}

/// Eligibility criteria for a shipping method
///
/// All bounds are inclusive. Absent maxima mean "unbounded". An absent
/// `free_shipping_threshold` means no override applies — it is never
/// treated as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Criteria {
    /// ISO 3166-1 alpha-2 country codes this method ships to.
    /// A method with an empty set is never selectable.
    #[serde(default)]
    pub supported_countries: Vec<String>,

    /// Minimum cart value (inclusive)
    #[serde(default)]
    pub min_order_value: Decimal,

    /// Maximum cart value (inclusive); absent means unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_order_value: Option<Decimal>,

    /// Minimum total cart weight in grams (inclusive)
    #[serde(default)]
    pub min_weight: u64,

    /// Maximum total cart weight in grams (inclusive); absent means unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<u64>,

    /// Order value at or above which the cost is waived entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_shipping_threshold: Option<Decimal>,
}

/// Weight tariff — how the weight charge is computed from total weight
///
/// Configuration data, not hardcoded logic: the evaluator treats the
/// tariff as parameterized. Both shapes must be monotonically
/// non-decreasing in weight; catalog validation enforces that.
///
/// # Examples
///
/// Pro-rata per-kilogram rate above a free allowance:
/// ```yaml
/// tariff:
///   free_allowance: 1000
///   per_kg: 1.50
/// ```
///
/// Stepped bands over total weight (last band may be open-ended):
/// ```yaml
/// tariff:
///   - up_to: 2000
///     charge: 0
///   - up_to: 10000
///     charge: 3.50
///   - charge: 8.00
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum WeightTariff {
    /// Charge per kilogram of weight above a free allowance
    PerKg(PerKgTariff),
    /// Stepped charges; the first band covering the total weight wins
    Banded(Vec<WeightBand>),
}

/// Pro-rata per-kilogram tariff
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct PerKgTariff {
    /// Grams carried free of weight charge
    #[serde(default)]
    pub free_allowance: u64,

    /// Charge per kilogram beyond the allowance
    pub per_kg: Decimal,
}

/// One band of a stepped tariff
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct WeightBand {
    /// Upper bound in grams (inclusive); absent means open-ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<u64>,

    /// Charge applied when this band covers the total weight
    pub charge: Decimal,
}

/// Method metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MethodMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl MethodMeta {
    pub fn is_empty(&self) -> bool {
        self.version.is_none()
            && self.author.is_none()
            && self.created.is_none()
            && self.updated.is_none()
            && self.tags.is_empty()
    }
}

impl ShippingMethod {
    /// Parse a method from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::Method(e.to_string()))
    }

    /// Serialize the method to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::Method(e.to_string()))
    }

    /// Parse a method from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Method(e.to_string()))
    }

    /// Serialize the method to a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Method(e.to_string()))
    }

    /// Compute hash of the method for change detection
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let content = self.to_yaml().unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }

    /// Whether this method ships to the given country (ASCII-case-insensitive)
    pub fn ships_to(&self, country: &str) -> bool {
        self.criteria
            .supported_countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country))
    }
}

impl WeightTariff {
    /// Charge for a given total weight in grams.
    ///
    /// For a banded tariff with no covering band (all bands bounded and
    /// the weight exceeds the last), the last band's charge applies —
    /// bands are validated to be non-decreasing, so this keeps the
    /// charge monotonic instead of silently dropping back to zero.
    pub fn charge_for(&self, total_weight: u64) -> Decimal {
        match self {
            WeightTariff::PerKg(t) => {
                let excess = total_weight.saturating_sub(t.free_allowance);
                if excess == 0 {
                    return Decimal::ZERO;
                }
                t.per_kg * Decimal::from(excess) / Decimal::from(1000u64)
            }
            WeightTariff::Banded(bands) => {
                for band in bands {
                    match band.up_to {
                        Some(limit) if total_weight <= limit => return band.charge,
                        None => return band.charge,
                        Some(_) => continue,
                    }
                }
                bands.last().map(|b| b.charge).unwrap_or(Decimal::ZERO)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
code: STANDARD
name: Standard Delivery
base_cost: 4.99
criteria:
  supported_countries: [GB, IE]
  max_order_value: 1000
"#;
        let method = ShippingMethod::from_yaml(yaml).unwrap();
        assert_eq!(method.code, "STANDARD");
        assert_eq!(method.base_cost, Decimal::new(499, 2));
        assert!(method.is_active);
        assert_eq!(method.criteria.supported_countries.len(), 2);
        assert_eq!(method.criteria.min_order_value, Decimal::ZERO);
        assert_eq!(method.criteria.max_order_value, Some(Decimal::from(1000)));
        assert!(method.criteria.free_shipping_threshold.is_none());
    }

    #[test]
    fn test_parse_per_kg_tariff() {
        let yaml = r#"
code: EXPRESS
name: Express
base_cost: 9.99
tariff:
  free_allowance: 1000
  per_kg: 1.50
"#;
        let method = ShippingMethod::from_yaml(yaml).unwrap();
        match method.tariff {
            Some(WeightTariff::PerKg(ref t)) => {
                assert_eq!(t.free_allowance, 1000);
                assert_eq!(t.per_kg, Decimal::new(150, 2));
            }
            other => panic!("expected per-kg tariff, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_banded_tariff() {
        let yaml = r#"
code: BULKY
name: Bulky Goods
base_cost: 0
tariff:
  - up_to: 2000
    charge: 0
  - up_to: 10000
    charge: 3.50
  - charge: 8.00
"#;
        let method = ShippingMethod::from_yaml(yaml).unwrap();
        match method.tariff {
            Some(WeightTariff::Banded(ref bands)) => {
                assert_eq!(bands.len(), 3);
                assert_eq!(bands[2].up_to, None);
            }
            other => panic!("expected banded tariff, got {:?}", other),
        }
    }

    #[test]
    fn test_per_kg_charge() {
        let tariff = WeightTariff::PerKg(PerKgTariff {
            free_allowance: 1000,
            per_kg: Decimal::from(2),
        });
        assert_eq!(tariff.charge_for(0), Decimal::ZERO);
        assert_eq!(tariff.charge_for(1000), Decimal::ZERO);
        // 500g over allowance at 2/kg = 1.00
        assert_eq!(tariff.charge_for(1500), Decimal::from(1));
        assert_eq!(tariff.charge_for(3000), Decimal::from(4));
    }

    #[test]
    fn test_banded_charge() {
        let tariff = WeightTariff::Banded(vec![
            WeightBand {
                up_to: Some(2000),
                charge: Decimal::ZERO,
            },
            WeightBand {
                up_to: Some(10_000),
                charge: Decimal::new(350, 2),
            },
            WeightBand {
                up_to: None,
                charge: Decimal::from(8),
            },
        ]);
        assert_eq!(tariff.charge_for(0), Decimal::ZERO);
        assert_eq!(tariff.charge_for(2000), Decimal::ZERO);
        assert_eq!(tariff.charge_for(2001), Decimal::new(350, 2));
        assert_eq!(tariff.charge_for(10_000), Decimal::new(350, 2));
        assert_eq!(tariff.charge_for(50_000), Decimal::from(8));
    }

    #[test]
    fn test_banded_charge_all_bounded() {
        // Weight past the last bounded band keeps the last charge
        let tariff = WeightTariff::Banded(vec![WeightBand {
            up_to: Some(1000),
            charge: Decimal::from(2),
        }]);
        assert_eq!(tariff.charge_for(5000), Decimal::from(2));
    }

    #[test]
    fn test_ships_to_case_insensitive() {
        let method = ShippingMethod {
            code: "STANDARD".into(),
            name: "Standard".into(),
            criteria: Criteria {
                supported_countries: vec!["GB".into(), "IE".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(method.ships_to("GB"));
        assert!(method.ships_to("gb"));
        assert!(!method.ships_to("ES"));
    }

    #[test]
    fn test_yaml_round_trip_skips_absent_threshold() {
        let method = ShippingMethod {
            code: "X".into(),
            name: "X".into(),
            is_active: true,
            ..Default::default()
        };
        let yaml = method.to_yaml().unwrap();
        assert!(!yaml.contains("free_shipping_threshold"));
    }

    #[test]
    fn test_hash_stable() {
        let method = ShippingMethod::from_yaml("code: A\nname: A\n").unwrap();
        assert_eq!(method.hash(), method.hash());
        assert!(method.hash().starts_with("sha256:"));
    }
}
