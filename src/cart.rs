//! Cart and address snapshots — the request side of rate evaluation
//!
//! These are ephemeral values constructed per checkout or rate-listing
//! request and discarded after the response. They deserialize from the
//! storefront's camelCase wire format.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One line of a cart
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product reference
    pub product_id: String,

    /// Units of this product
    pub quantity: u32,

    /// Weight per unit in grams; missing weight contributes 0
    #[serde(default)]
    pub weight: u64,

    /// Price per unit
    #[serde(default)]
    pub unit_price: Decimal,
}

/// A snapshot of a cart at evaluation time
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart lines
    #[serde(default)]
    pub items: Vec<CartItem>,

    /// Supplied cart total; when absent the total is derived from items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Decimal>,
}

/// Destination address snapshot
///
/// Only `country` participates in evaluation; the rest is display data
/// carried through from the storefront.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// ISO 3166-1 alpha-2 country code
    pub country: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Cart {
    /// Total cart value: the supplied total when present, otherwise the
    /// sum of `unit_price * quantity` over all items.
    pub fn total_value(&self) -> Decimal {
        if let Some(total) = self.total_value {
            return total;
        }
        self.items
            .iter()
            .map(|item| item.unit_price * Decimal::from(item.quantity))
            .sum()
    }

    /// Total cart weight in grams: `weight * quantity` over all items.
    /// Zero-weight and zero-quantity items contribute nothing.
    pub fn total_weight(&self) -> u64 {
        self.items
            .iter()
            .map(|item| item.weight * u64::from(item.quantity))
            .sum()
    }
}

impl Address {
    pub fn new(country: &str) -> Self {
        Self {
            country: country.to_string(),
            city: None,
            postal_code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, weight: u64, unit_price: Decimal) -> CartItem {
        CartItem {
            product_id: "P1".into(),
            quantity,
            weight,
            unit_price,
        }
    }

    #[test]
    fn test_derived_total_value() {
        let cart = Cart {
            items: vec![
                item(2, 500, Decimal::new(1050, 2)),
                item(1, 0, Decimal::new(399, 2)),
            ],
            total_value: None,
        };
        // 2 * 10.50 + 3.99
        assert_eq!(cart.total_value(), Decimal::new(2499, 2));
    }

    #[test]
    fn test_supplied_total_wins() {
        let cart = Cart {
            items: vec![item(2, 500, Decimal::from(10))],
            total_value: Some(Decimal::from(45)),
        };
        assert_eq!(cart.total_value(), Decimal::from(45));
    }

    #[test]
    fn test_total_weight() {
        let cart = Cart {
            items: vec![item(2, 500, Decimal::ZERO), item(3, 100, Decimal::ZERO)],
            total_value: None,
        };
        assert_eq!(cart.total_weight(), 1300);
    }

    #[test]
    fn test_zero_weight_and_quantity_items() {
        let cart = Cart {
            items: vec![item(0, 500, Decimal::from(5)), item(4, 0, Decimal::from(5))],
            total_value: None,
        };
        assert_eq!(cart.total_weight(), 0);
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::default();
        assert_eq!(cart.total_value(), Decimal::ZERO);
        assert_eq!(cart.total_weight(), 0);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = r#"{
            "productId": "SKU-1",
            "quantity": 2,
            "weight": 250,
            "unitPrice": 12.50
        }"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.product_id, "SKU-1");
        assert_eq!(item.unit_price, Decimal::new(1250, 2));
    }

    #[test]
    fn test_missing_weight_defaults_to_zero() {
        let json = r#"{"productId": "SKU-1", "quantity": 3}"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.weight, 0);
        assert_eq!(item.unit_price, Decimal::ZERO);
    }
}
