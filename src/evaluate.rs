//! Rate evaluation — which methods apply to a cart, and at what cost
//!
//! Pure functions over configuration and request snapshots: no I/O, no
//! clock, identical inputs always produce identical quotes. A method
//! whose criteria are not met is *inapplicable* (`None`), never an
//! error. An empty aggregate result means "no shipping available for
//! this destination/cart" and is a valid outcome.

use crate::cart::{Address, Cart};
use crate::method::ShippingMethod;
use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Quote one method against a cart/address pair
pub fn quote(method: &ShippingMethod, cart: &Cart, address: &Address) -> Option<RateQuote> {
    Evaluator::new().quote(method, cart, address)
}

/// Quote all eligible active methods, ordered by `display_order` ascending
pub fn quote_all(methods: &[ShippingMethod], cart: &Cart, address: &Address) -> Vec<RateQuote> {
    Evaluator::new().quote_all(methods, cart, address)
}

/// Rate evaluator
pub struct Evaluator {
    config: EvaluatorConfig,
}

/// Evaluator configuration
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Consider inactive methods too (admin preview)
    pub include_inactive: bool,
    /// Honor `free_shipping_threshold`; disable to preview rates with
    /// the override ignored
    pub apply_free_threshold: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            include_inactive: false,
            apply_free_threshold: true,
        }
    }
}

/// The computed result for one shipping method against one cart/address pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    /// Method code
    pub code: String,

    /// Method display name
    pub name: String,

    /// Final cost, rounded to 2 decimal places
    pub cost: Decimal,

    /// Whether the free-shipping override zeroed the cost
    pub is_free_shipping: bool,

    /// Display text carried from the method configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,

    /// How the cost was computed
    pub details: CostBreakdown,
}

/// Cost components of a quote
///
/// The breakdown reports the charges as computed; a free-shipping
/// override zeroes `cost` on the quote but leaves the waived charges
/// visible here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Configured base charge
    pub base_cost: Decimal,

    /// Tariff charge for the cart's total weight, rounded to 2 dp
    pub weight_charge: Decimal,

    /// Total cart weight in grams
    pub total_weight: u64,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            config: EvaluatorConfig::default(),
        }
    }

    pub fn with_config(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Quote one method. Returns `None` iff at least one eligibility
    /// check fails:
    ///
    /// 1. destination country is in `supported_countries`
    /// 2. cart total value is within `[min_order_value, max_order_value]`
    /// 3. total cart weight is within `[min_weight, max_weight]`
    ///
    /// All bounds are inclusive; absent maxima are unbounded.
    pub fn quote(
        &self,
        method: &ShippingMethod,
        cart: &Cart,
        address: &Address,
    ) -> Option<RateQuote> {
        let criteria = &method.criteria;

        if !method.ships_to(&address.country) {
            return None;
        }

        let total_value = cart.total_value();
        if total_value < criteria.min_order_value {
            return None;
        }
        if let Some(max) = criteria.max_order_value {
            if total_value > max {
                return None;
            }
        }

        let total_weight = cart.total_weight();
        if total_weight < criteria.min_weight {
            return None;
        }
        if let Some(max) = criteria.max_weight {
            if total_weight > max {
                return None;
            }
        }

        let weight_charge = method
            .tariff
            .as_ref()
            .map(|t| round_minor(t.charge_for(total_weight)))
            .unwrap_or(Decimal::ZERO);

        let mut cost = round_minor(method.base_cost + weight_charge);

        // Absent threshold means no override, never "free above zero"
        let is_free_shipping = self.config.apply_free_threshold
            && criteria
                .free_shipping_threshold
                .map(|threshold| total_value >= threshold)
                .unwrap_or(false);
        if is_free_shipping {
            cost = Decimal::ZERO;
        }

        Some(RateQuote {
            code: method.code.clone(),
            name: method.name.clone(),
            cost,
            is_free_shipping,
            estimated_delivery: method.estimated_delivery.clone(),
            details: CostBreakdown {
                base_cost: method.base_cost,
                weight_charge,
                total_weight,
            },
        })
    }

    /// Quote every considered method in ascending `display_order`,
    /// collecting the applicable ones. Output order follows
    /// `display_order`, not cost — callers wanting cheapest-first sort
    /// for themselves. Ties keep their input order.
    pub fn quote_all(
        &self,
        methods: &[ShippingMethod],
        cart: &Cart,
        address: &Address,
    ) -> Vec<RateQuote> {
        let mut considered: Vec<&ShippingMethod> = methods
            .iter()
            .filter(|m| m.is_active || self.config.include_inactive)
            .collect();
        considered.sort_by_key(|m| m.display_order);

        considered
            .iter()
            .filter_map(|m| self.quote(m, cart, address))
            .collect()
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to 2 decimal places, midpoint away from zero (currency minor units)
fn round_minor(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
