//! The external rate-calculation contract
//!
//! Wire types and entry points for the two callers of the evaluator:
//! the rate-listing endpoint (all eligible methods for a cart/address
//! pair) and the checkout flow (one specific method's cost). The HTTP
//! layer itself lives elsewhere; this module owns the request/response
//! shapes and the boundary validation in front of the evaluator.
//!
//! ```json
//! {
//!   "cartItems": [
//!     { "productId": "SKU-1", "quantity": 2, "weight": 250, "unitPrice": 12.50 }
//!   ],
//!   "shippingAddress": { "country": "GB" }
//! }
//! ```

use crate::cart::{Address, Cart, CartItem};
use crate::catalog::MethodCatalog;
use crate::error::{Error, Result};
use crate::evaluate::{Evaluator, RateQuote};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Body of a rate-calculation request
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(title = "Calculate Rates Request")]
pub struct CalculateRatesRequest {
    /// Cart lines
    pub cart_items: Vec<CartItem>,

    /// Destination address
    pub shipping_address: Address,

    /// Supplied cart total; derived from items when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Decimal>,
}

/// Response envelope; errors travel out-of-band as `Error`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Payload of the aggregate rate listing
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRates {
    pub shipping_rates: Vec<RateQuote>,
}

/// Payload of a single-method quote
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SingleRate {
    pub rate: RateQuote,
}

impl CalculateRatesRequest {
    /// Split the request into evaluator inputs
    pub fn snapshots(&self) -> (Cart, Address) {
        let cart = Cart {
            items: self.cart_items.clone(),
            total_value: self.total_value,
        };
        (cart, self.shipping_address.clone())
    }
}

/// Reject malformed input at the boundary, before the evaluator runs.
///
/// The evaluator assumes well-formed input; an unsupported country is a
/// legitimate empty result, but a *blank* country or an empty cart is a
/// caller bug and comes back as `InvalidRequest`.
pub fn validate_request(request: &CalculateRatesRequest) -> Result<()> {
    if request.shipping_address.country.trim().is_empty() {
        return Err(Error::InvalidRequest(
            "shippingAddress.country is required".into(),
        ));
    }
    if request.cart_items.is_empty() {
        return Err(Error::InvalidRequest("cartItems must not be empty".into()));
    }
    for (i, item) in request.cart_items.iter().enumerate() {
        if item.product_id.trim().is_empty() {
            return Err(Error::InvalidRequest(format!(
                "cartItems[{}].productId is required",
                i
            )));
        }
    }
    Ok(())
}

/// All eligible rates for the request, ordered by display order.
///
/// An empty list is a success ("no shipping available"), not an error.
pub fn calculate_rates(
    catalog: &MethodCatalog,
    request: &CalculateRatesRequest,
) -> Result<ApiResponse<ShippingRates>> {
    validate_request(request)?;
    let (cart, address) = request.snapshots();

    let quotes = Evaluator::new().quote_all(&catalog.methods, &cart, &address);

    Ok(ApiResponse {
        success: true,
        data: ShippingRates {
            shipping_rates: quotes,
        },
    })
}

/// One specific method's cost for the request (checkout flow).
///
/// Unknown codes are `UnknownMethod`; a known method that is inactive
/// or whose criteria the cart fails is `MethodNotAvailable`.
pub fn quote_method(
    catalog: &MethodCatalog,
    code: &str,
    request: &CalculateRatesRequest,
) -> Result<ApiResponse<SingleRate>> {
    validate_request(request)?;
    let (cart, address) = request.snapshots();

    let method = catalog
        .get(code)
        .ok_or_else(|| Error::UnknownMethod(code.to_string()))?;
    if !method.is_active {
        return Err(Error::MethodNotAvailable(method.code.clone()));
    }

    let quote = Evaluator::new()
        .quote(method, &cart, &address)
        .ok_or_else(|| Error::MethodNotAvailable(method.code.clone()))?;

    Ok(ApiResponse {
        success: true,
        data: SingleRate { rate: quote },
    })
}
