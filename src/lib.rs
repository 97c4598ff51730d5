// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # Shipquote — shipping rate evaluation
//!
//! Evaluates administrator-configured shipping methods against a cart
//! and destination address, producing rate quotes for checkout and
//! rate-listing flows.
//!
//! ## Core Concept
//!
//! Shipquote treats **method catalogs** as configuration data. A
//! catalog defines shipping methods, each with eligibility criteria
//! and a cost rule. From a loaded catalog, shipquote can:
//!
//! - **Quote** one method against a cart/address pair, or all of them
//! - **Validate** a catalog for malformed configuration before it
//!   produces wrong quotes
//! - **Serve** the storefront's rate-calculation contract as typed
//!   request/response values
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shipquote::{quote_all, Address, Cart, MethodCatalog};
//!
//! let catalog = MethodCatalog::from_yaml(r#"
//!   version: 1
//!   methods:
//!     - code: STANDARD
//!       name: Standard Delivery
//!       base_cost: 4.99
//!       criteria:
//!         supported_countries: [GB, IE]
//!         free_shipping_threshold: 60
//! "#)?;
//!
//! let quotes = quote_all(&catalog.methods, &cart, &address);
//! for quote in &quotes {
//!     println!("{}: {}", quote.code, quote.cost);
//! }
//! ```
//!
//! ## Catalog Format
//!
//! Catalogs are YAML. Criteria bounds are inclusive; weight tariffs
//! are configuration data, either pro-rata per kilogram or stepped
//! bands:
//!
//! ```yaml
//! version: 1
//! methods:
//!   - code: EXPRESS
//!     name: Express Delivery
//!     base_cost: 9.99
//!     tariff:
//!       free_allowance: 1000
//!       per_kg: 1.50
//!     criteria:
//!       supported_countries: [GB]
//!       min_order_value: 20
//!       max_weight: 20000
//!     display_order: 20
//! ```
//!
//! ## Evaluation Contract
//!
//! - A method whose criteria are not met is **inapplicable** — the
//!   quote is `None`, never an error.
//! - An empty aggregate result is a valid outcome: "no shipping
//!   available for this destination/cart."
//! - Aggregate output is ordered by `display_order` ascending, not by
//!   cost.
//! - Evaluation is pure: one configuration read, then in-memory
//!   computation. Admin edits take effect on the next catalog load.

// Core modules
pub mod cart;
pub mod catalog;
pub mod error;
pub mod method;

// Operations
pub mod api;
pub mod evaluate;
pub mod validate;

// Re-exports
pub use api::{
    calculate_rates, quote_method, validate_request, ApiResponse, CalculateRatesRequest,
    ShippingRates, SingleRate,
};
pub use cart::{Address, Cart, CartItem};
pub use catalog::MethodCatalog;
pub use error::{Error, Result};
pub use evaluate::{quote, quote_all, CostBreakdown, Evaluator, EvaluatorConfig, RateQuote};
pub use method::{
    Criteria, MethodMeta, PerKgTariff, ShippingMethod, WeightBand, WeightTariff,
};
pub use validate::{
    validate_catalog, validate_method, CatalogIssue, Severity, ValidationReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
