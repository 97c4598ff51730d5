//! Catalog validation
//!
//! Rejects malformed configuration at load/admin time rather than
//! producing wrong quotes at evaluation time. Issues carry stable codes
//! so admin tooling can match on them.

use crate::catalog::MethodCatalog;
use crate::method::{ShippingMethod, WeightTariff};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A validation issue found in a catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    /// Method code the issue belongs to, if method-scoped
    pub method: Option<String>,
}

impl CatalogIssue {
    pub fn error(code: &str, message: &str, method: Option<&str>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            message: message.to_string(),
            method: method.map(|m| m.to_string()),
        }
    }

    pub fn warning(code: &str, message: &str, method: Option<&str>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message: message.to_string(),
            method: method.map(|m| m.to_string()),
        }
    }
}

/// Result of catalog validation
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<CatalogIssue>,
    pub methods_checked: usize,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Whether the catalog passes; strict mode treats warnings as errors
    pub fn passed(&self, strict: bool) -> bool {
        !self.has_errors() && !(strict && self.has_warnings())
    }

    /// Human-readable report
    pub fn to_report(&self) -> String {
        let mut out = String::new();
        for issue in &self.issues {
            let marker = match issue.severity {
                Severity::Error => "✗",
                Severity::Warning => "⚠",
            };
            let scope = issue
                .method
                .as_deref()
                .map(|m| format!(" [{}]", m))
                .unwrap_or_default();
            out.push_str(&format!(
                "{} {}{}: {}\n",
                marker, issue.code, scope, issue.message
            ));
        }
        out.push_str(&format!(
            "\n{} method(s) checked: {} error(s), {} warning(s)\n",
            self.methods_checked,
            self.error_count(),
            self.warning_count()
        ));
        out
    }
}

/// Validate one shipping method
pub fn validate_method(method: &ShippingMethod) -> ValidationReport {
    let mut report = ValidationReport {
        methods_checked: 1,
        ..Default::default()
    };
    check_method(method, &mut report);
    report
}

/// Validate a whole catalog
pub fn validate_catalog(catalog: &MethodCatalog) -> ValidationReport {
    let mut report = ValidationReport {
        methods_checked: catalog.methods.len(),
        ..Default::default()
    };

    if catalog.version != 1 {
        report.issues.push(CatalogIssue::error(
            "E011",
            &format!(
                "Unsupported catalog version: {}. Only version 1 is supported.",
                catalog.version
            ),
            None,
        ));
    }

    if catalog.methods.is_empty() {
        report.issues.push(CatalogIssue::warning(
            "W004",
            "Catalog has no methods; every rate request will come back empty",
            None,
        ));
    }

    // Duplicate codes are also rejected at load time; re-checked here so
    // hand-built catalogs get the same diagnostics
    let mut seen = HashSet::new();
    for method in &catalog.methods {
        if !seen.insert(method.code.to_ascii_uppercase()) {
            report.issues.push(CatalogIssue::error(
                "E010",
                &format!("Duplicate method code: {}", method.code),
                Some(&method.code),
            ));
        }
    }

    for method in &catalog.methods {
        check_method(method, &mut report);
    }

    report
}

fn check_method(method: &ShippingMethod, report: &mut ValidationReport) {
    let code = if method.code.is_empty() {
        None
    } else {
        Some(method.code.as_str())
    };

    if method.code.is_empty() {
        report
            .issues
            .push(CatalogIssue::error("E001", "Method code is required", None));
    }

    if method.name.is_empty() {
        report.issues.push(CatalogIssue::error(
            "E002",
            "Method name is required",
            code,
        ));
    }

    if method.base_cost < Decimal::ZERO {
        report.issues.push(CatalogIssue::error(
            "E003",
            &format!("Base cost cannot be negative: {}", method.base_cost),
            code,
        ));
    }

    let criteria = &method.criteria;

    if let Some(max) = criteria.max_order_value {
        if criteria.min_order_value > max {
            report.issues.push(CatalogIssue::error(
                "E004",
                &format!(
                    "min_order_value {} exceeds max_order_value {}",
                    criteria.min_order_value, max
                ),
                code,
            ));
        }
    }

    if let Some(max) = criteria.max_weight {
        if criteria.min_weight > max {
            report.issues.push(CatalogIssue::error(
                "E005",
                &format!(
                    "min_weight {}g exceeds max_weight {}g",
                    criteria.min_weight, max
                ),
                code,
            ));
        }
    }

    if let Some(threshold) = criteria.free_shipping_threshold {
        if threshold < Decimal::ZERO {
            report.issues.push(CatalogIssue::error(
                "E006",
                &format!("free_shipping_threshold cannot be negative: {}", threshold),
                code,
            ));
        } else {
            report.issues.push(CatalogIssue::warning(
                "W005",
                "free_shipping_threshold is configured; this override is slated for removal",
                code,
            ));
        }
    }

    if criteria.supported_countries.is_empty() {
        report.issues.push(CatalogIssue::warning(
            "W001",
            "supported_countries is empty; this method is never selectable",
            code,
        ));
    }

    for country in &criteria.supported_countries {
        let well_formed = country.len() == 2 && country.chars().all(|c| c.is_ascii_uppercase());
        if !well_formed {
            report.issues.push(CatalogIssue::warning(
                "W002",
                &format!(
                    "Country code '{}' is not an uppercase ISO 3166-1 alpha-2 code",
                    country
                ),
                code,
            ));
        }
    }

    if let Some(tariff) = &method.tariff {
        check_tariff(tariff, code, report);
    }
}

fn check_tariff(tariff: &WeightTariff, code: Option<&str>, report: &mut ValidationReport) {
    match tariff {
        WeightTariff::PerKg(t) => {
            if t.per_kg < Decimal::ZERO {
                report.issues.push(CatalogIssue::error(
                    "E007",
                    &format!("Tariff per_kg rate cannot be negative: {}", t.per_kg),
                    code,
                ));
            } else if t.per_kg == Decimal::ZERO {
                report.issues.push(CatalogIssue::warning(
                    "W003",
                    "Tariff per_kg rate is zero; the tariff never charges anything",
                    code,
                ));
            }
        }
        WeightTariff::Banded(bands) => {
            if bands.is_empty() {
                report.issues.push(CatalogIssue::warning(
                    "W006",
                    "Banded tariff has no bands; no weight charge will apply",
                    code,
                ));
                return;
            }

            let mut prev_limit: Option<u64> = None;
            let mut prev_charge: Option<Decimal> = None;
            for (i, band) in bands.iter().enumerate() {
                if band.charge < Decimal::ZERO {
                    report.issues.push(CatalogIssue::error(
                        "E007",
                        &format!("Band charge cannot be negative: {}", band.charge),
                        code,
                    ));
                }

                match band.up_to {
                    Some(limit) => {
                        if let Some(prev) = prev_limit {
                            if limit <= prev {
                                report.issues.push(CatalogIssue::error(
                                    "E008",
                                    &format!(
                                        "Band limits must be strictly ascending: {}g after {}g",
                                        limit, prev
                                    ),
                                    code,
                                ));
                            }
                        }
                        prev_limit = Some(limit);
                    }
                    None => {
                        if i != bands.len() - 1 {
                            report.issues.push(CatalogIssue::error(
                                "E008",
                                "Open-ended band must be the last band",
                                code,
                            ));
                        }
                    }
                }

                if let Some(prev) = prev_charge {
                    if band.charge < prev {
                        report.issues.push(CatalogIssue::error(
                            "E009",
                            &format!(
                                "Band charges must be non-decreasing: {} after {}",
                                band.charge, prev
                            ),
                            code,
                        ));
                    }
                }
                prev_charge = Some(band.charge);
            }
        }
    }
}
