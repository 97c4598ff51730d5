//! Method catalogs — loading shipping-method configuration
//!
//! A catalog is the persisted set of shipping methods, maintained by
//! admin tooling and read-only here. It loads from a single YAML file:
//!
//! ```yaml
//! version: 1
//! methods:
//!   - code: STANDARD
//!     name: Standard Delivery
//!     base_cost: 4.99
//!     criteria:
//!       supported_countries: [GB, IE]
//! ```
//!
//! or from a directory of `*.yaml`/`*.yml` files, each holding either a
//! catalog or a bare method, merged in sorted file order. There is no
//! caching: a fresh load observes whatever the administrator last
//! wrote.

use crate::error::{Error, Result};
use crate::method::ShippingMethod;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Supported catalog schema version
const CATALOG_VERSION: u32 = 1;

/// A set of shipping methods
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Method Catalog", description = "Shipping method configuration set")]
pub struct MethodCatalog {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// The configured methods
    #[serde(default)]
    pub methods: Vec<ShippingMethod>,
}

fn default_version() -> u32 {
    CATALOG_VERSION
}

impl Default for MethodCatalog {
    fn default() -> Self {
        Self {
            version: CATALOG_VERSION,
            methods: Vec::new(),
        }
    }
}

impl MethodCatalog {
    /// Parse a catalog from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: MethodCatalog =
            serde_norway::from_str(yaml).map_err(|e| Error::Catalog(e.to_string()))?;
        catalog.check_version()?;
        catalog.check_unique_codes()?;
        Ok(catalog)
    }

    /// Serialize the catalog to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::Catalog(e.to_string()))
    }

    /// Load a catalog from a YAML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_yaml(&content)
            .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))
    }

    /// Load a catalog from a directory of `*.yaml`/`*.yml` files.
    ///
    /// Each file holds either a catalog or a bare method. Files merge in
    /// sorted name order so the result is deterministic.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)
            .map_err(Error::Io)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| {
                p.extension()
                    .map(|e| e == "yaml" || e == "yml")
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        let mut catalog = MethodCatalog::default();
        for path in &paths {
            let content = std::fs::read_to_string(path).map_err(Error::Io)?;
            let parsed: Loaded = serde_norway::from_str(&content)
                .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))?;
            match parsed {
                Loaded::Method(m) => catalog.methods.push(*m),
                Loaded::Catalog(c) => {
                    c.check_version()
                        .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))?;
                    catalog.methods.extend(c.methods);
                }
            }
        }

        catalog.check_unique_codes()?;
        Ok(catalog)
    }

    /// Load from a file or a directory, whichever the path is
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load_file(path)
        }
    }

    /// Look up a method by code (ASCII-case-insensitive)
    pub fn get(&self, code: &str) -> Option<&ShippingMethod> {
        self.methods.iter().find(|m| m.code.eq_ignore_ascii_case(code))
    }

    /// Active methods in ascending `display_order` (ties keep catalog order)
    pub fn active_sorted(&self) -> Vec<&ShippingMethod> {
        let mut active: Vec<_> = self.methods.iter().filter(|m| m.is_active).collect();
        active.sort_by_key(|m| m.display_order);
        active
    }

    /// Compute hash of the catalog for change detection
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let content = self.to_yaml().unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }

    fn check_version(&self) -> Result<()> {
        if self.version != CATALOG_VERSION {
            return Err(Error::Catalog(format!(
                "Unsupported catalog version: {}. Only version {} is supported.",
                self.version, CATALOG_VERSION
            )));
        }
        Ok(())
    }

    fn check_unique_codes(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for method in &self.methods {
            if !seen.insert(method.code.to_ascii_uppercase()) {
                return Err(Error::Catalog(format!(
                    "Duplicate method code: {}",
                    method.code
                )));
            }
        }
        Ok(())
    }
}

/// A directory entry: one bare method or a whole catalog.
///
/// Method is tried first: every catalog field has a default, so a
/// catalog-first ordering would swallow bare-method files as empty
/// catalogs.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loaded {
    Method(Box<ShippingMethod>),
    Catalog(MethodCatalog),
}
