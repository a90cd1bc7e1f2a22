//! # Configuration
//!
//! Application configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GROCIFY_STORE_NAME, GROCIFY_RECEIPT_DIR, ...                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $GROCIFY_CONFIG, or                                                │
//! │     ~/.config/grocify/config.toml (Linux)                              │
//! │     ~/Library/Application Support/com.grocify.grocify/config.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Grocify Grocery Store"
//! currency_symbol = "₹"
//! receipt_dir = "/var/spool/grocify"
//! catalog_path = "/etc/grocify/catalog.toml"
//! page_lines = 60
//! ```

use std::path::{Path, PathBuf};

use grocify_core::money::RUPEE_SYMBOL;
use grocify_core::receipt::ReceiptLayout;
use grocify_core::{Catalog, CatalogTable, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Printed at the bottom of every receipt.
const CLOSING_MESSAGE: &str = "Thank you for shopping with us!";

// =============================================================================
// Errors
// =============================================================================

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid catalog in {}: {source}", .path.display())]
    InvalidCatalog {
        path: PathBuf,
        source: ValidationError,
    },

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Config State
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name (printed on receipts)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Directory receipts are written to
    pub receipt_dir: PathBuf,

    /// Catalog file; the built-in price list when unset
    pub catalog_path: Option<PathBuf>,

    /// Lines per receipt page
    pub page_lines: usize,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Grocify Grocery Store".to_string(),
            currency_symbol: RUPEE_SYMBOL.to_string(),
            receipt_dir: PathBuf::from("."),
            catalog_path: None,
            page_lines: 60,
        }
    }
}

impl ConfigState {
    /// Loads configuration with priority: env > file > defaults.
    ///
    /// A missing config file is not an error; an unreadable or malformed
    /// one is.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os("GROCIFY_CONFIG")
            .map(PathBuf::from)
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => ConfigState::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Reads a config file, falling back to defaults when it does not exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(ConfigState::default());
        }

        info!(path = %path.display(), "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `GROCIFY_*` overrides from `lookup`.
    ///
    /// ## Environment Variables
    /// - `GROCIFY_STORE_NAME`
    /// - `GROCIFY_CURRENCY_SYMBOL`
    /// - `GROCIFY_RECEIPT_DIR`
    /// - `GROCIFY_CATALOG`
    /// - `GROCIFY_PAGE_LINES` (positive integer)
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(name) = lookup("GROCIFY_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("GROCIFY_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(dir) = lookup("GROCIFY_RECEIPT_DIR") {
            debug!(dir = %dir, "Overriding receipt directory from environment");
            self.receipt_dir = PathBuf::from(dir);
        }

        if let Some(path) = lookup("GROCIFY_CATALOG") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(lines) = lookup("GROCIFY_PAGE_LINES") {
            self.page_lines = lines
                .trim()
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("GROCIFY_PAGE_LINES".to_string()))?;
        }

        Ok(())
    }

    /// Builds the catalog: the configured file, or the built-in table.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::default());
        };

        info!(path = %path.display(), "Loading catalog from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let table: CatalogTable = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        Catalog::from_table(&table).map_err(|source| ConfigError::InvalidCatalog {
            path: path.clone(),
            source,
        })
    }

    /// Receipt text and geometry for this store.
    pub fn receipt_layout(&self) -> ReceiptLayout {
        ReceiptLayout {
            store_name: self.store_name.clone(),
            currency_symbol: self.currency_symbol.clone(),
            closing_message: CLOSING_MESSAGE.to_string(),
            page_lines: self.page_lines,
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "grocify", "grocify")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
