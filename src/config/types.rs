use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::DeliveryPolicy;
use crate::storage::FileStorage;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub delivery: DeliveryPolicy,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Where the cart is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per cart key.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
    /// Storage key of the cart (default: "cart").
    #[serde(default = "default_storage_key")]
    pub key: String,
}

/// How amounts are shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

/// Product catalog used to resolve ids on `add`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_storage_dir() -> PathBuf {
    FileStorage::default_dir()
}

fn default_storage_key() -> String {
    "cart".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl DisplayConfig {
    /// Two decimal places, symbol prefixed: `₹1200.00`.
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{}{:.2}", self.currency_symbol, amount.round_dp(2))
    }
}
