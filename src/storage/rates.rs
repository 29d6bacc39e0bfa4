//! Currency conversion rates
//!
//! `rates.yaml` maps currency codes to their rate into the base currency.
//! Conversion happens once, at import; the ledger only ever holds base
//! currency amounts.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::WorkspacePaths;
use crate::error::{CashplanError, CashplanResult};
use crate::models::Money;

/// Conversion table into the base currency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateTable {
    pub base_currency: String,
    /// currency code -> units of base currency per one unit of that currency
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Load the rate table, or an empty one when no file exists
    pub fn load(paths: &WorkspacePaths, base_currency: &str) -> CashplanResult<Self> {
        let path = paths.rates_file();
        if !path.exists() {
            return Ok(Self {
                base_currency: base_currency.to_string(),
                rates: HashMap::new(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let table: Self = serde_yaml::from_str(&contents)?;
        if table.base_currency != base_currency {
            return Err(CashplanError::Configuration(format!(
                "rates file is denominated in {} but the workspace uses {}",
                table.base_currency, base_currency
            )));
        }
        Ok(table)
    }

    pub fn save(&self, paths: &WorkspacePaths) -> CashplanResult<()> {
        paths.ensure_directories()?;
        let contents = serde_yaml::to_string(self)?;
        std::fs::write(paths.rates_file(), contents)?;
        Ok(())
    }

    /// Convert an amount into the base currency
    ///
    /// The base currency itself passes through untouched; any other code
    /// needs an entry in the table.
    pub fn to_base(&self, amount: Money, currency: &str) -> CashplanResult<Money> {
        if currency == self.base_currency {
            return Ok(amount);
        }
        let rate = self.rates.get(currency).ok_or_else(|| {
            CashplanError::Configuration(format!(
                "no conversion rate from {currency} to {}",
                self.base_currency
            ))
        })?;
        Ok(amount.scale(*rate))
    }
}
