//! Static exchange-rate table
//!
//! Rates express "destination-currency units per one source-currency unit",
//! so `converted = amount * rate`. The table is loaded once and never mutated
//! during a pipeline run.

use crate::currency::Currency;
use crate::error::{HealthMetricsError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Exchange-rate table keyed by source currency
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<Currency, f64>,
}

impl RateTable {
    /// Create an empty rate table
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    /// Insert a rate for a currency
    ///
    /// Rates must be positive and finite.
    pub fn insert(&mut self, currency: Currency, rate: f64) -> Result<()> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(HealthMetricsError::InvalidRate { currency, rate });
        }
        self.rates.insert(currency, rate);
        Ok(())
    }

    /// Get the rate for a currency
    ///
    /// Fails with `UnknownCurrency` on a miss instead of letting a missing
    /// rate leak into the converted values.
    pub fn get(&self, currency: Currency) -> Result<f64> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or(HealthMetricsError::UnknownCurrency(currency))
    }

    /// Check whether a rate is available
    pub fn contains(&self, currency: Currency) -> bool {
        self.rates.contains_key(&currency)
    }

    /// Number of currencies with a rate
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table has no rates at all
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Load a rate table from a JSON object of `code -> rate`
    ///
    /// Currency codes outside the supported set are skipped with a warning;
    /// they could never be looked up anyway. Non-positive rates are rejected.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: HashMap<String, f64> = serde_json::from_reader(reader)?;
        let mut table = Self::new();
        for (code, rate) in raw {
            match Currency::from_code(&code) {
                Ok(currency) => table.insert(currency, rate)?,
                Err(_) => {
                    log::warn!("Skipping rate for unsupported currency code: {}", code);
                }
            }
        }
        log::debug!("Loaded {} exchange rates", table.len());
        Ok(table)
    }

    /// Load a rate table from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }
}
