//! Core types shared across the pipeline

use crate::currency::Currency;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Period label (a calendar year, e.g. "2020")
pub type Period = String;

/// Entity name (a country or a geographic region)
pub type EntityName = String;

/// Raw monetary record: per-period amounts as formatted strings
///
/// Amounts use ',' as thousands separator, as published in the source
/// dataset. Immutable input to the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetaryRecord {
    pub entity: EntityName,
    pub currency: Currency,
    pub amounts: HashMap<Period, String>,
}

impl MonetaryRecord {
    /// Create a record with no amounts
    pub fn new(entity: impl Into<EntityName>, currency: Currency) -> Self {
        Self {
            entity: entity.into(),
            currency,
            amounts: HashMap::new(),
        }
    }

    /// Add a formatted amount for a period (builder style)
    pub fn with_amount(mut self, period: impl Into<Period>, raw: impl Into<String>) -> Self {
        self.amounts.insert(period.into(), raw.into());
        self
    }
}

/// Converted record: amounts as numeric values in the destination currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedRecord {
    pub entity: EntityName,
    /// Source currency the amounts were converted from
    pub currency: Currency,
    pub amounts: HashMap<Period, f64>,
}

impl ConvertedRecord {
    /// Get the converted amount for a period, if present
    pub fn amount(&self, period: &str) -> Option<f64> {
        self.amounts.get(period).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = MonetaryRecord::new("Australia", Currency::AUD)
            .with_amount("2019", "5,000.00")
            .with_amount("2020", "5,500.00");

        assert_eq!(record.entity, "Australia");
        assert_eq!(record.currency, Currency::AUD);
        assert_eq!(record.amounts.len(), 2);
        assert_eq!(record.amounts["2019"], "5,000.00");
    }

    #[test]
    fn test_converted_amount_lookup() {
        let mut amounts = HashMap::new();
        amounts.insert("2020".to_string(), 123.45);
        let record = ConvertedRecord {
            entity: "Japan".to_string(),
            currency: Currency::JPY,
            amounts,
        };

        assert_eq!(record.amount("2020"), Some(123.45));
        assert_eq!(record.amount("1999"), None);
    }
}
