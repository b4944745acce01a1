//! Currency conversion over monetary records
//!
//! Pure transformation: input records are never mutated, output records are
//! built fresh. The set of periods to convert is a configuration input, never
//! hardcoded per dataset.

use crate::currency::parse_amount;
use crate::error::{HealthMetricsError, Result};
use crate::rates::RateTable;
use crate::types::{ConvertedRecord, MonetaryRecord, Period};
use std::collections::HashMap;

/// Convert a sequence of monetary records into the destination currency
///
/// For every record and every configured period present in that record,
/// `value = parse_amount(raw) * rate[record.currency]`. Periods a record does
/// not carry are left out of its output amounts; the ranking stage coerces
/// such gaps to 0.
///
/// Fails with `UnknownCurrency` when the rate table has no entry for a
/// record's currency, and with `MalformedAmount` when an amount string does
/// not parse after stripping thousands separators.
pub fn convert_records(
    records: &[MonetaryRecord],
    rates: &RateTable,
    periods: &[Period],
) -> Result<Vec<ConvertedRecord>> {
    let mut converted = Vec::with_capacity(records.len());

    for record in records {
        let rate = rates.get(record.currency)?;
        let mut amounts = HashMap::with_capacity(periods.len());

        for period in periods {
            let Some(raw) = record.amounts.get(period) else {
                continue;
            };
            let value =
                parse_amount(raw).ok_or_else(|| HealthMetricsError::MalformedAmount {
                    entity: record.entity.clone(),
                    period: period.clone(),
                    raw: raw.clone(),
                })?;
            amounts.insert(period.clone(), value * rate);
        }

        log::debug!(
            "Converted {} amounts for {} at {} rate {}",
            amounts.len(),
            record.entity,
            record.currency,
            rate
        );
        converted.push(ConvertedRecord {
            entity: record.entity.clone(),
            currency: record.currency,
            amounts,
        });
    }

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use approx::assert_relative_eq;

    fn usd_eur_rates() -> RateTable {
        let mut rates = RateTable::new();
        rates.insert(Currency::USD, 1.0).unwrap();
        rates.insert(Currency::EUR, 0.9).unwrap();
        rates
    }

    fn periods(labels: &[&str]) -> Vec<Period> {
        labels.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_thousand_separator_amount() {
        let records = vec![MonetaryRecord::new("A", Currency::USD).with_amount("2020", "1,000.00")];

        let converted = convert_records(&records, &usd_eur_rates(), &periods(&["2020"])).unwrap();
        assert_eq!(converted[0].amount("2020"), Some(1000.00));
    }

    #[test]
    fn test_rate_applied() {
        let records =
            vec![MonetaryRecord::new("Germany", Currency::EUR).with_amount("2021", "2,500.50")];

        let converted = convert_records(&records, &usd_eur_rates(), &periods(&["2021"])).unwrap();
        assert_relative_eq!(converted[0].amount("2021").unwrap(), 2500.5 * 0.9);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let records = vec![MonetaryRecord::new("A", Currency::USD).with_amount("2020", "1,000.00")];
        let before = records.clone();

        convert_records(&records, &usd_eur_rates(), &periods(&["2020"])).unwrap();
        assert_eq!(records, before);
    }

    #[test]
    fn test_only_configured_periods_converted() {
        let records = vec![MonetaryRecord::new("A", Currency::USD)
            .with_amount("2019", "1.0")
            .with_amount("2020", "2.0")];

        let converted = convert_records(&records, &usd_eur_rates(), &periods(&["2020"])).unwrap();
        assert_eq!(converted[0].amount("2019"), None);
        assert_eq!(converted[0].amount("2020"), Some(2.0));
    }

    #[test]
    fn test_missing_period_skipped() {
        let records = vec![MonetaryRecord::new("A", Currency::USD).with_amount("2020", "5.0")];

        let converted =
            convert_records(&records, &usd_eur_rates(), &periods(&["2019", "2020"])).unwrap();
        assert_eq!(converted[0].amounts.len(), 1);
    }

    #[test]
    fn test_unknown_currency_fails() {
        let records = vec![MonetaryRecord::new("Japan", Currency::JPY).with_amount("2020", "9.0")];

        let err = convert_records(&records, &usd_eur_rates(), &periods(&["2020"])).unwrap_err();
        assert!(matches!(
            err,
            HealthMetricsError::UnknownCurrency(Currency::JPY)
        ));
    }

    #[test]
    fn test_malformed_amount_fails() {
        let records =
            vec![MonetaryRecord::new("A", Currency::USD).with_amount("2020", "not-a-number")];

        let err = convert_records(&records, &usd_eur_rates(), &periods(&["2020"])).unwrap_err();
        match err {
            HealthMetricsError::MalformedAmount {
                entity,
                period,
                raw,
            } => {
                assert_eq!(entity, "A");
                assert_eq!(period, "2020");
                assert_eq!(raw, "not-a-number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
