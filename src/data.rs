//! Dataset loaders
//!
//! JSON monetary records (country, currency, per-year amount strings) and CSV
//! per-entity series files (entity column, numeric year columns, optional
//! precomputed total).

use crate::currency::Currency;
use crate::error::{HealthMetricsError, Result};
use crate::types::{EntityName, MonetaryRecord, Period};
use csv::ReaderBuilder;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default entity column name in the published CSV datasets
pub const DEFAULT_ENTITY_COLUMN: &str = "States";

/// Header of the optional precomputed-total column
const TOTAL_COLUMN: &str = "Total";

/// Load monetary records from a JSON array
///
/// Expected shape (healthExpenditure-style): objects with a `Country` name, a
/// `Currency` code, and every other key a period label mapping to a formatted
/// amount string. Numeric JSON values are accepted and stringified.
pub fn load_monetary_records<R: Read>(reader: R) -> Result<Vec<MonetaryRecord>> {
    let raw: Vec<serde_json::Map<String, Value>> = serde_json::from_reader(reader)?;
    let mut records = Vec::with_capacity(raw.len());

    for object in raw {
        let entity = object
            .get("Country")
            .and_then(Value::as_str)
            .ok_or_else(|| HealthMetricsError::DataError("Record missing 'Country'".into()))?
            .to_string();
        let code = object
            .get("Currency")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                HealthMetricsError::DataError(format!("Record for {} missing 'Currency'", entity))
            })?;
        let currency = Currency::from_code(code)?;

        let mut amounts = HashMap::new();
        for (key, value) in &object {
            if key == "Country" || key == "Currency" {
                continue;
            }
            let raw_amount = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(HealthMetricsError::DataError(format!(
                        "Unexpected value for {} in {}: {}",
                        entity, key, other
                    )))
                }
            };
            amounts.insert(key.clone(), raw_amount);
        }

        records.push(MonetaryRecord {
            entity,
            currency,
            amounts,
        });
    }

    log::debug!("Loaded {} monetary records", records.len());
    Ok(records)
}

/// Load monetary records from a JSON file
pub fn load_monetary_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MonetaryRecord>> {
    let file = File::open(path)?;
    load_monetary_records(BufReader::new(file))
}

/// Per-entity numeric series over periods, with optional precomputed totals
///
/// Backs the deaths/vaccination CSV datasets: one row per entity, one column
/// per period, optionally a `Total` column.
#[derive(Debug, Clone)]
pub struct SeriesTable {
    entities: Vec<EntityName>,
    periods: Vec<Period>,
    values: HashMap<EntityName, HashMap<Period, f64>>,
    totals: HashMap<EntityName, f64>,
}

impl SeriesTable {
    /// Load a series table from CSV
    ///
    /// Header lookup is case-insensitive. Every column other than the entity
    /// column and `Total` is treated as a period. Empty cells count as 0;
    /// anything else that does not parse as a number is a typed error naming
    /// the row and column.
    pub fn from_csv_reader<R: Read>(reader: R, entity_column: &str) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let entity_index = find_column(&headers, entity_column)?;
        let total_index = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(TOTAL_COLUMN));

        let mut periods = Vec::new();
        for (index, header) in headers.iter().enumerate() {
            if index == entity_index || Some(index) == total_index {
                continue;
            }
            periods.push(header.to_string());
        }

        let mut entities = Vec::new();
        let mut values: HashMap<EntityName, HashMap<Period, f64>> = HashMap::new();
        let mut totals = HashMap::new();

        for (row_number, row) in csv_reader.records().enumerate() {
            let row = row?;
            let entity = row
                .get(entity_index)
                .ok_or_else(|| {
                    HealthMetricsError::DataError(format!(
                        "Row {} missing entity column",
                        row_number + 1
                    ))
                })?
                .to_string();

            let mut series = HashMap::with_capacity(periods.len());
            for (index, header) in headers.iter().enumerate() {
                if index == entity_index || Some(index) == total_index {
                    continue;
                }
                let cell = row.get(index).unwrap_or("");
                series.insert(
                    header.to_string(),
                    parse_cell(cell, row_number + 1, header, &entity)?,
                );
            }

            if let Some(total_index) = total_index {
                let cell = row.get(total_index).unwrap_or("");
                totals.insert(
                    entity.clone(),
                    parse_cell(cell, row_number + 1, TOTAL_COLUMN, &entity)?,
                );
            }

            entities.push(entity.clone());
            values.insert(entity, series);
        }

        log::debug!(
            "Loaded series for {} entities across {} periods",
            entities.len(),
            periods.len()
        );
        Ok(Self {
            entities,
            periods,
            values,
            totals,
        })
    }

    /// Load a series table from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P, entity_column: &str) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file), entity_column)
    }

    /// Entity names in row order
    pub fn entities(&self) -> &[EntityName] {
        &self.entities
    }

    /// Period labels in column order
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Value for one entity and period
    pub fn value(&self, entity: &str, period: &str) -> Option<f64> {
        self.values.get(entity)?.get(period).copied()
    }

    /// One entity's full series, in column order
    pub fn series(&self, entity: &str) -> Option<Vec<(Period, f64)>> {
        let values = self.values.get(entity)?;
        Some(
            self.periods
                .iter()
                .map(|period| {
                    (
                        period.clone(),
                        values.get(period).copied().unwrap_or(0.0),
                    )
                })
                .collect(),
        )
    }

    /// Total for an entity
    ///
    /// Uses the precomputed `Total` column when present, otherwise sums the
    /// entity's series.
    pub fn total(&self, entity: &str) -> Option<f64> {
        if let Some(total) = self.totals.get(entity) {
            return Some(*total);
        }
        let values = self.values.get(entity)?;
        Some(values.values().sum())
    }
}

/// Find a column index by name, case-insensitive
fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| HealthMetricsError::DataError(format!("Column '{}' not found", name)))
}

/// Parse a numeric CSV cell; empty cells count as 0
fn parse_cell(cell: &str, row: usize, column: &str, entity: &str) -> Result<f64> {
    if cell.is_empty() {
        return Ok(0.0);
    }
    cell.replace(',', "").parse::<f64>().map_err(|_| {
        HealthMetricsError::DataError(format!(
            "Invalid number '{}' at row {} column {} ({})",
            cell, row, column, entity
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DEATHS_CSV: &str = "\
States,2020,2021,2022,Total
NSW,55,610,12000,12665
VIC,820,485,11500,12805
QLD,6,7,9000,9013
";

    #[test]
    fn test_load_monetary_records_json() {
        let json = r#"[
            {"Country": "Australia", "Currency": "AUD", "2019": "5,000.00", "2020": "5,500.00"},
            {"Country": "Japan", "Currency": "JPY", "2019": "400,000", "2020": 410000}
        ]"#;

        let records = load_monetary_records(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].entity, "Australia");
        assert_eq!(records[0].currency, Currency::AUD);
        assert_eq!(records[0].amounts["2019"], "5,000.00");
        // numeric JSON values are stringified
        assert_eq!(records[1].amounts["2020"], "410000");
    }

    #[test]
    fn test_load_monetary_records_missing_country() {
        let json = r#"[{"Currency": "AUD", "2019": "1.0"}]"#;
        let err = load_monetary_records(json.as_bytes()).unwrap_err();
        assert!(matches!(err, HealthMetricsError::DataError(_)));
    }

    #[test]
    fn test_load_monetary_records_unknown_code() {
        let json = r#"[{"Country": "Atlantis", "Currency": "ATL", "2019": "1.0"}]"#;
        let err = load_monetary_records(json.as_bytes()).unwrap_err();
        assert!(matches!(err, HealthMetricsError::UnknownCurrencyCode(_)));
    }

    #[test]
    fn test_series_table_from_reader() {
        let table =
            SeriesTable::from_csv_reader(DEATHS_CSV.as_bytes(), DEFAULT_ENTITY_COLUMN).unwrap();

        assert_eq!(table.entities(), ["NSW", "VIC", "QLD"]);
        assert_eq!(table.periods(), ["2020", "2021", "2022"]);
        assert_eq!(table.value("NSW", "2021"), Some(610.0));
        assert_eq!(table.total("VIC"), Some(12805.0));
    }

    #[test]
    fn test_series_in_column_order() {
        let table =
            SeriesTable::from_csv_reader(DEATHS_CSV.as_bytes(), DEFAULT_ENTITY_COLUMN).unwrap();
        let series = table.series("QLD").unwrap();

        assert_eq!(
            series,
            vec![
                ("2020".to_string(), 6.0),
                ("2021".to_string(), 7.0),
                ("2022".to_string(), 9000.0),
            ]
        );
    }

    #[test]
    fn test_total_falls_back_to_sum() {
        let csv = "States,2020,2021\nNSW,2,3\n";
        let table = SeriesTable::from_csv_reader(csv.as_bytes(), "States").unwrap();
        assert_eq!(table.total("NSW"), Some(5.0));
    }

    #[test]
    fn test_missing_entity_column_fails() {
        let csv = "Regions,2020\nNSW,2\n";
        let err = SeriesTable::from_csv_reader(csv.as_bytes(), "States").unwrap_err();
        assert!(matches!(err, HealthMetricsError::DataError(_)));
    }

    #[test]
    fn test_bad_cell_names_row_and_column() {
        let csv = "States,2020\nNSW,oops\n";
        let err = SeriesTable::from_csv_reader(csv.as_bytes(), "States").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("oops"));
        assert!(msg.contains("2020"));
        assert!(msg.contains("NSW"));
    }

    #[test]
    fn test_empty_cell_counts_as_zero() {
        let csv = "States,2020,2021\nNSW,,4\n";
        let table = SeriesTable::from_csv_reader(csv.as_bytes(), "States").unwrap();
        assert_eq!(table.value("NSW", "2020"), Some(0.0));
    }

    #[test]
    fn test_from_csv_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DEATHS_CSV.as_bytes()).unwrap();
        file.flush().unwrap();

        let table = SeriesTable::from_csv_path(file.path(), DEFAULT_ENTITY_COLUMN).unwrap();
        assert_eq!(table.entities().len(), 3);
    }
}
