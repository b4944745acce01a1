//! Per-period rankings and single-entity trend extraction
//!
//! Ranks use the standard competition rule: entries with equal metric values
//! share a rank, and the next distinct (lower) value takes its 1-based
//! position in the sorted sequence. Two entries tied at rank 1 are followed by
//! rank 3, not rank 2.

use crate::error::{HealthMetricsError, Result};
use crate::types::{ConvertedRecord, EntityName, Period};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One entity's position within a period's ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub entity: EntityName,
    pub value: f64,
    /// 1-based competition rank
    pub rank: u32,
}

/// One point of an entity's trend across periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: Period,
    pub value: f64,
    pub rank: u32,
}

/// Per-period rankings, descending by metric value
///
/// Iteration follows the period order the table was computed with, so
/// downstream consumers get deterministic output without sorting period
/// labels themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingTable {
    periods: Vec<Period>,
    entries: HashMap<Period, Vec<RankedEntry>>,
}

impl RankingTable {
    /// Period labels in computation order
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Ranked entries for a period, descending by value
    pub fn entries(&self, period: &str) -> Option<&[RankedEntry]> {
        self.entries.get(period).map(|v| v.as_slice())
    }

    /// Iterate periods and their rankings in computation order
    pub fn iter(&self) -> impl Iterator<Item = (&Period, &[RankedEntry])> {
        self.periods.iter().map(move |period| {
            let entries = self
                .entries
                .get(period)
                .map(|v| v.as_slice())
                .unwrap_or(&[]);
            (period, entries)
        })
    }
}

/// Compute per-period rankings of entities by metric value
///
/// A record missing a period, or carrying a non-finite value for it, counts
/// as 0 for that period. The sort is stable: entities with equal values keep
/// their input order.
///
/// Fails with `EmptyDataset` when there are no records to rank.
pub fn compute_rankings(records: &[ConvertedRecord], periods: &[Period]) -> Result<RankingTable> {
    if records.is_empty() {
        return Err(HealthMetricsError::EmptyDataset);
    }

    let mut entries = HashMap::with_capacity(periods.len());
    for period in periods {
        let mut rows: Vec<RankedEntry> = records
            .iter()
            .map(|record| {
                let value = record
                    .amounts
                    .get(period)
                    .copied()
                    .filter(|v| v.is_finite())
                    .unwrap_or(0.0);
                RankedEntry {
                    entity: record.entity.clone(),
                    value,
                    rank: 0,
                }
            })
            .collect();

        // Stable descending sort; values are finite after coercion
        rows.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

        let mut prev_value = 0.0;
        let mut prev_rank = 0u32;
        for (index, row) in rows.iter_mut().enumerate() {
            if index == 0 || row.value != prev_value {
                row.rank = index as u32 + 1;
            } else {
                row.rank = prev_rank;
            }
            prev_value = row.value;
            prev_rank = row.rank;
        }

        log::debug!("Ranked {} entities for period {}", rows.len(), period);
        entries.insert(period.clone(), rows);
    }

    Ok(RankingTable {
        periods: periods.to_vec(),
        entries,
    })
}

/// Extract one entity's trend across every period of a ranking table
///
/// Returns exactly one point per period, in the table's period order. Fails
/// with `EntityNotFound` as soon as any period lacks the entity; a partial
/// trend line is worse than no trend line for consumers expecting one point
/// per period.
pub fn extract_entity(table: &RankingTable, entity: &str) -> Result<Vec<TrendPoint>> {
    let mut trend = Vec::with_capacity(table.periods().len());

    for (period, entries) in table.iter() {
        let entry = entries
            .iter()
            .find(|e| e.entity == entity)
            .ok_or_else(|| HealthMetricsError::EntityNotFound {
                entity: entity.to_string(),
                period: period.clone(),
            })?;
        trend.push(TrendPoint {
            period: period.clone(),
            value: entry.value,
            rank: entry.rank,
        });
    }

    Ok(trend)
}
