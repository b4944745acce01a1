//! # health-metrics
//!
//! Data pipeline behind health-statistics dashboards: normalises monetary
//! datasets into a common currency, ranks entities per period with standard
//! competition ranks, and extracts single-entity trends for chart consumers.
//!
//! Rendering is deliberately out of scope; outputs are plain values a chart
//! layer maps to coordinates.
//!
//! ## Example
//!
//! ```rust
//! use health_metrics::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut rates = RateTable::new();
//!     rates.insert(Currency::USD, 1.0)?;
//!     rates.insert(Currency::AUD, 0.75)?;
//!
//!     let records = vec![
//!         MonetaryRecord::new("Australia", Currency::AUD)
//!             .with_amount("2020", "7,200.00"),
//!         MonetaryRecord::new("United States", Currency::USD)
//!             .with_amount("2020", "11,000.00"),
//!     ];
//!
//!     let periods = vec!["2020".to_string()];
//!     let converted = convert_records(&records, &rates, &periods)?;
//!     let rankings = compute_rankings(&converted, &periods)?;
//!     let trend = extract_entity(&rankings, "Australia")?;
//!
//!     assert_eq!(trend[0].rank, 2);
//!     Ok(())
//! }
//! ```

pub mod convert;
pub mod currency;
pub mod data;
pub mod error;
pub mod ranking;
pub mod rates;
pub mod types;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::convert::convert_records;
    pub use crate::currency::{parse_amount, Currency};
    pub use crate::data::{
        load_monetary_records, load_monetary_records_from_path, SeriesTable,
        DEFAULT_ENTITY_COLUMN,
    };
    pub use crate::error::{HealthMetricsError, Result};
    pub use crate::ranking::{
        compute_rankings, extract_entity, RankedEntry, RankingTable, TrendPoint,
    };
    pub use crate::rates::RateTable;
    pub use crate::types::{ConvertedRecord, EntityName, MonetaryRecord, Period};
}
