//! health-metrics CLI - convert, rank and inspect health statistics datasets
//!
//! ## Example Usage
//!
//! ```bash
//! # Rank countries by converted expenditure, per year
//! health-metrics rank expenditure.json --rates rates.json --periods 2019,2020,2021,2022
//!
//! # One country's trend across years
//! health-metrics rank expenditure.json --rates rates.json --periods 2019,2020 --entity Australia
//!
//! # Summarise a per-state CSV series file
//! health-metrics series deaths.csv
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use health_metrics::prelude::*;
use std::path::PathBuf;
use std::process;

/// health-metrics: data pipeline for health statistics dashboards
#[derive(Parser)]
#[command(name = "health-metrics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert, rank and inspect health statistics datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a monetary dataset and rank entities per period
    Rank {
        /// JSON dataset of monetary records
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// JSON exchange-rate table (code -> rate)
        #[arg(short, long)]
        rates: PathBuf,

        /// Periods to convert and rank (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        periods: Vec<String>,

        /// Print only this entity's trend instead of the full tables
        #[arg(short, long)]
        entity: Option<String>,

        /// Limit each period's table to the top N entries
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Summarise a per-entity CSV series file
    Series {
        /// CSV file with one row per entity and one column per period
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Name of the entity column
        #[arg(long, default_value = DEFAULT_ENTITY_COLUMN)]
        entity_column: String,

        /// Print only this entity's series
        #[arg(short, long)]
        entity: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Rank {
            dataset,
            rates,
            periods,
            entity,
            top,
        } => {
            let rate_table = RateTable::from_json_path(&rates)
                .with_context(|| format!("loading rates from {}", rates.display()))?;
            let records = load_monetary_records_from_path(&dataset)
                .with_context(|| format!("loading dataset from {}", dataset.display()))?;

            let converted = convert_records(&records, &rate_table, &periods)?;
            let rankings = compute_rankings(&converted, &periods)?;

            match entity {
                Some(name) => print_trend(&rankings, &name)?,
                None => print_rankings(&rankings, top),
            }
        }
        Commands::Series {
            file,
            entity_column,
            entity,
        } => {
            let table = SeriesTable::from_csv_path(&file, &entity_column)
                .with_context(|| format!("loading series from {}", file.display()))?;

            match entity {
                Some(name) => print_series(&table, &name)?,
                None => print_series_summary(&table),
            }
        }
    }

    Ok(())
}

fn print_rankings(rankings: &RankingTable, top: Option<usize>) {
    for (period, entries) in rankings.iter() {
        println!("{}", period.bold().underline());
        let shown = top.unwrap_or(entries.len()).min(entries.len());
        for entry in &entries[..shown] {
            println!("  {:>3}  {:<30} {:>14.2}", entry.rank, entry.entity, entry.value);
        }
        println!();
    }
}

fn print_trend(rankings: &RankingTable, entity: &str) -> anyhow::Result<()> {
    let trend = extract_entity(rankings, entity)?;
    println!("{}", entity.bold().underline());
    for point in trend {
        println!(
            "  {}  rank {:>3}  {:>14.2}",
            point.period, point.rank, point.value
        );
    }
    Ok(())
}

fn print_series(table: &SeriesTable, entity: &str) -> anyhow::Result<()> {
    let series = table
        .series(entity)
        .ok_or_else(|| anyhow::anyhow!("entity '{}' not found in series file", entity))?;
    println!("{}", entity.bold().underline());
    for (period, value) in series {
        println!("  {}  {:>14.2}", period, value);
    }
    if let Some(total) = table.total(entity) {
        println!("  {}  {:>14.2}", "Total".bold(), total);
    }
    Ok(())
}

fn print_series_summary(table: &SeriesTable) {
    println!(
        "{} entities, periods: {}",
        table.entities().len(),
        table.periods().join(", ")
    );
    for entity in table.entities() {
        let total = table.total(entity).unwrap_or(0.0);
        println!("  {:<30} total {:>14.2}", entity, total);
    }
}
