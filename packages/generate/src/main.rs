#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! CLI tool for generating evaluation artifacts for the dashboard frontend.
//!
//! Loads a city dataset (embedded Massachusetts reference data or an
//! external CSV), runs a full evaluation, and writes the results as JSON
//! and/or a per-city CSV summary table.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use ev_atlas_analytics::evaluate;
use ev_atlas_analytics_models::Evaluation;
use ev_atlas_dataset::reference;
use ev_atlas_dataset::tabular;

#[derive(Parser)]
#[command(name = "ev_atlas_generate", about = "Evaluation artifact generation tool")]
struct Cli {
    /// CSV dataset to evaluate instead of the embedded Massachusetts data
    #[arg(long, value_name = "PATH")]
    dataset: Option<PathBuf>,

    /// Directory artifacts are written into
    #[arg(long, default_value = "data/generated")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the full evaluation as `evaluation.json`
    Json,
    /// Write the per-city summary table as `cities.csv`
    Csv,
    /// Write both artifacts
    All,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let dataset = match &cli.dataset {
        Some(path) => {
            log::info!("Loading dataset from {}", path.display());
            tabular::load_csv(path)?
        }
        None => reference::massachusetts(),
    };
    let targets = reference::massachusetts_targets();
    let years = targets.forecast_years();

    let evaluation = evaluate(&dataset, &targets, &years)?;
    std::fs::create_dir_all(&cli.output_dir)?;

    match cli.command {
        Commands::Json => write_json(&evaluation, &cli.output_dir)?,
        Commands::Csv => write_csv(&evaluation, &cli.output_dir)?,
        Commands::All => {
            write_json(&evaluation, &cli.output_dir)?;
            write_csv(&evaluation, &cli.output_dir)?;
        }
    }

    Ok(())
}

/// Writes the full evaluation as pretty-printed JSON.
fn write_json(evaluation: &Evaluation, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let path = output_dir.join("evaluation.json");
    let file = std::fs::File::create(&path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), evaluation)?;

    log::info!(
        "Evaluation for {} cities written: {}",
        evaluation.summary.city_count,
        path.display()
    );
    Ok(())
}

/// Writes one CSV row per city with the headline metrics and forecasts.
fn write_csv(evaluation: &Evaluation, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let path = output_dir.join("cities.csv");
    let mut writer = csv::Writer::from_path(&path)?;

    let mut header = vec![
        "city".to_string(),
        "population".to_string(),
        "readiness_score".to_string(),
        "priority_score".to_string(),
        "priority_rank".to_string(),
        "risk_score".to_string(),
        "risk_category".to_string(),
        "infrastructure_readiness".to_string(),
        "readiness_tier".to_string(),
        "allocation_weight".to_string(),
        "current_estimate".to_string(),
        "growth_rate".to_string(),
    ];
    for point in &evaluation.summary.totals_by_year {
        header.push(format!("forecast_{}", point.year));
    }
    header.push("grid_load_per_thousand".to_string());
    header.push("investment_category".to_string());
    writer.write_record(&header)?;

    for city in &evaluation.cities {
        let mut row = vec![
            city.name.clone(),
            city.population.to_string(),
            format!("{:.4}", city.readiness.score),
            format!("{:.4}", city.priority.score),
            city.priority_rank.to_string(),
            city.risk.overall_score.to_string(),
            city.risk.category.to_string(),
            format!("{:.4}", city.infrastructure.readiness),
            city.infrastructure.tier.to_string(),
            format!("{:.6}", city.allocation.allocation_weight),
            city.allocation.current_estimate.to_string(),
            format!("{:.4}", city.allocation.growth_rate),
        ];
        for point in &city.projections {
            row.push(point.vehicles.to_string());
        }
        row.push(format!("{:.1}", city.grid_load_per_thousand));
        row.push(city.investment.category.to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    log::info!(
        "City table for {} cities written: {}",
        evaluation.cities.len(),
        path.display()
    );
    Ok(())
}
