use std::fs::File;
use std::path::PathBuf;

use agro_data::BaselineLoader;
use agro_db_sqlite::SqliteRepository;
use anyhow::{Context, Result};
use clap::Parser;

/// Load baseline datasets into the advisory database.
///
/// With no file arguments, the built-in datasets (20 crops, 5 cost records,
/// 6 soil factors, 5 soil profiles) are loaded. Individual datasets can be
/// replaced from CSV files with the matching columns:
///
/// - crop baselines: crop, base_yield_t_ha, water_need_mm_day, season_days
/// - crop costs: crop, seeds, fertilizers, pesticides, irrigation, labor,
///   machinery, others, market_price
/// - soil factors: soil, factor
/// - soil profiles: soil, ph, organic_matter_pct, nitrogen, phosphorus,
///   potassium, zinc, iron, manganese, copper, boron, sand, silt, clay,
///   health_score
#[derive(Parser, Debug)]
#[command(name = "agro-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// SQLite database URL (e.g. sqlite:farm.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:farm.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Path to a crop baselines CSV file
    #[arg(long)]
    crops: Option<PathBuf>,

    /// Path to a crop costs CSV file
    #[arg(long)]
    costs: Option<PathBuf>,

    /// Path to a soil factors CSV file
    #[arg(long)]
    soil_factors: Option<PathBuf>,

    /// Path to a soil profiles CSV file
    #[arg(long)]
    soil_profiles: Option<PathBuf>,
}

fn open(path: &PathBuf) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open: {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    let custom_files = args.crops.is_some()
        || args.costs.is_some()
        || args.soil_factors.is_some()
        || args.soil_profiles.is_some();

    if !custom_files {
        println!("Loading built-in baseline datasets...");
        let summary = BaselineLoader::load_builtin(&repo)
            .await
            .context("Failed to load built-in datasets")?;
        println!(
            "Loaded {} rows ({} crop baselines, {} cost records, {} soil factors, {} soil profiles).",
            summary.total(),
            summary.crop_baselines,
            summary.crop_costs,
            summary.soil_factors,
            summary.soil_profiles,
        );
        return Ok(());
    }

    if let Some(path) = &args.crops {
        let records = BaselineLoader::parse_crop_baselines(open(path)?)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let inserted = BaselineLoader::load_crop_baselines(&repo, &records)
            .await
            .context("Failed to load crop baselines")?;
        println!("Loaded {inserted} crop baselines from {}", path.display());
    }

    if let Some(path) = &args.costs {
        let records = BaselineLoader::parse_crop_costs(open(path)?)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let inserted = BaselineLoader::load_crop_costs(&repo, &records)
            .await
            .context("Failed to load crop costs")?;
        println!("Loaded {inserted} cost records from {}", path.display());
    }

    if let Some(path) = &args.soil_factors {
        let records = BaselineLoader::parse_soil_factors(open(path)?)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let inserted = BaselineLoader::load_soil_factors(&repo, &records)
            .await
            .context("Failed to load soil factors")?;
        println!("Loaded {inserted} soil factors from {}", path.display());
    }

    if let Some(path) = &args.soil_profiles {
        let records = BaselineLoader::parse_soil_profiles(open(path)?)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let inserted = BaselineLoader::load_soil_profiles(&repo, &records)
            .await
            .context("Failed to load soil profiles")?;
        println!("Loaded {inserted} soil profiles from {}", path.display());
    }

    Ok(())
}
