mod config;
mod logging;
mod report;
mod store;

use std::path::PathBuf;

use agro_core::FarmRepository;
use agro_core::calculations::{
    CostWorksheet, IrrigationSystem, MarketWorksheet, SoilHealthWorksheet, WaterWorksheet,
    YieldWorksheet, pest_risk_profile, rotation_plan,
};
use agro_core::models::{Area, AreaUnit, CropKind, FarmParameters, NewFarmAssessment, SoilKind};
use agro_core::tables::BaselineTables;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::config::AppConfig;

/// Language codes the preference accepts.
const LANGUAGES: [&str; 6] = ["en", "hi", "bn", "ta", "te", "es"];

/// Nominal size of one crop's offline data bundle.
fn offline_bundle_mb() -> Decimal {
    Decimal::new(42, 1)
}

/// Farm advisory calculators over baseline crop and soil tables.
#[derive(Parser, Debug)]
#[command(name = "agro-advisor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (default: ./agro-advisor.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database URL override (e.g. sqlite:farm.db?mode=rwc)
    #[arg(long, global = true)]
    database: Option<String>,

    /// Append logs to this file in addition to stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Farm parameters shared by the calculation commands. Defaults match the
/// dashboard's initial form state.
#[derive(Args, Debug)]
struct FarmArgs {
    /// Crop key, e.g. rice (unknown crops use default baselines)
    #[arg(long)]
    crop: String,

    /// Soil key, e.g. alluvial
    #[arg(long, default_value = "alluvial")]
    soil: String,

    /// Land area
    #[arg(long, default_value = "1")]
    area: Decimal,

    /// Area unit: hectares or acres
    #[arg(long, default_value = "hectares")]
    unit: AreaUnit,

    /// Fertilizer application in kg/ha
    #[arg(long, default_value = "100")]
    fertilizer: Decimal,

    /// Expected weekly rainfall in mm
    #[arg(long, default_value = "50")]
    rainfall: Decimal,

    /// Average temperature in °C
    #[arg(long, default_value = "25")]
    temperature: Decimal,

    /// Relative humidity in percent
    #[arg(long, default_value = "60")]
    humidity: Decimal,

    /// Daily sunlight in hours
    #[arg(long, default_value = "6")]
    sunlight: Decimal,
}

impl FarmArgs {
    fn to_parameters(&self) -> FarmParameters {
        FarmParameters {
            crop: self.crop.clone(),
            soil: self.soil.clone(),
            area: Area::new(self.area, self.unit),
            fertilizer_kg_ha: self.fertilizer,
            rainfall_mm: self.rainfall,
            temperature_c: self.temperature,
            humidity_pct: self.humidity,
            sunlight_hours: self.sunlight,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every worksheet and print the full advisory report
    Report {
        #[command(flatten)]
        farm: FarmArgs,

        /// Persist the headline results as an assessment
        #[arg(long)]
        save: bool,
    },

    /// Estimate yield from the farm parameters
    Predict {
        #[command(flatten)]
        farm: FarmArgs,
    },

    /// Cost breakdown and profitability for a crop and area
    Costs {
        #[command(flatten)]
        farm: FarmArgs,
    },

    /// Water requirement, irrigation schedule, and run sizing
    Water {
        #[command(flatten)]
        farm: FarmArgs,

        /// Irrigation system: drip, sprinkler, or flood
        #[arg(long, default_value = "drip")]
        system: IrrigationSystem,

        /// System flow rate in liters per minute
        #[arg(long, default_value = "10")]
        flow_rate: Decimal,

        /// Number of schedule weeks to print
        #[arg(long, default_value_t = 6)]
        weeks: usize,
    },

    /// Soil health report for a soil type
    Soil {
        /// Soil key, e.g. alluvial
        #[arg(long)]
        soil: String,
    },

    /// Crop rotation recommendation
    Rotation {
        /// Crop key, e.g. rice
        #[arg(long)]
        crop: String,
    },

    /// Pest and disease risk profile
    Pests {
        /// Crop key, e.g. rice
        #[arg(long)]
        crop: String,
    },

    /// Compare an observed market quote against the reference price
    Market {
        /// Crop key, e.g. rice
        #[arg(long)]
        crop: String,

        /// Observed price per ton
        #[arg(long)]
        price: Decimal,
    },

    /// List the crops with baseline data
    Crops,

    /// List the known soil types
    Soils,

    /// Saved assessment history
    History {
        /// Only show assessments for this crop
        #[arg(long)]
        crop: Option<String>,

        /// Delete the assessment with this id instead of listing
        #[arg(long)]
        delete: Option<i64>,
    },

    /// Manage offline crop data
    Offline {
        #[command(subcommand)]
        command: OfflineCommand,
    },

    /// Show or set the language preference
    Lang {
        /// Language code to set (en, hi, bn, ta, te, es)
        language: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum OfflineCommand {
    /// Save a crop's advisory data for offline use
    Download {
        /// Crop key, e.g. rice
        #[arg(long)]
        crop: String,
    },

    /// List downloaded crops
    List,

    /// Refresh the sync timestamp
    Sync,

    /// Remove all offline data
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let app_config = AppConfig::load(cli.config.as_deref())?;
    let database = cli
        .database
        .clone()
        .unwrap_or_else(|| app_config.database.clone());

    // Static advisories need no database.
    match &cli.command {
        Command::Rotation { crop } => {
            report::render_rotation(&rotation_plan(crop));
            return Ok(());
        }
        Command::Pests { crop } => {
            report::render_pests(&pest_risk_profile(crop));
            return Ok(());
        }
        _ => {}
    }

    let repo = store::open_repository(&database).await?;
    if repo.get_preference("language").await?.is_none() {
        repo.set_preference("language", &app_config.language).await?;
    }

    match cli.command {
        Command::Report { farm, save } => {
            let tables = store::load_tables(repo.as_ref()).await?;
            run_report(repo.as_ref(), &tables, &farm, save).await?;
        }
        Command::Predict { farm } => {
            let tables = store::load_tables(repo.as_ref()).await?;
            let estimate = YieldWorksheet::new(&tables).calculate(&farm.to_parameters())?;
            report::render_yield(&estimate);
        }
        Command::Costs { farm } => {
            let tables = store::load_tables(repo.as_ref()).await?;
            let breakdown =
                CostWorksheet::new(&tables).calculate(&farm.crop, Area::new(farm.area, farm.unit))?;
            report::render_cost(&breakdown);
        }
        Command::Water {
            farm,
            system,
            flow_rate,
            weeks,
        } => {
            let tables = store::load_tables(repo.as_ref()).await?;
            let worksheet = WaterWorksheet::new(&tables);
            let plan = worksheet.plan(&farm.crop, &farm.soil, farm.rainfall);
            let run = worksheet.irrigation_run(
                &plan,
                Area::new(farm.area, farm.unit),
                system,
                flow_rate,
            )?;
            report::render_water(&plan, Some(&run), weeks);
        }
        Command::Soil { soil } => {
            let tables = store::load_tables(repo.as_ref()).await?;
            report::render_soil(&SoilHealthWorksheet::new(&tables).assess(&soil));
        }
        Command::Market { crop, price } => {
            let tables = store::load_tables(repo.as_ref()).await?;
            let outlook = MarketWorksheet::new(&tables).outlook(&crop, price)?;
            report::render_market(&outlook);
        }
        Command::Crops => {
            let tables = store::load_tables(repo.as_ref()).await?;
            println!("Known crops:");
            for key in tables.crop_keys() {
                let baseline = tables.resolve_crop(key);
                let label = CropKind::parse(key).map(|c| c.label()).unwrap_or(key);
                println!(
                    "  {key:<12} {label:<16} {} t/ha, {}-day season",
                    baseline.base_yield_t_ha, baseline.season_days
                );
            }
        }
        Command::Soils => {
            let tables = store::load_tables(repo.as_ref()).await?;
            println!("Known soils:");
            for soil in SoilKind::ALL {
                let factor = tables.resolve_soil_factor(soil.as_str());
                println!(
                    "  {:<10} {:<14} retention factor {factor}",
                    soil.as_str(),
                    soil.label()
                );
            }
        }
        Command::History { crop, delete } => match delete {
            Some(id) => {
                repo.delete_assessment(id)
                    .await
                    .with_context(|| format!("cannot delete assessment #{id}"))?;
                println!("Deleted assessment #{id}.");
            }
            None => {
                let assessments = repo.list_assessments(crop.as_deref()).await?;
                report::render_assessments(&assessments);
            }
        },
        Command::Offline { command } => run_offline(repo.as_ref(), command).await?,
        Command::Lang { language } => match language {
            Some(language) => {
                if !LANGUAGES.contains(&language.as_str()) {
                    bail!(
                        "unknown language '{language}'; available: {}",
                        LANGUAGES.join(", ")
                    );
                }
                repo.set_preference("language", &language).await?;
                println!("Language preference set to '{language}'.");
            }
            None => {
                let language = repo
                    .get_preference("language")
                    .await?
                    .unwrap_or(app_config.language);
                println!("Language preference: {language}");
            }
        },
        // Handled before the repository was opened.
        Command::Rotation { .. } | Command::Pests { .. } => unreachable!(),
    }

    Ok(())
}

async fn run_report(
    repo: &dyn FarmRepository,
    tables: &BaselineTables,
    farm: &FarmArgs,
    save: bool,
) -> Result<()> {
    let params = farm.to_parameters();

    let estimate = YieldWorksheet::new(tables).calculate(&params)?;
    let breakdown = CostWorksheet::new(tables).calculate(&params.crop, params.area)?;
    let water = WaterWorksheet::new(tables).plan(&params.crop, &params.soil, params.rainfall_mm);
    let soil = SoilHealthWorksheet::new(tables).assess(&params.soil);

    report::render_yield(&estimate);
    report::render_cost(&breakdown);
    report::render_water(&water, None, 4);
    report::render_soil(&soil);
    report::render_rotation(&rotation_plan(&params.crop));
    report::render_pests(&pest_risk_profile(&params.crop));

    if save {
        let saved = repo
            .create_assessment(NewFarmAssessment {
                crop: params.crop.clone(),
                soil: params.soil.clone(),
                area_ha: params.area_hectares(),
                fertilizer_kg_ha: params.fertilizer_kg_ha,
                rainfall_mm: params.rainfall_mm,
                temperature_c: params.temperature_c,
                humidity_pct: params.humidity_pct,
                sunlight_hours: params.sunlight_hours,
                estimated_yield_t: Some(estimate.total_yield_t),
                total_cost: Some(breakdown.total_cost),
                net_profit: Some(breakdown.profitability.net_profit),
                water_daily_mm: Some(water.daily_need_mm),
            })
            .await
            .context("cannot save assessment")?;
        println!();
        println!("Saved assessment #{}.", saved.id);
    }

    Ok(())
}

async fn run_offline(
    repo: &dyn FarmRepository,
    command: OfflineCommand,
) -> Result<()> {
    match command {
        OfflineCommand::Download { crop } => {
            if CropKind::parse(&crop).is_none() {
                bail!("unknown crop '{crop}'; run `agro-advisor crops` for the known list");
            }
            let already = repo
                .list_downloaded_crops()
                .await?
                .iter()
                .any(|c| c.crop == crop);
            if already {
                println!("Offline data for {crop} is already available.");
                return Ok(());
            }
            repo.mark_crop_downloaded(&crop, offline_bundle_mb()).await?;
            repo.set_last_synced(Utc::now()).await?;
            println!("Offline data for {crop} is now available.");
        }
        OfflineCommand::List => {
            let crops = repo.list_downloaded_crops().await?;
            let last_synced = repo.last_synced().await?;
            report::render_offline(&crops, last_synced);
        }
        OfflineCommand::Sync => {
            repo.set_last_synced(Utc::now()).await?;
            println!("Offline data synchronized.");
        }
        OfflineCommand::Clear => {
            repo.clear_offline_data().await?;
            println!("Offline data cleared.");
        }
    }
    Ok(())
}
