//! Soil Advisor
//!
//! Command line front end for soil deficiency analysis.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use soil_advisor::analysis::{self, AnalysisReport};
use soil_advisor::models::SoilSample;
use soil_advisor::predictor::{FeatureConfig, LinearSoilModel};
use soil_advisor::{assistant, engine, features, treatments};

#[derive(Parser)]
#[command(name = "soil-advisor")]
#[command(about = "Soil nutrient deficiency analysis with organic treatment plans")]
struct Cli {
    /// Path to the model JSON (built-in sample model when omitted)
    #[arg(short, long, env = "SOIL_ADVISOR_MODEL", global = true)]
    model: Option<PathBuf>,

    /// Path to the feature configuration JSON
    #[arg(short, long, env = "SOIL_ADVISOR_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a soil sample and print a treatment plan
    Analyze {
        /// Nitrogen in kg/hectare
        #[arg(short = 'n', long, default_value = "50.0")]
        nitrogen: f64,

        /// Phosphorus in kg/hectare
        #[arg(short = 'p', long, default_value = "50.0")]
        phosphorus: f64,

        /// Potassium in kg/hectare
        #[arg(short = 'k', long, default_value = "50.0")]
        potassium: f64,

        /// Soil pH
        #[arg(long, default_value = "6.5")]
        ph: f64,

        /// Temperature in degrees Celsius
        #[arg(long, default_value = "25.0")]
        temperature: f64,

        /// Relative humidity in percent
        #[arg(long, default_value = "70.0")]
        humidity: f64,

        /// Rainfall in mm
        #[arg(long, default_value = "100.0")]
        rainfall: f64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the farming assistant a question
    Chat {
        /// Question text
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// List every organic treatment in the table
    Treatments,

    /// Write the built-in sample model and feature configuration as JSON
    SampleModel {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            nitrogen,
            phosphorus,
            potassium,
            ph,
            temperature,
            humidity,
            rainfall,
            json,
        } => {
            let sample = SoilSample {
                nitrogen,
                phosphorus,
                potassium,
                ph,
                temperature_c: temperature,
                humidity_pct: humidity,
                rainfall_mm: rainfall,
            };
            sample.validate()?;

            let model = load_model(cli.model.as_deref())?;
            let config = load_config(cli.config.as_deref())?;
            let features = features::feature_vector(&sample);

            let report = analysis::run_analysis(&model, &config, &features)
                .context("Analysis failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::Chat { question } => {
            println!("{}", assistant::respond(&question.join(" ")));
        }

        Commands::Treatments => {
            for (category, record) in treatments::all() {
                println!("{} ({}, {})", category, record.cost_band, record.timeline);
                for solution in record.solutions {
                    println!("  - {}", solution);
                }
                println!();
            }
            println!(
                "Maintenance ({}, {})",
                treatments::MAINTENANCE.cost_band,
                treatments::MAINTENANCE.timeline
            );
            for solution in treatments::MAINTENANCE.solutions {
                println!("  - {}", solution);
            }
        }

        Commands::SampleModel { out_dir } => {
            write_sample_model(&out_dir)?;
        }
    }

    Ok(())
}

fn load_model(path: Option<&Path>) -> Result<LinearSoilModel> {
    match path {
        Some(path) => LinearSoilModel::load(path).context("Failed to load model"),
        None => {
            warn!("no model given, using the built-in sample model");
            Ok(LinearSoilModel::sample())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<FeatureConfig> {
    let config = match path {
        Some(path) => FeatureConfig::load(path).context("Failed to load feature configuration")?,
        None => FeatureConfig::default(),
    };

    if config.feature_names.len() != features::FEATURE_COUNT {
        bail!(
            "feature configuration names {} features, expected {}",
            config.feature_names.len(),
            features::FEATURE_COUNT
        );
    }
    Ok(config)
}

fn write_sample_model(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let model_path = out_dir.join("model.json");
    let config_path = out_dir.join("feature_config.json");

    fs::write(&model_path, serde_json::to_string_pretty(&LinearSoilModel::sample())?)
        .with_context(|| format!("Failed to write {}", model_path.display()))?;
    fs::write(&config_path, serde_json::to_string_pretty(&FeatureConfig::default())?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    info!(model = %model_path.display(), config = %config_path.display(), "wrote sample model");
    println!("Wrote {} and {}", model_path.display(), config_path.display());
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("=== Deficiency Analysis ===");
    print!("{}", engine::format_prediction_table(&report.predictions));
    println!();

    if let (Some(score), Some(status)) = (report.soil_health_predicted, report.health_status) {
        println!("Soil health score: {:.3} ({:.1}%) - {}", score, score * 100.0, status);
        println!();
    }

    print!("{}", report.treatment_plan);
}
