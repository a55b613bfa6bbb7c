//! # Takeoff CLI
//!
//! Runs the quantity takeoff over a model snapshot and writes the JSON
//! summary report the report renderer consumes.
//!
//! ```text
//! takeoff analyze house.json --source house.ifc --live-loads live.json
//! takeoff analyze house.json --snow-load 25 --wind-force 1200 --building-height 24
//! takeoff forces house.ifc
//! takeoff seismic --site-class 1 --importance 1.25 --spectral 1.0
//! ```

mod config;
mod report_io;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use takeoff_core::forces::extract_forces_moments;
use takeoff_core::loads::{seismic_load_simplified, DesignMethod, LoadInputText, LoadInputs};
use takeoff_core::{analyze, AnalysisOptions};
use tracing_subscriber::{fmt, EnvFilter};

use config::TakeoffConfig;

#[derive(Parser)]
#[command(name = "takeoff")]
#[command(about = "Structural quantity takeoff and load derivation for IFC models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full takeoff and write a JSON report
    Analyze {
        /// Model snapshot (JSON)
        snapshot: PathBuf,

        /// Raw IFC file, scanned for force and moment vectors
        #[arg(short, long, value_name = "FILE")]
        source: Option<PathBuf>,

        /// Per-floor live loads (JSON array)
        #[arg(short, long, value_name = "FILE")]
        live_loads: Option<PathBuf>,

        /// Drop points at the raw origin
        #[arg(long)]
        remove_origin: bool,

        /// Combination table for the governing load
        #[arg(short, long, value_enum, default_value_t = Method::Asd)]
        method: Method,

        /// Report path [default: <snapshot stem>_takeoff.json]
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        loads: LoadFlags,
    },

    /// Print per-floor force and moment vectors of an IFC file
    Forces {
        /// Raw IFC file
        file: PathBuf,
    },

    /// Simplified seismic load for a site
    Seismic {
        #[arg(long, default_value = "0")]
        site_class: f64,

        #[arg(long, default_value = "1")]
        importance: f64,

        /// Spectral response acceleration
        #[arg(long)]
        spectral: f64,
    },
}

/// Design inputs as typed on the command line.
///
/// Each flag replaces the matching `[loads]` value from the configuration.
/// Text that is not a number counts as `0`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
struct LoadFlags {
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    site_class: Option<String>,

    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    importance: Option<String>,

    /// Spectral response acceleration
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    spectral: Option<String>,

    /// Wind force on the building (lb)
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    wind_force: Option<String>,

    /// Snow load (psf)
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    snow_load: Option<String>,

    /// Ice load (psf)
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    ice_load: Option<String>,

    /// Building height (ft)
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    building_height: Option<String>,
}

impl LoadFlags {
    /// Overlay the flags on `defaults` and parse the result as text
    fn resolve(&self, defaults: &LoadInputs) -> LoadInputs {
        let entry = |flag: &Option<String>, default: f64| flag.clone().unwrap_or_else(|| default.to_string());
        let text = LoadInputText {
            site_class: entry(&self.site_class, defaults.site_class),
            importance_factor: entry(&self.importance, defaults.importance_factor),
            spectral_response_acceleration: entry(&self.spectral, defaults.spectral_response_acceleration),
            wind_force: entry(&self.wind_force, defaults.wind_force),
            snow_load_per_area: entry(&self.snow_load, defaults.snow_load_per_area),
            ice_load_per_area: entry(&self.ice_load, defaults.ice_load_per_area),
            building_height: entry(&self.building_height, defaults.building_height),
        };
        LoadInputs::from_text(&text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Asd,
    Lrfd,
}

impl From<Method> for DesignMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Asd => DesignMethod::Asd,
            Method::Lrfd => DesignMethod::Lrfd,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TakeoffConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging.level, cli.verbose);

    match cli.command {
        Commands::Analyze {
            snapshot,
            source,
            live_loads,
            remove_origin,
            method,
            output,
            loads,
        } => {
            let options = AnalysisOptions {
                remove_origin: remove_origin || config.extraction.remove_origin,
                names: config.extraction.names.clone(),
                design_method: method.into(),
            };
            analyze_command(
                &loads.resolve(&config.loads),
                &options,
                &snapshot,
                source.as_deref(),
                live_loads.as_deref(),
                output,
            )
        }
        Commands::Forces { file } => forces_command(&file),
        Commands::Seismic {
            site_class,
            importance,
            spectral,
        } => {
            let seismic_load = seismic_load_simplified(site_class, importance, spectral);
            let result = json!({
                "site_class": site_class,
                "importance_factor": importance,
                "spectral_response_acceleration": spectral,
                "seismic_load": seismic_load,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

fn analyze_command(
    inputs: &LoadInputs,
    options: &AnalysisOptions,
    snapshot: &Path,
    source: Option<&Path>,
    live_loads: Option<&Path>,
    output: Option<PathBuf>,
) -> Result<()> {
    let model = report_io::load_model(snapshot, source)?;
    tracing::info!(path = %snapshot.display(), entities = model.len(), "model loaded");

    let live_loads = match live_loads {
        Some(path) => report_io::load_live_loads(path)?,
        None => Vec::new(),
    };

    let report = analyze(&model, inputs, &live_loads, options)
        .with_context(|| format!("analyzing {}", snapshot.display()))?;

    let output = output.unwrap_or_else(|| report_io::default_output_path(snapshot));
    report_io::save_report(&report, &output)?;

    println!("{}", report.story_message);
    println!(
        "Plan area {:.1} sq ft, perimeter {:.1} ft, dead load {:.2} lb",
        report.areas.xy, report.perimeter, report.loads.dead
    );
    println!(
        "Governing {}: {} ({:.2} lb)",
        report.design_method, report.governing.max_combo, report.governing.max_load
    );
    println!("Report written to {}", output.display());
    Ok(())
}

fn forces_command(file: &Path) -> Result<()> {
    let source = report_io::load_source(file)?;
    let floors =
        extract_forces_moments(&source).with_context(|| format!("extracting forces from {}", file.display()))?;
    let result = json!({
        "floors": floors,
        "totals": floors.totals(),
    });
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Level from config, raised to debug by `--verbose`; `RUST_LOG` overrides both.
/// Logs go to stderr so JSON on stdout stays clean.
fn init_logging(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if subscriber.try_init().is_err() {
        // already initialized
    }
}
