use clap::{Parser, ValueEnum};
use floodzone_service::analysis;
use floodzone_service::config::{self, ServiceConfig};
use floodzone_service::logging::{self, Component};
use floodzone_service::report;
use floodzone_service::scene;
use floodzone_service::zones::{self, ZoneRegistry};
use std::error::Error;
use std::path::PathBuf;

/// Flood risk per neighborhood for a rainfall / river scenario
#[derive(Parser, Debug)]
#[command(name = "floodzone")]
#[command(
    about = "Scores city zones for flood risk and prints a report or a render scene",
    long_about = None
)]
struct Args {
    /// Expected rainfall in mm (0-150)
    #[arg(short, long)]
    rainfall: Option<f64>,

    /// Rainfall duration in hours (1-12)
    #[arg(short, long)]
    duration: Option<f64>,

    /// River level in metres (0-10)
    #[arg(long)]
    river_level: Option<f64>,

    /// Camera pitch in degrees (0-70)
    #[arg(long)]
    pitch: Option<f64>,

    /// Camera bearing in degrees (-180-180)
    #[arg(long, allow_hyphen_values = true)]
    bearing: Option<f64>,

    /// Map zoom (9-14)
    #[arg(long)]
    zoom: Option<f64>,

    /// Zones file with [[zone]] tables (defaults to the built-in city)
    #[arg(short, long)]
    zones: Option<PathBuf>,

    /// Config file (defaults to $FLOODZONE_CONFIG, then ./floodzone.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Minimum log level (debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Append log entries to this file
    #[arg(long)]
    log_file: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Analytics report
    Text,
    /// Render scene for the map views
    Json,
}

fn main() -> Result<(), Box<dyn Error>> {
    config::load_dotenv();
    let args = Args::parse();

    let service_config = match config::resolve_config_path(args.config.as_deref()) {
        Some(path) => config::load_config(&path)?,
        None => ServiceConfig::default(),
    };

    let level = service_config.log_level_with(args.log_level.as_deref())?;
    let log_file = args.log_file.as_deref().or(service_config.logging.file.as_deref());
    logging::init_logger(level, log_file, service_config.logging.timestamps);
    if let Some(dir) = service_config.base_dir() {
        logging::debug(Component::System, None, &format!("Config directory {}", dir.display()));
    }

    let registry = match config::resolve_zones_path(args.zones.as_deref(), &service_config) {
        Some(path) => zones::load_zones(&path).inspect_err(|e| {
            logging::log_rejected_input(Component::Registry, "Zones file", e);
        })?,
        None => ZoneRegistry::default_city(),
    };

    let params = service_config
        .simulation_parameters_with(args.rainfall, args.duration, args.river_level)
        .inspect_err(|e| {
            logging::log_rejected_input(Component::Evaluator, "Simulation parameters", e);
        })?;

    let view = service_config
        .view_parameters_with(args.pitch, args.bearing, args.zoom)
        .inspect_err(|e| logging::log_rejected_input(Component::Config, "View parameters", e))?;

    let assessment = analysis::assess(&registry, &params);

    match args.format {
        OutputFormat::Text => print!("{}", report::render_report(&assessment)),
        OutputFormat::Json => {
            let scene = scene::build_scene(&assessment, &view);
            println!("{}", scene::scene_json(&scene)?);
        }
    }

    logging::debug(Component::Report, None, "Output written");
    Ok(())
}
