//! Wind contour generator.
//!
//! Reads decoded wind samples (one set per forecast time) and writes either
//! Beaufort-level wind-speed isolines or the raw vector field as JSON.

mod config;
mod io;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use contour_engine::{encode_vector_field, ContourSeriesBuilder};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Wind-speed isolines per threshold level
    Contours,
    /// Raw u/v vectors per sample
    Vectors,
}

#[derive(Parser, Debug)]
#[command(name = "wind-contours")]
#[command(about = "Generate wind-speed contours from decoded model output")]
struct Args {
    /// Decoded sample file (JSON)
    #[arg(default_value = "data/harmony.json")]
    input: PathBuf,

    /// Output file (default: stdout)
    output: Option<PathBuf>,

    /// What to produce
    #[arg(long, value_enum, default_value = "contours")]
    mode: Mode,

    /// Settings file (YAML)
    #[arg(short, long, env = "CONTOUR_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the JSON document, logs go to stderr
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);
    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    info!(input = %args.input.display(), mode = ?args.mode, "Starting wind-contours");

    let settings = config::load_settings(args.config.as_deref())?;
    let slices = io::read_slices(&args.input)?;

    match args.mode {
        Mode::Contours => {
            let builder = ContourSeriesBuilder::new(settings)?;
            let records = builder.build(&slices)?;
            io::write_json(&records, args.output.as_deref(), args.pretty)?;
        }
        Mode::Vectors => {
            let records = encode_vector_field(&slices, settings.vector_precision);
            io::write_json(&records, args.output.as_deref(), args.pretty)?;
        }
    }

    Ok(())
}
