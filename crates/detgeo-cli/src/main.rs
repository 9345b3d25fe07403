//! detgeo CLI - inspect and round-trip surface JSON documents

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use detgeo_json::{ConverterOptions, SurfaceConverter};
use detgeo_math::GeometryContext;
use detgeo_surfaces::Surface;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "detgeo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and round-trip detector surface JSON documents", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// TOML file with converter options
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the surfaces in a document
    Info {
        /// Surface document (single object or array)
        file: PathBuf,
    },
    /// Decode, re-encode and verify a document
    Roundtrip {
        /// Input surface document
        input: PathBuf,
        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = load_options(cli.config.as_deref())?;
    let converter = SurfaceConverter::with_options(options);

    match cli.command {
        Commands::Info { file } => show_info(&converter, &file),
        Commands::Roundtrip { input, output } => {
            roundtrip_file(&converter, &input, output.as_deref())
        }
    }
}

fn load_options(path: Option<&Path>) -> Result<ConverterOptions> {
    let Some(path) = path else {
        return Ok(ConverterOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let options = toml::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!(config = %path.display(), "loaded converter options");
    Ok(options)
}

/// Decode a single surface object or an array of them.
fn decode_all(converter: &SurfaceConverter, document: &Value) -> Result<Vec<Box<dyn Surface>>> {
    if document.is_array() {
        Ok(converter.surfaces_from_document(document)?)
    } else {
        Ok(vec![converter.from_document(document)?])
    }
}

fn read_document(path: &Path) -> Result<Value> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}

fn describe(surface: &dyn Surface) -> String {
    let center = surface.center(&GeometryContext::nominal());
    let bounds = surface
        .bounds()
        .map(|b| b.to_string())
        .unwrap_or_else(|| "unbounded".to_string());
    let id = surface
        .geometry_id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unassigned".to_string());
    format!(
        "{} at ({}, {}, {}) {} id {}",
        surface.type_name(),
        center.x,
        center.y,
        center.z,
        bounds,
        id
    )
}

fn show_info(converter: &SurfaceConverter, file: &Path) -> Result<()> {
    let document = read_document(file)?;
    let surfaces = decode_all(converter, &document)?;

    println!("surface document: {}", file.display());
    println!("  Surfaces: {}", surfaces.len());
    for (i, surface) in surfaces.iter().enumerate() {
        println!("  {}: {}", i, describe(surface.as_ref()));
    }
    Ok(())
}

/// Check that `restored` carries the same kind, bounds, identifier and
/// (approximately) transform as `original`.
fn verify_roundtrip(
    original: &dyn Surface,
    restored: &dyn Surface,
    precision: f64,
) -> Result<()> {
    let gctx = GeometryContext::nominal();
    anyhow::ensure!(
        original.type_name() == restored.type_name(),
        "kind changed: {} became {}",
        original.type_name(),
        restored.type_name()
    );
    anyhow::ensure!(
        original.bounds() == restored.bounds(),
        "{} bounds changed",
        original.type_name()
    );
    anyhow::ensure!(
        original.geometry_id() == restored.geometry_id(),
        "{} identifier changed",
        original.type_name()
    );
    anyhow::ensure!(
        original
            .transform(&gctx)
            .is_approx(restored.transform(&gctx), precision),
        "{} transform differs beyond relative precision {}",
        original.type_name(),
        precision
    );
    Ok(())
}

fn roundtrip_file(converter: &SurfaceConverter, input: &Path, output: Option<&Path>) -> Result<()> {
    let document = read_document(input)?;
    let surfaces = decode_all(converter, &document)?;

    let encoded = if document.is_array() {
        converter.surfaces_to_document(&surfaces)
    } else {
        converter.to_document(surfaces[0].as_ref())
    };
    let reloaded = decode_all(converter, &encoded)?;
    for (original, restored) in surfaces.iter().zip(&reloaded) {
        verify_roundtrip(
            original.as_ref(),
            restored.as_ref(),
            converter.options().approx_precision,
        )?;
    }
    info!(count = surfaces.len(), "round trip verified");

    let json = serde_json::to_string_pretty(&encoded)?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!("Wrote {} surface(s) to {}", surfaces.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
