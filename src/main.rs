//! `oja-assets`: renders the Oja POS brand assets to PNG files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use oja_icon_renderer::{
    AssetManifest, BrandPalette, FixedMetricText, PngDirectory, TextEngine, resolve_text_engine,
};

#[derive(Debug, Parser)]
#[command(
    name = "oja-assets",
    version,
    about = "Render the Oja POS icon, favicon and splash assets"
)]
struct Args {
    /// JSON manifest describing the artifacts to render (defaults to the release set).
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Output directory, overriding the manifest's.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Print the effective manifest as JSON and exit.
    #[arg(long)]
    print_manifest: bool,

    /// Use the built-in fixed-metric face instead of system fonts.
    #[arg(long)]
    fixed_font: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut manifest = match &args.manifest {
        Some(path) => match AssetManifest::load(path) {
            Ok(manifest) => manifest,
            Err(err) => {
                error!(%err, "could not load manifest");
                return ExitCode::FAILURE;
            }
        },
        None => AssetManifest::default(),
    };
    if let Some(dir) = args.out_dir {
        manifest.output_dir = dir;
    }

    if args.print_manifest {
        return match manifest.to_json_pretty() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(%err, "could not serialize manifest");
                ExitCode::FAILURE
            }
        };
    }

    let text: Box<dyn TextEngine> = if args.fixed_font {
        Box::new(FixedMetricText)
    } else {
        resolve_text_engine(&manifest.fonts)
    };
    info!(
        engine = text.name(),
        output = %manifest.output_dir.display(),
        artifacts = manifest.artifacts.len(),
        "generating assets"
    );

    let mut sink = PngDirectory::new(&manifest.output_dir);
    let report = manifest
        .pipeline()
        .run(&BrandPalette::OJA, text.as_ref(), &mut sink);

    let failed = report.failures().count();
    if failed > 0 {
        error!(failed, total = report.outcomes.len(), "some artifacts were not generated");
        return ExitCode::FAILURE;
    }
    info!(saved = report.saved().count(), "done");
    ExitCode::SUCCESS
}
