use std::{path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;
use watermarker::{
    Anchor, BatchOptions, BatchReport, Opacity, SettingsFile, WatermarkError, WatermarkSettings,
};

#[derive(Parser, Debug)]
#[command(
    name = "watermarker",
    version,
    about = "Watermarks images with the provided SVG watermark"
)]
struct Cli {
    /// Watermark SVG file.
    watermark: PathBuf,

    /// Images to watermark (jpg, jpeg or png). Results are written as PNG.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Placement: topleft, topright, bottomleft, bottomright or center [default: bottomright].
    #[arg(short, long)]
    position: Option<String>,

    /// Watermark opacity in 0.0..=1.0 [default: 1.0].
    #[arg(short, long, allow_negative_numbers = true)]
    alpha: Option<f32>,

    /// JSON settings file (`{"anchor": "center", "opacity": 0.5}`); flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not write `<file>.bak` copies before modifying targets.
    #[arg(long)]
    no_backup: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

const EXIT_INVALID_WATERMARK: u8 = 1;
const EXIT_MISSING_WATERMARK: u8 = 2;
const EXIT_BACKUP_FAILED: u8 = 3;
const EXIT_INVALID_SETTINGS: u8 = 4;
const EXIT_TARGET_FAILED: u8 = 5;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            print_report(&report);
            if report.has_failures() {
                ExitCode::from(EXIT_TARGET_FAILED)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<BatchReport, WatermarkError> {
    let settings = resolve_settings(cli)?;
    let options = BatchOptions {
        backup: !cli.no_backup,
    };
    watermarker::run_batch(&cli.watermark, &cli.files, &settings, &options)
}

fn resolve_settings(cli: &Cli) -> Result<WatermarkSettings, WatermarkError> {
    let base = match &cli.config {
        Some(path) => WatermarkSettings::from_json_file(path)?,
        None => WatermarkSettings::default(),
    };
    let overrides = SettingsFile {
        anchor: cli
            .position
            .as_deref()
            .map(str::parse::<Anchor>)
            .transpose()?,
        opacity: cli.alpha.map(Opacity::new).transpose()?,
    };
    Ok(base.merged(overrides))
}

fn print_report(report: &BatchReport) {
    for r in &report.skipped {
        eprintln!("Skipping {}: {}", r.path.display(), r.message);
    }
    for r in &report.failed {
        eprintln!("Failed {}: {}", r.path.display(), r.message);
    }
    for w in &report.written {
        if w.removed_original {
            eprintln!("wrote {} (replaced {})", w.output.display(), w.source.display());
        } else {
            eprintln!("wrote {}", w.output.display());
        }
    }
}

fn exit_code_for(err: &WatermarkError) -> u8 {
    match err {
        WatermarkError::InvalidSource(_) => EXIT_INVALID_WATERMARK,
        // Targets never surface as fatal, so a missing file here is the watermark.
        WatermarkError::MissingFile(_) => EXIT_MISSING_WATERMARK,
        WatermarkError::Backup { .. } => EXIT_BACKUP_FAILED,
        WatermarkError::InvalidAnchor(_)
        | WatermarkError::InvalidOpacity(_)
        | WatermarkError::Config(_) => EXIT_INVALID_SETTINGS,
        _ => 1,
    }
}
