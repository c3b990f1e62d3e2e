/// fsurf terminal viewer
///
/// Shows the built-in function surfaces as shaded characters.
/// Controls:
///   - Right mouse drag: Rotate the surface
///   - N/P or Right/Left: Next / previous surface
///   - R: Reset rotation
///   - Q/ESC: Quit
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use fsurf_core::{config, preset_by_name, presets, ViewConfig, PRESET_FUNCTIONS};
use fsurf_terminal::cli::Args;
use fsurf_terminal::{logging, AppError, TerminalApp};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let log_directive = args.log_level.as_deref().map_or_else(
        || "fsurf=warn".to_string(),
        |level| format!("fsurf={level}"),
    );
    let writer = match logging::log_writer(args.log_file.as_deref()) {
        Ok(writer) => writer,
        Err(e) => {
            eprintln!("error: cannot open log file: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(args.log_file.is_none())
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_directive)),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    if args.list {
        for preset in PRESET_FUNCTIONS {
            println!("{:<20} {}", preset.slug(), preset.description);
        }
        return Ok(());
    }

    let config = match args.config.as_deref() {
        Some(path) => config::load_from_path(Path::new(path))?,
        None => ViewConfig::default(),
    };

    let (surfaces, start) = match (&args.function, args.x_domain, args.y_domain) {
        (Some(name), Some(x_domain), Some(y_domain)) => {
            let preset =
                preset_by_name(name).ok_or_else(|| AppError::UnknownPreset(name.clone()))?;
            (vec![preset.sample_over(&x_domain, &y_domain)?], 0)
        }
        _ => {
            let surfaces = presets()?;
            let start = match args.preset.as_deref() {
                Some(name) => {
                    let preset = preset_by_name(name)
                        .ok_or_else(|| AppError::UnknownPreset(name.to_string()))?;
                    PRESET_FUNCTIONS
                        .iter()
                        .position(|p| p.title == preset.title)
                        .unwrap_or(0)
                }
                None => 0,
            };
            (surfaces, start)
        }
    };

    let mut app = TerminalApp::new(surfaces, start, config)?;
    app.run()
}
