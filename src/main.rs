mod app;

use anyhow::{anyhow, Context, Result};
use app::DemoApp;
use clap::Parser;
use eframe::NativeOptions;
use egui_media_controls::ControlsConfig;
use env_logger::Env;
use std::path::PathBuf;

/// Auto-hiding media controls over a simulated player
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Length of the simulated media, in seconds
    #[arg(long, default_value_t = 95.0)]
    duration: f64,

    /// Initial buffering time, in seconds
    #[arg(long, default_value_t = 1.5)]
    loading: f64,

    /// TOML file with overlay timings and colour
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    let config = match &args.config {
        Some(path) => ControlsConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ControlsConfig::default(),
    };
    let main_color = config.main_color32()?;
    log::info!(
        "Starting demo: {:.1}s of media, hide after {:?}",
        args.duration,
        config.fade_out_delay()
    );

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Media Controls",
        options,
        Box::new(move |cc| {
            Ok(Box::new(DemoApp::new(
                cc,
                &config,
                main_color,
                args.duration,
                args.loading,
            )))
        }),
    )
    .map_err(|e| anyhow!("Failed to run demo: {e}"))
}
