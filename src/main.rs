use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::{info, warn};
use std::process;

use raster_report::cli::{normalize_args, Args};
use raster_report::stats_mode::split_stats_mode;
use raster_report::{MapsetCatalog, ReportConfig, ReportError, Result, StatsMode};

fn main() {
    let (stats_mode, raw_args) = split_stats_mode(std::env::args_os().collect());
    // Before parsing: a rejected command line still drops the stale cache
    let removed = stats_mode.prepare();
    let args = Args::parse_from(normalize_args(raw_args));

    // Warnings stay visible under -q
    let log_level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Some(path) = stats_mode.cache_file() {
        match removed {
            Ok(true) => info!("Removed existing stats cache {}", path.display()),
            Ok(false) => {}
            Err(e) => warn!("Unable to remove stats cache {}: {}", path.display(), e),
        }
    }

    if let Err(e) = run(&args, stats_mode) {
        eprintln!("ERROR: {}", e);
        if let ReportError::Usage(_) = e {
            eprintln!("{}", Args::command().render_usage());
        }
        process::exit(1);
    }
}

fn run(args: &Args, stats_mode: StatsMode) -> Result<()> {
    let catalog = MapsetCatalog::new(args.mapsets.clone());
    let mut config = ReportConfig::from_args(args, stats_mode, &catalog)?;

    info!(
        "Resolved {} map(s), {} unit(s), page {}x{}, nsteps={}",
        config.layers.len(),
        config.units.len(),
        config.page.length,
        config.page.width,
        config.subrange_count
    );

    match &config.stats_mode {
        StatsMode::StatsOnly(path) => {
            info!("Statistics go to {}, no report written", path.display());
            return Ok(());
        }
        StatsMode::ReportOnly(path) => info!("Reporting from stats cache {}", path.display()),
        StatsMode::Everything => {}
    }

    config.write_preamble()?;
    Ok(())
}
