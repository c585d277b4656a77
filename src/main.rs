//! CLI binary for Frame Geotag
//!
//! Geotags every frame manifest in a session folder against the folder's
//! position log and writes one GeoJSON document per manifest.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use frame_geotag::{process_folder, ExportOptions, SearchStrategy, DEFAULT_OUTPUT_PREFIX};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn long_version() -> String {
    format!(
        "{} (git {}, built {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown")
    )
}

fn build_command() -> Command {
    Command::new("Frame Geotag")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version())
        .about("Match frame manifest timestamps to a GNSS position log and export GeoJSON per session.")
        .arg(
            Arg::new("folder")
                .help("Session folder containing exactly one .pos position log and one or more .json frame manifests")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed processing information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: the session folder)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .help("Output file name prefix; files are named <prefix>_<index>.json")
                .value_name("NAME")
                .default_value(DEFAULT_OUTPUT_PREFIX),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Also export per-frame positions to <prefix>_<index>.csv")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("linear-search")
                .long("linear-search")
                .help("Scan the whole track for every frame instead of using a sorted index (same results, slower)")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    init_logging(debug);

    // No folder given: show help and exit
    let folder = match matches.get_one::<String>("folder") {
        Some(folder) => PathBuf::from(folder),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let options = ExportOptions {
        output_dir: matches.get_one::<String>("output-dir").map(PathBuf::from),
        prefix: matches
            .get_one::<String>("prefix")
            .cloned()
            .unwrap_or_else(|| DEFAULT_OUTPUT_PREFIX.to_string()),
        csv: matches.get_flag("csv"),
        search: if matches.get_flag("linear-search") {
            SearchStrategy::Linear
        } else {
            SearchStrategy::Indexed
        },
    };

    tracing::debug!("Options: {options:?}");

    let report = process_folder(&folder, &options)
        .with_context(|| format!("Failed to process session folder {}", folder.display()))?;

    println!(
        "Position log: {} ({} samples)",
        report.position_log.display(),
        report.sample_count
    );
    for session in &report.sessions {
        let name = session
            .manifest_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        match &session.result {
            Ok(outputs) => println!(
                "[{}] {name}: {} frames -> {}",
                session.index,
                outputs.frame_count,
                outputs.geojson_path.display()
            ),
            Err(e) => eprintln!("[{}] {name}: error: {e}", session.index),
        }
    }

    let failed = report.failed().count();
    if report.sessions.is_empty() {
        eprintln!("Warning: No frame manifests found in {}", folder.display());
    } else if failed == report.sessions.len() {
        eprintln!(
            "Error: No manifests were successfully processed out of {} found.",
            report.sessions.len()
        );
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    } else if failed > 0 {
        eprintln!("{failed} of {} manifests failed.", report.sessions.len());
    }

    Ok(())
}
