//! Geotag a session folder and print a short summary of each output
//!
//! Usage: cargo run --example geotag_folder -- <session folder>

use frame_geotag::{
    format_timestamp, geotag_manifest, read_manifest, read_position_log, ExportOptions,
    SearchStrategy,
};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let folder = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "session".to_string());
    let folder = Path::new(&folder);

    let options = ExportOptions::default();
    let (position_log, manifests) = frame_geotag::discover_inputs(folder, &options)?;
    let track = read_position_log(&position_log)?;

    println!("Position log: {}", position_log.display());
    if let Some((first, last)) = track.time_span_ns() {
        println!(
            "  {} fixes from {} to {}",
            track.len(),
            format_timestamp(first).unwrap_or_default(),
            format_timestamp(last).unwrap_or_default()
        );
    }

    for path in manifests {
        let manifest = match read_manifest(&path) {
            Ok(manifest) => manifest,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                continue;
            }
        };
        match geotag_manifest(&manifest, &track, SearchStrategy::Indexed) {
            Ok((associations, document)) => println!(
                "{}: {} frames, centroid {:.6}, {:.6}",
                path.display(),
                associations.len(),
                document.centroid.lat,
                document.centroid.lon
            ),
            Err(e) => eprintln!("{}: {e}", path.display()),
        }
    }

    Ok(())
}
