//! Folder-level batch processing
//!
//! A session folder holds one position log (`.pos`) and any number of frame
//! manifests (`.json`). The log is parsed once and shared read-only by every
//! manifest's pipeline. A failing manifest is reported and skipped; only a
//! missing or unusable position log aborts the batch.

use crate::associate::{associate_frames, SearchStrategy};
use crate::centroid::calculate_centroid;
use crate::error::{GeotagError, Result};
use crate::export::{compute_output_path, write_geojson, ExportOptions};
use crate::geojson::build_feature_collection;
use crate::parser::{read_manifest, read_position_log};
use crate::types::{Association, FrameManifest, GeoJsonDocument, PositionTrack};
use glob::{glob_with, MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

pub const POSITION_LOG_EXTENSION: &str = "pos";
pub const MANIFEST_EXTENSION: &str = "json";

/// Files written for one manifest
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutputs {
    pub geojson_path: PathBuf,
    pub csv_path: Option<PathBuf>,
    pub frame_count: usize,
}

/// Result of processing one manifest
#[derive(Debug)]
pub struct SessionOutcome {
    /// Position of the manifest in processing order; names its outputs
    pub index: usize,
    pub manifest_path: PathBuf,
    pub result: Result<SessionOutputs>,
}

/// Summary of a folder run
#[derive(Debug)]
pub struct BatchReport {
    pub position_log: PathBuf,
    pub sample_count: usize,
    pub sessions: Vec<SessionOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &SessionOutcome> {
        self.sessions.iter().filter(|s| s.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &SessionOutcome> {
        self.sessions.iter().filter(|s| s.result.is_err())
    }

    pub fn all_succeeded(&self) -> bool {
        self.sessions.iter().all(|s| s.result.is_ok())
    }
}

/// Regular files directly inside `folder` with the given extension
/// (case-insensitive), sorted by path
pub fn find_files_with_extension(folder: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let folder_str = folder.to_str().ok_or_else(|| {
        GeotagError::Glob(format!("non UTF-8 folder path: {}", folder.display()))
    })?;
    let pattern = format!("{}/*.{}", Pattern::escape(folder_str), extension);
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut files = Vec::new();
    for entry in glob_with(&pattern, options)? {
        let path = entry.map_err(|e| GeotagError::io(e.path().to_path_buf(), e.into_error()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Locate the position log and the manifests to process in `folder`.
///
/// Our own previous outputs are not treated as manifests.
pub fn discover_inputs(folder: &Path, options: &ExportOptions) -> Result<(PathBuf, Vec<PathBuf>)> {
    if !folder.is_dir() {
        return Err(GeotagError::NotFound(format!(
            "input folder {}",
            folder.display()
        )));
    }

    let mut position_logs = find_files_with_extension(folder, POSITION_LOG_EXTENSION)?.into_iter();
    let position_log = position_logs.next().ok_or_else(|| {
        GeotagError::NotFound(format!(
            "no .{POSITION_LOG_EXTENSION} file in {}",
            folder.display()
        ))
    })?;
    let extra = position_logs.count();
    if extra > 0 {
        warn!(
            "Found {} position logs in {}, using {}",
            extra + 1,
            folder.display(),
            position_log.display()
        );
    }

    let writes_here = options.resolve_output_dir(folder) == folder;
    let manifests = find_files_with_extension(folder, MANIFEST_EXTENSION)?
        .into_iter()
        .filter(|path| {
            let own_output = writes_here
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| options.is_output_name(name))
                && is_previous_output(path);
            if own_output {
                info!("Skipping previous output {}", path.display());
            }
            !own_output
        })
        .collect();

    Ok((position_log, manifests))
}

/// True if `path` holds a GeoJSON document we wrote rather than a manifest.
/// Unreadable or malformed files are left to the manifest parser to report.
fn is_previous_output(path: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(path) else {
        return false;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&content) else {
        return false;
    };
    value.get("type").and_then(|t| t.as_str()) == Some("FeatureCollection")
        && value.get("timestamps").is_none()
}

/// Core pipeline for one manifest: associate, reduce, assemble
pub fn geotag_manifest(
    manifest: &FrameManifest,
    track: &PositionTrack,
    strategy: SearchStrategy,
) -> Result<(Vec<Association>, GeoJsonDocument)> {
    let associations = associate_frames(manifest, track, strategy)?;
    let centroid = calculate_centroid(&associations)?;
    let document = build_feature_collection(&manifest.metadata, &associations, &centroid);
    Ok((associations, document))
}

/// Read one manifest, geotag it against `track` and write its outputs
pub fn process_session(
    manifest_path: &Path,
    track: &PositionTrack,
    index: usize,
    input_dir: &Path,
    options: &ExportOptions,
) -> Result<SessionOutputs> {
    let manifest = read_manifest(manifest_path)?;
    let (associations, document) = geotag_manifest(&manifest, track, options.search)?;

    let geojson_path = compute_output_path(options, input_dir, index, "json");
    write_geojson(&geojson_path, &document)?;

    #[cfg(feature = "csv")]
    let csv_path = if options.csv {
        let path = compute_output_path(options, input_dir, index, "csv");
        if let Err(e) = crate::export::write_associations_csv(&path, &associations) {
            // A session either produces all of its outputs or none
            if let Err(remove_error) = std::fs::remove_file(&geojson_path) {
                warn!(
                    "Could not remove {} after failed CSV export: {remove_error}",
                    geojson_path.display()
                );
            }
            return Err(e);
        }
        Some(path)
    } else {
        None
    };
    #[cfg(not(feature = "csv"))]
    let csv_path = {
        if options.csv {
            warn!("CSV export requested but the 'csv' feature is disabled");
        }
        None
    };

    Ok(SessionOutputs {
        geojson_path,
        csv_path,
        frame_count: associations.len(),
    })
}

/// Geotag every manifest in `folder` against its single position log
pub fn process_folder(folder: &Path, options: &ExportOptions) -> Result<BatchReport> {
    let (position_log, manifests) = discover_inputs(folder, options)?;
    info!(
        "Using position log {} for {} manifest(s)",
        position_log.display(),
        manifests.len()
    );

    let track = read_position_log(&position_log)?;
    if let Some((first, last)) = track.time_span_ns() {
        debug!(
            "Position track spans {} .. {}",
            crate::parser::format_timestamp(first).unwrap_or_else(|| first.to_string()),
            crate::parser::format_timestamp(last).unwrap_or_else(|| last.to_string())
        );
    }

    let sessions = manifests
        .into_iter()
        .enumerate()
        .map(|(index, manifest_path)| {
            debug!("Processing manifest {index}: {}", manifest_path.display());
            let result = process_session(&manifest_path, &track, index, folder, options);
            if let Err(e) = &result {
                error!("Failed to process {}: {e}", manifest_path.display());
            }
            SessionOutcome {
                index,
                manifest_path,
                result,
            }
        })
        .collect();

    Ok(BatchReport {
        position_log,
        sample_count: track.len(),
        sessions,
    })
}
