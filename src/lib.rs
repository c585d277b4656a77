//! Frame Geotag Library
//!
//! Geotags the frames of a recording session by matching each frame
//! timestamp against a separately logged GNSS position track, then emits a
//! GeoJSON FeatureCollection per session.
//!
//! # Features
//!
//! - **`csv`** (default): Also export per-frame positions as CSV
//! - **`cli`** (default): Build the command-line interface binary
//!
//! # Quick Start
//!
//! Geotag one manifest against a position log held in memory:
//! ```rust
//! use frame_geotag::{geotag_manifest, parse_manifest, parse_position_log, SearchStrategy};
//!
//! let track = parse_position_log(
//!     "%  GPST  latitude(deg) longitude(deg)\n\
//!      2020/01/01 00:00:00.000000 40.712776 -74.005974\n",
//! )?;
//! let manifest = parse_manifest(r#"{"timestamps": [[0, 1577836800000000000]]}"#)?;
//! let (_, document) = geotag_manifest(&manifest, &track, SearchStrategy::default())?;
//! assert_eq!(document.features[0].geometry.coordinates, [-74.005974, 40.712776]);
//! # Ok::<(), frame_geotag::GeotagError>(())
//! ```
//!
//! Process a whole session folder:
//! ```rust,no_run
//! use frame_geotag::{process_folder, ExportOptions};
//! use std::path::Path;
//!
//! let report = process_folder(Path::new("session"), &ExportOptions::default()).unwrap();
//! for session in report.succeeded() {
//!     println!("{}", session.manifest_path.display());
//! }
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_timestamp`] / [`format_timestamp`] - Position-log time text to epoch nanoseconds and back
//! - [`parse_position_log`] / [`read_position_log`] - Position log to [`PositionTrack`]
//! - [`parse_manifest`] / [`read_manifest`] - Frame manifest JSON to [`FrameManifest`]
//!
//! ## Correlation
//! - [`find_closest`] - Nearest fix by linear scan
//! - [`TrackIndex`] - Sorted index for repeated nearest-fix lookups
//! - [`associate_frames`] - Pair every frame with its nearest fix
//! - [`calculate_centroid`] - Mean position of associated points
//! - [`build_feature_collection`] - Assemble the GeoJSON document
//!
//! ## Export and Batch Processing
//! - [`write_geojson`] - Write a document to disk
//! - [`compute_output_path`] - Consistent `<prefix>_<index>` output naming
//! - [`process_folder`] - Run every manifest in a folder against its position log

pub mod associate;
pub mod centroid;
pub mod error;
pub mod export;
pub mod geojson;
pub mod parser;
pub mod process;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use associate::*;
#[allow(ambiguous_glob_reexports)]
pub use centroid::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use geojson::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use process::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
