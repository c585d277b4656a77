//! Export of geotagged sessions
//!
//! Writes the GeoJSON document for each session and, with the `csv` feature,
//! a flat per-frame CSV alongside it.

use crate::associate::SearchStrategy;
use crate::error::{GeotagError, Result};
#[cfg(feature = "csv")]
use crate::types::Association;
use crate::types::GeoJsonDocument;
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Default output file stem prefix, giving `geojson_0.json`, `geojson_1.json`, ...
pub const DEFAULT_OUTPUT_PREFIX: &str = "geojson";

/// Options controlling where and how session outputs are written
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Output directory. Defaults to the input folder when `None`.
    pub output_dir: Option<PathBuf>,
    /// Output file stem prefix
    pub prefix: String,
    /// Also write `<prefix>_<index>.csv`
    pub csv: bool,
    /// Nearest-fix search used when associating frames with the track
    pub search: SearchStrategy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            csv: false,
            search: SearchStrategy::default(),
        }
    }
}

impl ExportOptions {
    /// Directory outputs go to, falling back to `input_dir`
    pub fn resolve_output_dir(&self, input_dir: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| input_dir.to_path_buf())
    }

    /// True if `file_name` looks like one of our own `<prefix>_<n>.<ext>` outputs
    pub fn is_output_name(&self, file_name: &str) -> bool {
        file_name
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|rest| rest.split_once('.'))
            .is_some_and(|(number, _)| {
                !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit())
            })
    }
}

/// `<output_dir>/<prefix>_<index>.<extension>`
pub fn compute_output_path(
    options: &ExportOptions,
    input_dir: &Path,
    index: usize,
    extension: &str,
) -> PathBuf {
    options
        .resolve_output_dir(input_dir)
        .join(format!("{}_{}.{}", options.prefix, index, extension))
}

/// Write `path` through a sibling temporary file that is renamed into place
/// once `write` has succeeded, so a failed write never leaves a partial file.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<()>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| GeotagError::io(parent, e))?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| GeotagError::io(parent, e))?;
    {
        let mut writer = BufWriter::new(&mut temp);
        write(&mut writer)?;
        writer.flush().map_err(|e| GeotagError::io(path, e))?;
    }
    temp.persist(path).map_err(|e| GeotagError::io(path, e.error))?;
    Ok(())
}

fn json_error(path: &Path, e: serde_json::Error) -> GeotagError {
    if e.is_io() {
        GeotagError::io(path, e.into())
    } else {
        GeotagError::Json(e)
    }
}

#[cfg(feature = "csv")]
fn csv_error(path: &Path, e: csv::Error) -> GeotagError {
    if e.is_io_error() {
        GeotagError::io(path, e.into())
    } else {
        GeotagError::Csv(e)
    }
}

/// Serialize `document` into `writer` with 4-space indentation.
/// `path` only labels I/O failures.
pub fn write_geojson_to<W: Write>(
    writer: W,
    path: &Path,
    document: &GeoJsonDocument,
) -> Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|e| json_error(path, e))
}

/// Write a GeoJSON document pretty-printed with 4-space indentation,
/// creating missing parent directories
pub fn write_geojson(path: &Path, document: &GeoJsonDocument) -> Result<()> {
    write_atomically(path, |writer| write_geojson_to(writer, path, document))?;

    info!(
        "Exported {} features to: {}",
        document.features.len(),
        path.display()
    );
    Ok(())
}

#[cfg(feature = "csv")]
#[derive(Serialize)]
struct AssociationRow {
    index: u64,
    timestamp: i64,
    latitude: f64,
    longitude: f64,
}

/// Write associations as CSV rows into `writer`; `path` only labels I/O failures
#[cfg(feature = "csv")]
pub fn write_associations_csv_to<W: Write>(
    writer: W,
    path: &Path,
    associations: &[Association],
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for association in associations {
        writer
            .serialize(AssociationRow {
                index: association.index,
                timestamp: association.timestamp_ns,
                latitude: association.latitude,
                longitude: association.longitude,
            })
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| GeotagError::io(path, e))
}

/// Write associations as `index,timestamp,latitude,longitude` rows
#[cfg(feature = "csv")]
pub fn write_associations_csv(path: &Path, associations: &[Association]) -> Result<()> {
    write_atomically(path, |writer| {
        write_associations_csv_to(writer, path, associations)
    })?;

    info!("Exported frame positions to: {}", path.display());
    Ok(())
}
