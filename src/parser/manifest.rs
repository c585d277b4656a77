//! Frame manifest (JSON) parsing

use crate::error::{GeotagError, Result};
use crate::types::{FrameEntry, FrameManifest, SessionMarker, SessionMetadata};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::debug;

/// On-disk manifest layout. Metadata keys are optional; `null` counts as absent.
#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default, deserialize_with = "null_as_default")]
    filename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    device_alias: String,
    #[serde(default, deserialize_with = "null_as_default")]
    total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    beginning: SessionMarker,
    #[serde(default, deserialize_with = "null_as_default")]
    end: SessionMarker,
    #[serde(default)]
    timestamps: Option<Vec<FrameEntry>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse manifest JSON text.
///
/// Fails with [`GeotagError::NotFound`] when `timestamps` is absent and with
/// [`GeotagError::Parse`] for malformed or mistyped content.
pub fn parse_manifest(text: &str) -> Result<FrameManifest> {
    let raw: RawManifest = serde_json::from_str(text)
        .map_err(|e| GeotagError::Parse(format!("invalid frame manifest: {e}")))?;

    let frames = raw
        .timestamps
        .ok_or_else(|| GeotagError::NotFound("'timestamps' list in frame manifest".to_string()))?;

    let metadata = SessionMetadata {
        filename: raw.filename,
        device_alias: raw.device_alias,
        total: raw.total,
        beginning: raw.beginning,
        end: raw.end,
    };

    debug!(
        "Parsed manifest '{}' ({}) with {} frames",
        metadata.filename,
        metadata.device_alias,
        frames.len()
    );
    Ok(FrameManifest::new(metadata, frames))
}

/// Read and parse a manifest from disk
pub fn read_manifest(path: &Path) -> Result<FrameManifest> {
    let text = std::fs::read_to_string(path).map_err(|e| GeotagError::io(path, e))?;
    parse_manifest(&text)
}
