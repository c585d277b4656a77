use serde::{Deserialize, Serialize};

/// One recorded frame: its index within the session and capture time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(u64, i64)")]
pub struct FrameEntry {
    pub index: u64,
    /// Nanoseconds since the Unix epoch
    pub timestamp_ns: i64,
}

impl From<(u64, i64)> for FrameEntry {
    fn from((index, timestamp_ns): (u64, i64)) -> Self {
        Self {
            index,
            timestamp_ns,
        }
    }
}

/// Session start/end marker, relayed verbatim as text or number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionMarker {
    Number(serde_json::Number),
    Text(String),
}

impl Default for SessionMarker {
    fn default() -> Self {
        SessionMarker::Text(String::new())
    }
}

/// Passthrough session metadata. Absent fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionMetadata {
    pub filename: String,
    pub device_alias: String,
    pub total: u64,
    pub beginning: SessionMarker,
    pub end: SessionMarker,
}

/// A parsed frame manifest for one recording session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameManifest {
    pub metadata: SessionMetadata,
    pub frames: Vec<FrameEntry>,
}

impl FrameManifest {
    pub fn new(metadata: SessionMetadata, frames: Vec<FrameEntry>) -> Self {
        Self { metadata, frames }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
