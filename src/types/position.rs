use serde::Serialize;

/// A single GNSS fix from the position log
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionSample {
    /// Nanoseconds since the Unix epoch
    pub timestamp_ns: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl PositionSample {
    pub fn new(timestamp_ns: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp_ns,
            latitude,
            longitude,
        }
    }
}

/// Position fixes in the order they appear in the source log.
///
/// The order is not guaranteed to be chronological; consumers must not
/// rely on it being sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionTrack {
    samples: Vec<PositionSample>,
}

impl PositionTrack {
    pub fn new(samples: Vec<PositionSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[PositionSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Earliest and latest sample timestamps, regardless of source order
    pub fn time_span_ns(&self) -> Option<(i64, i64)> {
        let first = self.samples.iter().map(|s| s.timestamp_ns).min()?;
        let last = self.samples.iter().map(|s| s.timestamp_ns).max()?;
        Some((first, last))
    }

    /// True when timestamps never decrease in source order
    pub fn is_chronological(&self) -> bool {
        self.samples
            .windows(2)
            .all(|pair| pair[0].timestamp_ns <= pair[1].timestamp_ns)
    }
}

impl From<Vec<PositionSample>> for PositionTrack {
    fn from(samples: Vec<PositionSample>) -> Self {
        Self::new(samples)
    }
}
