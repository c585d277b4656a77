//! Nearest-in-time association of frames to position fixes
//!
//! Every frame is paired with the fix whose timestamp is closest to its own.
//! When two fixes are equally close, the one appearing first in the source
//! log wins. Fixes are never interpolated.

use crate::error::{GeotagError, Result};
use crate::types::{Association, FrameEntry, FrameManifest, PositionSample, PositionTrack};
use tracing::debug;

/// How [`associate_frames`] searches the track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Scan the whole track for every frame, O(n·m)
    Linear,
    /// Binary search over a stable-sorted copy of the track, O((n + m) log n)
    #[default]
    Indexed,
}

/// Find the sample closest in time to `target_ns` by linear scan.
///
/// Ties resolve to the first minimal sample in slice order.
pub fn find_closest(samples: &[PositionSample], target_ns: i64) -> Result<&PositionSample> {
    samples
        .iter()
        .min_by_key(|sample| sample.timestamp_ns.abs_diff(target_ns))
        .ok_or(GeotagError::EmptyTrack)
}

/// Time-sorted view of a track for repeated nearest-fix lookups.
///
/// Gives exactly the same answers as [`find_closest`], including on tracks
/// that are not in chronological order.
#[derive(Debug, Clone)]
pub struct TrackIndex<'a> {
    samples: &'a [PositionSample],
    /// `(timestamp, source position)`, stable-sorted by timestamp
    order: Vec<(i64, usize)>,
}

impl<'a> TrackIndex<'a> {
    pub fn new(track: &'a PositionTrack) -> Self {
        let samples = track.samples();
        let mut order: Vec<(i64, usize)> = samples
            .iter()
            .enumerate()
            .map(|(position, sample)| (sample.timestamp_ns, position))
            .collect();
        // Stable: equal timestamps keep source order
        order.sort_by_key(|&(timestamp, _)| timestamp);
        Self { samples, order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sample closest in time to `target_ns`
    pub fn closest(&self, target_ns: i64) -> Result<&'a PositionSample> {
        // First entry at or after the target
        let after = self
            .order
            .partition_point(|&(timestamp, _)| timestamp < target_ns);

        let mut candidates = Vec::with_capacity(2);
        if let Some(&entry) = self.order.get(after) {
            candidates.push(entry);
        }
        if after > 0 {
            // Earliest-in-source sample of the last timestamp before the target
            let before = self.order[after - 1].0;
            let run_start = self
                .order
                .partition_point(|&(timestamp, _)| timestamp < before);
            candidates.push(self.order[run_start]);
        }

        candidates
            .into_iter()
            .min_by_key(|&(timestamp, position)| (timestamp.abs_diff(target_ns), position))
            .map(|(_, position)| &self.samples[position])
            .ok_or(GeotagError::EmptyTrack)
    }
}

fn associate(frame: &FrameEntry, sample: &PositionSample) -> Association {
    Association {
        index: frame.index,
        timestamp_ns: frame.timestamp_ns,
        latitude: sample.latitude,
        longitude: sample.longitude,
    }
}

/// Pair every frame of the manifest with its nearest fix, in manifest order.
///
/// Fails with [`GeotagError::EmptyTrack`] if the manifest has frames but the
/// track has no samples.
pub fn associate_frames(
    manifest: &FrameManifest,
    track: &PositionTrack,
    strategy: SearchStrategy,
) -> Result<Vec<Association>> {
    let mut max_offset_ns: u64 = 0;
    let mut pair = |frame: &FrameEntry, sample: &PositionSample| {
        max_offset_ns = max_offset_ns.max(frame.timestamp_ns.abs_diff(sample.timestamp_ns));
        associate(frame, sample)
    };

    let associations = match strategy {
        SearchStrategy::Linear => manifest
            .frames
            .iter()
            .map(|frame| -> Result<Association> {
                Ok(pair(frame, find_closest(track.samples(), frame.timestamp_ns)?))
            })
            .collect::<Result<Vec<_>>>()?,
        SearchStrategy::Indexed => {
            let index = TrackIndex::new(track);
            manifest
                .frames
                .iter()
                .map(|frame| -> Result<Association> {
                    Ok(pair(frame, index.closest(frame.timestamp_ns)?))
                })
                .collect::<Result<Vec<_>>>()?
        }
    };

    debug!(
        "Associated {} frames against {} fixes ({:?}), largest time offset {:.3}s",
        associations.len(),
        track.len(),
        strategy,
        max_offset_ns as f64 / 1e9
    );
    Ok(associations)
}
