//! Position log (`.pos`) parsing
//!
//! The log opens with a free-form header. A line starting with
//! [`HEADER_MARKER`] names the columns; every line after it is a fix unless it
//! is a `%` comment or blank.

use crate::error::{GeotagError, Result};
use crate::parser::time::parse_timestamp;
use crate::types::{PositionSample, PositionTrack};
use std::path::Path;
use tracing::{debug, warn};

/// Column header line that precedes the data section
pub const HEADER_MARKER: &str = "%  GPST";
/// Prefix of comment lines inside the data section
pub const COMMENT_PREFIX: char = '%';

/// Parse position log text into a track, keeping source order.
///
/// A log without [`HEADER_MARKER`] yields an empty track. Any malformed data
/// line fails the whole parse.
pub fn parse_position_log(text: &str) -> Result<PositionTrack> {
    // Phase 1: everything up to and including the marker line is header
    let mut lines = text
        .lines()
        .enumerate()
        .skip_while(|(_, line)| !line.starts_with(HEADER_MARKER));
    if lines.next().is_none() {
        warn!("No '{HEADER_MARKER}' header marker found, position track is empty");
        return Ok(PositionTrack::default());
    }

    // Phase 2: remaining lines minus comments and blanks
    let samples = lines
        .filter(|(_, line)| !is_comment_or_blank(line))
        .map(|(number, line)| parse_position_line(line, number + 1))
        .collect::<Result<Vec<_>>>()?;

    let track = PositionTrack::new(samples);
    debug!("Parsed {} position samples", track.len());
    if !track.is_chronological() {
        warn!("Position track is not in chronological order");
    }
    Ok(track)
}

/// Read and parse a position log from disk
pub fn read_position_log(path: &Path) -> Result<PositionTrack> {
    let text = std::fs::read_to_string(path).map_err(|e| GeotagError::io(path, e))?;
    debug!("Read position log {} ({} bytes)", path.display(), text.len());
    parse_position_log(&text)
}

fn is_comment_or_blank(line: &str) -> bool {
    line.starts_with(COMMENT_PREFIX) || line.trim().is_empty()
}

/// Parse one `<date> <time> <lat> <lon> ...` data line
fn parse_position_line(line: &str, line_number: usize) -> Result<PositionSample> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(GeotagError::Parse(format!(
            "line {line_number}: expected at least 4 fields, found {}",
            fields.len()
        )));
    }

    let timestamp_ns = parse_timestamp(&format!("{} {}", fields[0], fields[1]))
        .map_err(|e| GeotagError::Parse(format!("line {line_number}: {e}")))?;
    let latitude = parse_coordinate(fields[2], "latitude", line_number)?;
    let longitude = parse_coordinate(fields[3], "longitude", line_number)?;

    Ok(PositionSample::new(timestamp_ns, latitude, longitude))
}

fn parse_coordinate(field: &str, name: &str, line_number: usize) -> Result<f64> {
    field.parse::<f64>().map_err(|e| {
        GeotagError::Parse(format!("line {line_number}: invalid {name} '{field}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_577_836_800_000_000_000;

    const SAMPLE_LOG: &str = "\
% program   : RTKPOST ver.2.4.3
% inp file  : rover.obs
% obs start : 2020/01/01 00:00:00.0 GPST
%
%  GPST                  latitude(deg) longitude(deg)  height(m)   Q  ns
2020/01/01 00:00:00.000000   40.712776000  -74.005974000    10.1234   1   8
% receiver reset
2020/01/01 00:01:00.000000   40.712800000  -74.006000000    10.2000   2   7

2020/01/01 00:01:00.217313   40.712900000  -74.006100000    10.3000   1   9
";

    #[test]
    fn test_parses_data_after_marker() {
        let track = parse_position_log(SAMPLE_LOG).unwrap();
        assert_eq!(track.len(), 3);

        let samples = track.samples();
        assert_eq!(samples[0], PositionSample::new(T0, 40.712776, -74.005974));
        assert_eq!(samples[1].timestamp_ns, T0 + 60_000_000_000);
        assert_eq!(samples[2].timestamp_ns, T0 + 60_217_313_000);
        assert_eq!(samples[2].latitude, 40.7129);
        assert_eq!(samples[2].longitude, -74.0061);
    }

    #[test]
    fn test_missing_marker_yields_empty_track() {
        let text = "% header only\n2020/01/01 00:00:00.000000 40.0 -74.0\n";
        let track = parse_position_log(text).unwrap();
        assert!(track.is_empty());
    }

    #[test]
    fn test_marker_must_start_the_line() {
        let text = " %  GPST latitude longitude\n2020/01/01 00:00:00.000000 40.0 -74.0\n";
        assert!(parse_position_log(text).unwrap().is_empty());
    }

    #[test]
    fn test_lines_before_marker_are_not_parsed() {
        let text = "garbage that is not a fix\n%  GPST lat lon\n2020/01/01 00:00:00.000000 1.5 2.5\n";
        let track = parse_position_log(text).unwrap();
        assert_eq!(track.samples(), &[PositionSample::new(T0, 1.5, 2.5)]);
    }

    #[test]
    fn test_keeps_source_order() {
        let text = "%  GPST lat lon\n\
                    2020/01/01 00:01:00.000000 2.0 2.0\n\
                    2020/01/01 00:00:00.000000 1.0 1.0\n";
        let track = parse_position_log(text).unwrap();
        assert_eq!(track.samples()[0].latitude, 2.0);
        assert_eq!(track.samples()[1].latitude, 1.0);
    }

    #[test]
    fn test_too_few_fields_is_an_error() {
        let text = "%  GPST lat lon\n2020/01/01 00:00:00.000000 40.0\n";
        match parse_position_log(text) {
            Err(GeotagError::Parse(msg)) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_coordinate_is_an_error() {
        let text = "%  GPST lat lon\n2020/01/01 00:00:00.000000 40.0 west\n";
        match parse_position_log(text) {
            Err(GeotagError::Parse(msg)) => assert!(msg.contains("longitude"), "{msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let text = "%  GPST lat lon\n2020-01-01 00:00:00.000000 40.0 -74.0\n";
        assert!(matches!(
            parse_position_log(text),
            Err(GeotagError::Parse(_))
        ));
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let path = Path::new("/nonexistent/dir/track.pos");
        match read_position_log(path) {
            Err(GeotagError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }
}
