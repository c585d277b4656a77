//! Integration tests for export functionality
//!
//! Tests the export layer across different scenarios:
//! - GeoJSON export with directory creation
//! - 4-space pretty printing and key order
//! - CSV export of frame positions
//! - Error reporting for unwritable destinations

use frame_geotag::export::*;
use frame_geotag::{
    build_feature_collection, Association, Centroid, GeotagError, SessionMarker, SessionMetadata,
};
use std::fs;
use tempfile::TempDir;

fn sample_associations() -> Vec<Association> {
    vec![
        Association {
            index: 0,
            timestamp_ns: 1577836800000000000,
            latitude: 40.712776,
            longitude: -74.005974,
        },
        Association {
            index: 1,
            timestamp_ns: 1577836860217313000,
            latitude: 40.7129,
            longitude: -74.0061,
        },
    ]
}

fn sample_document() -> frame_geotag::GeoJsonDocument {
    let metadata = SessionMetadata {
        filename: "cam0.json".to_string(),
        device_alias: "front-camera".to_string(),
        total: 2,
        beginning: SessionMarker::Text("2020-01-01T00:00:00Z".to_string()),
        end: SessionMarker::Number(1577836861u64.into()),
    };
    let centroid = Centroid {
        latitude: 40.712838,
        longitude: -74.0060370,
    };
    build_feature_collection(&metadata, &sample_associations(), &centroid)
}

#[test]
fn test_write_geojson_creates_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nonexistent_dir = temp_dir.path().join("nonexistent").join("output");
    let options = ExportOptions {
        output_dir: Some(nonexistent_dir.clone()),
        ..ExportOptions::default()
    };

    let path = compute_output_path(&options, temp_dir.path(), 0, "json");
    let result = write_geojson(&path, &sample_document());
    assert!(result.is_ok(), "GeoJSON export should create directories");

    assert!(nonexistent_dir.exists(), "Output directory should be created");
    assert!(
        nonexistent_dir.join("geojson_0.json").exists(),
        "GeoJSON file should be created in new directory"
    );
}

#[test]
fn test_write_geojson_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("geojson_0.json");
    write_geojson(&path, &sample_document()).expect("export should succeed");

    let content = fs::read_to_string(&path).expect("Failed to read GeoJSON file");
    assert!(
        content.starts_with("{\n    \"type\": \"FeatureCollection\",\n    \"filename\": \"cam0.json\""),
        "Unexpected layout:\n{content}"
    );
    assert!(content.contains("\"timestamp\": 1577836860217313000"));

    let value: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");
    assert_eq!(value["end"], 1577836861u64);
    assert_eq!(value["features"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        value["features"][1]["geometry"]["coordinates"],
        serde_json::json!([-74.0061, 40.7129])
    );
    assert_eq!(value["features"][1]["properties"]["index"], 1);
}

#[test]
fn test_write_geojson_reports_path_on_failure() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    // A regular file where a directory is expected
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let path = blocker.join("geojson_0.json");

    match write_geojson(&path, &sample_document()) {
        Err(GeotagError::Io { path: failed, .. }) => assert!(failed.starts_with(&blocker)),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[cfg(feature = "csv")]
#[test]
fn test_write_associations_csv() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("geojson_0.csv");
    write_associations_csv(&path, &sample_associations()).expect("CSV export should succeed");

    let content = fs::read_to_string(&path).expect("Failed to read CSV file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "index,timestamp,latitude,longitude");
    assert_eq!(lines[1], "0,1577836800000000000,40.712776,-74.005974");
    assert_eq!(lines[2], "1,1577836860217313000,40.7129,-74.0061");
    assert_eq!(lines.len(), 3);
}
