//! GeoJSON FeatureCollection assembly

use crate::types::{
    Association, Centroid, CentroidProperty, Feature, FrameProperties, GeoJsonDocument,
    PointGeometry, SessionMetadata,
};

/// Build the per-session document: metadata, centroid and one Point feature
/// per association, in association order.
pub fn build_feature_collection(
    metadata: &SessionMetadata,
    associations: &[Association],
    centroid: &Centroid,
) -> GeoJsonDocument {
    GeoJsonDocument {
        kind: "FeatureCollection",
        filename: metadata.filename.clone(),
        device_alias: metadata.device_alias.clone(),
        total: metadata.total,
        beginning: metadata.beginning.clone(),
        end: metadata.end.clone(),
        centroid: CentroidProperty {
            lat: centroid.latitude,
            lon: centroid.longitude,
        },
        features: associations.iter().map(build_feature).collect(),
    }
}

fn build_feature(association: &Association) -> Feature {
    Feature {
        kind: "Feature",
        geometry: PointGeometry {
            kind: "Point",
            // GeoJSON axis order
            coordinates: [association.longitude, association.latitude],
        },
        properties: FrameProperties {
            index: association.index,
            timestamp: association.timestamp_ns,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionMarker;
    use serde_json::json;

    fn associations() -> Vec<Association> {
        vec![
            Association {
                index: 0,
                timestamp_ns: 1577836800000000000,
                latitude: 40.712776,
                longitude: -74.005974,
            },
            Association {
                index: 1,
                timestamp_ns: 1577836860000000000,
                latitude: 40.712776,
                longitude: -74.005974,
            },
        ]
    }

    fn centroid() -> Centroid {
        Centroid {
            latitude: 40.712776,
            longitude: -74.005974,
        }
    }

    #[test]
    fn test_document_shape() {
        let metadata = SessionMetadata {
            filename: "test.json".to_string(),
            device_alias: "device1".to_string(),
            total: 100,
            beginning: SessionMarker::Text("2024-01-01T00:00:00Z".to_string()),
            end: SessionMarker::Text("2024-01-01T01:00:00Z".to_string()),
        };
        let document = build_feature_collection(&metadata, &associations(), &centroid());

        let expected = json!({
            "type": "FeatureCollection",
            "filename": "test.json",
            "device_alias": "device1",
            "total": 100,
            "beginning": "2024-01-01T00:00:00Z",
            "end": "2024-01-01T01:00:00Z",
            "centroid": {"lat": 40.712776, "lon": -74.005974},
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-74.005974, 40.712776]},
                    "properties": {"index": 0, "timestamp": 1577836800000000000i64}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-74.005974, 40.712776]},
                    "properties": {"index": 1, "timestamp": 1577836860000000000i64}
                }
            ]
        });
        assert_eq!(serde_json::to_value(&document).unwrap(), expected);
    }

    #[test]
    fn test_key_order() {
        let document =
            build_feature_collection(&SessionMetadata::default(), &associations(), &centroid());
        let text = serde_json::to_string(&document).unwrap();
        let positions: Vec<usize> = [
            "\"type\"",
            "\"filename\"",
            "\"device_alias\"",
            "\"total\"",
            "\"beginning\"",
            "\"end\"",
            "\"centroid\"",
            "\"features\"",
        ]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    }

    #[test]
    fn test_default_metadata_and_numeric_markers() {
        let metadata = SessionMetadata {
            beginning: SessionMarker::Number(1704067200u64.into()),
            ..SessionMetadata::default()
        };
        let document = build_feature_collection(&metadata, &[], &centroid());
        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["filename"], "");
        assert_eq!(value["device_alias"], "");
        assert_eq!(value["total"], 0);
        assert_eq!(value["beginning"], 1704067200u64);
        assert_eq!(value["end"], "");
        assert_eq!(value["features"], json!([]));
    }

    #[test]
    fn test_nanosecond_timestamps_survive_serialization() {
        let association = Association {
            index: 7,
            timestamp_ns: 1577836800217313001,
            latitude: 1.0,
            longitude: 2.0,
        };
        let document = build_feature_collection(
            &SessionMetadata::default(),
            &[association],
            &centroid(),
        );
        let text = serde_json::to_string(&document).unwrap();
        assert!(text.contains("\"timestamp\":1577836800217313001"), "{text}");
    }
}
