//! Serializable GeoJSON output document.
//!
//! Field declaration order is the emitted key order.

use crate::types::SessionMarker;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoJsonDocument {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub filename: String,
    pub device_alias: String,
    pub total: u64,
    pub beginning: SessionMarker,
    pub end: SessionMarker,
    pub centroid: CentroidProperty,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CentroidProperty {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: PointGeometry,
    pub properties: FrameProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameProperties {
    pub index: u64,
    pub timestamp: i64,
}
