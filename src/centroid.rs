//! Centroid of associated points
//!
//! Plain arithmetic mean of latitudes and longitudes, no geodesic
//! correction. Suited to the short tracks of a single recording session.

use crate::error::{GeotagError, Result};
use crate::types::{Association, Centroid, PositionSample};

/// Anything that may carry a latitude/longitude pair
pub trait GeoPoint {
    fn latitude(&self) -> Option<f64>;
    fn longitude(&self) -> Option<f64>;
}

impl GeoPoint for Association {
    fn latitude(&self) -> Option<f64> {
        Some(self.latitude)
    }

    fn longitude(&self) -> Option<f64> {
        Some(self.longitude)
    }
}

impl GeoPoint for PositionSample {
    fn latitude(&self) -> Option<f64> {
        Some(self.latitude)
    }

    fn longitude(&self) -> Option<f64> {
        Some(self.longitude)
    }
}

/// Loosely typed records, e.g. `{"latitude": 1.0, "longitude": 2.0}`
impl GeoPoint for serde_json::Value {
    fn latitude(&self) -> Option<f64> {
        self.get("latitude").and_then(serde_json::Value::as_f64)
    }

    fn longitude(&self) -> Option<f64> {
        self.get("longitude").and_then(serde_json::Value::as_f64)
    }
}

/// Mean latitude and longitude of `points`.
///
/// Fails with [`GeotagError::EmptyInput`] for an empty slice and with
/// [`GeotagError::Schema`] when a record lacks a finite coordinate.
pub fn calculate_centroid<P: GeoPoint>(points: &[P]) -> Result<Centroid> {
    if points.is_empty() {
        return Err(GeotagError::EmptyInput);
    }

    let mut latitudes = Vec::with_capacity(points.len());
    let mut longitudes = Vec::with_capacity(points.len());
    for (position, point) in points.iter().enumerate() {
        match (point.latitude(), point.longitude()) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                latitudes.push(lat);
                longitudes.push(lon);
            }
            _ => {
                return Err(GeotagError::Schema(format!(
                    "location {position} must have finite 'latitude' and 'longitude'"
                )))
            }
        }
    }

    Ok(Centroid {
        latitude: calculate_mean(&mut latitudes).ok_or(GeotagError::EmptyInput)?,
        longitude: calculate_mean(&mut longitudes).ok_or(GeotagError::EmptyInput)?,
    })
}

/// Mean of a set of finite values, `None` when empty.
///
/// Values are sorted and summed as offsets from the minimum, so the result
/// does not depend on input order and a repeated value is its own mean.
pub fn calculate_mean(values: &mut [f64]) -> Option<f64> {
    values.sort_by(f64::total_cmp);
    let base = *values.first()?;
    let offset_sum: f64 = values.iter().map(|v| v - base).sum();
    Some(base + offset_sum / values.len() as f64)
}
