use serde::Serialize;

/// A frame paired with the position fix nearest to it in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Association {
    pub index: u64,
    pub timestamp_ns: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Flat arithmetic mean of a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub latitude: f64,
    pub longitude: f64,
}
