pub mod association;
pub mod geojson;
pub mod manifest;
pub mod position;

pub use association::*;
pub use geojson::*;
pub use manifest::*;
pub use position::*;
