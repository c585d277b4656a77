pub mod manifest;
pub mod position;
pub mod time;

pub use manifest::*;
pub use position::*;
pub use time::*;
