pub mod vector;

pub use vector::{build_overlay, MultiPolygonFeature, PolygonStyle};
