//! # maplet-static
//!
//! Static raster map rendering on top of slippy-map tile servers.
//!
//! A [`StaticMap`] plans the Web Mercator tile grid that covers an output
//! image, fetches every tile through an [`ImageLoader`], composites them onto a
//! [`DrawingSurface`] and finally draws a rasterized overlay of multi-polygon
//! features on top.

pub mod core;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::StaticMapBuilder,
    config::{StaticMapOptions, TileSize},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::{RenderStage, StaticMap},
    projection,
    viewport::Viewport,
};

pub use crate::layers::vector::{MultiPolygonFeature, PolygonStyle};

pub use crate::rendering::{
    document::{PathShape, VectorDocument},
    rasterizer::{SkiaRasterizer, VectorRasterizer},
    surface::{DrawingSurface, PixmapSurface},
};

pub use crate::tiles::{
    grid::{TileDescriptor, TileGrid},
    loader::{HttpImageLoader, ImageLoader},
    source::{PlannedTile, SubdomainPicker, ThreadRngPicker, TileUrlTemplate},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid tile URL template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to fetch tile {url}: {reason}")]
    TileFetch { url: String, reason: String },

    #[error("Failed to decode tile {url}: {source}")]
    TileDecode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Overlay rasterization failed: {0}")]
    OverlayRasterize(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),
}

/// Error type alias for convenience
pub type Error = MapError;
