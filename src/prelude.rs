//! Prelude module for common maplet-static types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use maplet_static::prelude::*;`

pub use crate::core::{
    builder::StaticMapBuilder,
    config::{StaticMapOptions, TileSize},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::{RenderStage, StaticMap},
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

pub use crate::{MapError, Result};

pub use async_trait::async_trait;
pub use image::RgbaImage;
