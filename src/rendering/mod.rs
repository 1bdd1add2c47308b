pub mod document;
pub mod rasterizer;
pub mod surface;

// Re-export main types
pub use document::{PathShape, VectorDocument};
pub use rasterizer::{SkiaRasterizer, VectorRasterizer};
pub use surface::{DrawingSurface, PixmapSurface};
