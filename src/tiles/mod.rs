pub mod grid;
pub mod loader;
pub mod source;

// Re-exports for convenience
pub use grid::{TileDescriptor, TileGrid};
pub use loader::{HttpImageLoader, ImageLoader};
pub use source::{PlannedTile, SubdomainPicker, ThreadRngPicker, TileUrlTemplate};
