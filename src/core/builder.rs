//! Map builder for fluent API configuration
//!
//! [`StaticMapBuilder`] assembles a [`StaticMap`] from options plus the
//! capabilities it renders with: the tile image loader, the overlay
//! rasterizer and the subdomain picker. Anything not set falls back to the
//! HTTP loader, the tiny-skia rasterizer and the thread RNG.

use crate::{
    core::{
        config::{StaticMapOptions, TileSize},
        map::StaticMap,
    },
    rendering::rasterizer::{SkiaRasterizer, VectorRasterizer},
    tiles::{
        loader::{HttpImageLoader, ImageLoader},
        source::{SubdomainPicker, ThreadRngPicker},
    },
    MapError, Result,
};

/// Builder for creating and configuring StaticMap instances
#[derive(Default)]
pub struct StaticMapBuilder {
    options: Option<StaticMapOptions>,
    tile_size: Option<TileSize>,
    loader: Option<Box<dyn ImageLoader>>,
    rasterizer: Option<Box<dyn VectorRasterizer>>,
    picker: Option<Box<dyn SubdomainPicker>>,
}

impl StaticMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output size and tile server
    pub fn with_options(mut self, options: StaticMapOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Shorthand for options with the default tile size
    pub fn with_size_and_url(self, width: u32, height: u32, tile_url: impl Into<String>) -> Self {
        self.with_options(StaticMapOptions::new(width, height, tile_url))
    }

    /// Override the tile size of the configured options
    pub fn with_tile_size(mut self, tile_size: TileSize) -> Self {
        self.tile_size = Some(tile_size);
        self
    }

    /// Load tiles through a custom loader (tests, caching proxies, local files)
    pub fn with_image_loader(mut self, loader: Box<dyn ImageLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_rasterizer(mut self, rasterizer: Box<dyn VectorRasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    pub fn with_subdomain_picker(mut self, picker: Box<dyn SubdomainPicker>) -> Self {
        self.picker = Some(picker);
        self
    }

    /// Build the map, validating the options
    pub fn build(self) -> Result<StaticMap> {
        let mut options = self
            .options
            .ok_or_else(|| MapError::InvalidConfig("no map options were provided".to_string()))?;
        if let Some(tile_size) = self.tile_size {
            options.tile_size = tile_size;
        }

        StaticMap::from_parts(
            options,
            self.loader
                .unwrap_or_else(|| Box::new(HttpImageLoader::new())),
            self.rasterizer
                .unwrap_or_else(|| Box::new(SkiaRasterizer::new())),
            self.picker.unwrap_or_else(|| Box::new(ThreadRngPicker)),
        )
    }
}

impl std::fmt::Debug for StaticMapBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticMapBuilder")
            .field("options", &self.options)
            .field("tile_size", &self.tile_size)
            .field("custom_loader", &self.loader.is_some())
            .field("custom_rasterizer", &self.rasterizer.is_some())
            .field("custom_picker", &self.picker.is_some())
            .finish()
    }
}
