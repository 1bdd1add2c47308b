//! Construction-time configuration for static map rendering.
//!
//! Options can be built in code or deserialized from JSON using the keys
//! `width`, `height`, `tilesize` and `tileURL`. A missing `tilesize` falls back
//! to 256 pixels.

use crate::core::constants::TILE_SIZE;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Edge length of the square tiles served by the tile provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TileSize {
    #[default]
    S256,
    S512,
}

impl TileSize {
    pub fn pixels(self) -> u32 {
        match self {
            Self::S256 => TILE_SIZE,
            Self::S512 => 512,
        }
    }
}

impl TryFrom<u32> for TileSize {
    type Error = String;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        match value {
            256 => Ok(Self::S256),
            512 => Ok(Self::S512),
            other => Err(format!("unsupported tile size {}, expected 256 or 512", other)),
        }
    }
}

impl From<TileSize> for u32 {
    fn from(size: TileSize) -> Self {
        size.pixels()
    }
}

/// Output size, tile size and tile server of a static map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticMapOptions {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Tile edge length served by the provider
    #[serde(rename = "tilesize", default)]
    pub tile_size: TileSize,
    /// Tile URL template with `{z}`, `{x}`, `{y}` and an optional `{a-c}` subdomain marker
    #[serde(rename = "tileURL")]
    pub tile_url: String,
}

impl StaticMapOptions {
    pub fn new(width: u32, height: u32, tile_url: impl Into<String>) -> Self {
        Self {
            width,
            height,
            tile_size: TileSize::default(),
            tile_url: tile_url.into(),
        }
    }

    pub fn with_tile_size(mut self, tile_size: TileSize) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Parse options from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidConfig(format!(
                "output size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.tile_url.contains(placeholder) {
                return Err(MapError::InvalidConfig(format!(
                    "tile URL '{}' is missing the {} placeholder",
                    self.tile_url, placeholder
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults_tile_size() {
        let options = StaticMapOptions::from_json(
            r#"{"width": 640, "height": 480, "tileURL": "https://{a-c}.tile.test/{z}/{x}/{y}.png"}"#,
        )
        .unwrap();

        assert_eq!(options.width, 640);
        assert_eq!(options.height, 480);
        assert_eq!(options.tile_size, TileSize::S256);
        assert_eq!(options.tile_size.pixels(), 256);
    }

    #[test]
    fn test_json_tile_size_512() {
        let options = StaticMapOptions::from_json(
            r#"{"width": 1, "height": 1, "tilesize": 512, "tileURL": "/{z}/{x}/{y}"}"#,
        )
        .unwrap();
        assert_eq!(options.tile_size, TileSize::S512);
    }

    #[test]
    fn test_json_rejects_unsupported_tile_size() {
        let result = StaticMapOptions::from_json(
            r#"{"width": 1, "height": 1, "tilesize": 300, "tileURL": "/{z}/{x}/{y}"}"#,
        );
        assert!(matches!(result, Err(MapError::Serialization(_))));
    }

    #[test]
    fn test_validate_size_and_placeholders() {
        assert!(StaticMapOptions::new(0, 10, "/{z}/{x}/{y}").validate().is_err());
        assert!(StaticMapOptions::new(10, 10, "/{z}/{x}.png").validate().is_err());
        assert!(StaticMapOptions::new(10, 10, "/{z}/{x}/{y}.png").validate().is_ok());
    }
}
