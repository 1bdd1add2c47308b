use async_trait::async_trait;
use image::RgbaImage;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::document::{PathShape, VectorDocument};
use super::surface::rgba_from_pixmap;
use crate::{MapError, Result};

/// Turns a vector document into a raster image of the document's size.
#[async_trait]
pub trait VectorRasterizer: Send + Sync {
    async fn rasterize(&self, document: &VectorDocument) -> Result<RgbaImage>;
}

/// Rasterizes documents on the CPU with tiny-skia
#[derive(Debug, Clone, Copy)]
pub struct SkiaRasterizer {
    anti_alias: bool,
}

impl SkiaRasterizer {
    pub fn new() -> Self {
        Self { anti_alias: true }
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    fn draw_shape(&self, pixmap: &mut Pixmap, shape: &PathShape) -> Result<()> {
        let Some(path) = parse_path_data(&shape.data)? else {
            return Ok(());
        };

        if let Some(fill) = parse_color(&shape.fill)? {
            let mut paint = Paint::default();
            paint.set_color(fill);
            paint.anti_alias = self.anti_alias;
            pixmap.fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
        }

        if shape.stroke_width > 0.0 {
            if let Some(stroke_color) = parse_color(&shape.stroke)? {
                let mut paint = Paint::default();
                paint.set_color(stroke_color);
                paint.anti_alias = self.anti_alias;
                let stroke = Stroke {
                    width: shape.stroke_width,
                    ..Default::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }

        Ok(())
    }
}

impl Default for SkiaRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorRasterizer for SkiaRasterizer {
    async fn rasterize(&self, document: &VectorDocument) -> Result<RgbaImage> {
        let mut pixmap = Pixmap::new(document.width, document.height).ok_or_else(|| {
            MapError::OverlayRasterize(format!(
                "cannot allocate a {}x{} overlay",
                document.width, document.height
            ))
        })?;

        for shape in &document.shapes {
            self.draw_shape(&mut pixmap, shape)?;
        }

        Ok(rgba_from_pixmap(&pixmap))
    }
}

/// Parse `M x y L x y ... Z` path data. Returns `None` for paths with no area
/// to draw (empty, or a single point).
pub(crate) fn parse_path_data(data: &str) -> Result<Option<tiny_skia::Path>> {
    let mut builder = PathBuilder::new();
    let mut tokens = data.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "M" | "L" => {
                let x = next_number(&mut tokens, data)?;
                let y = next_number(&mut tokens, data)?;
                if token == "M" {
                    builder.move_to(x, y);
                } else {
                    builder.line_to(x, y);
                }
            }
            "Z" | "z" => builder.close(),
            other => {
                return Err(MapError::OverlayRasterize(format!(
                    "unsupported path command '{}'",
                    other
                )))
            }
        }
    }

    Ok(builder.finish())
}

fn next_number<'a, I>(tokens: &mut I, data: &str) -> Result<f32>
where
    I: Iterator<Item = &'a str>,
{
    tokens
        .next()
        .and_then(|t| t.parse::<f32>().ok())
        .ok_or_else(|| MapError::OverlayRasterize(format!("malformed path data '{}'", data)))
}

/// Parse a CSS color. `none` and `transparent` yield `None`.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and a handful of named colors.
pub(crate) fn parse_color(value: &str) -> Result<Option<Color>> {
    let value = value.trim();
    let invalid = || MapError::OverlayRasterize(format!("unsupported color '{}'", value));

    if let Some(hex) = value.strip_prefix('#') {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;

        let [r, g, b, a] = match digits.as_slice() {
            [r, g, b] => [r * 17, g * 17, b * 17, 255],
            [r, g, b, a] => [r * 17, g * 17, b * 17, a * 17],
            [r1, r2, g1, g2, b1, b2] => [r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, 255],
            [r1, r2, g1, g2, b1, b2, a1, a2] => {
                [r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, a1 * 16 + a2]
            }
            _ => return Err(invalid()),
        };
        return Ok(Some(Color::from_rgba8(r, g, b, a)));
    }

    let rgb = match value.to_ascii_lowercase().as_str() {
        "none" | "transparent" => return Ok(None),
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "gray" | "grey" => (128, 128, 128),
        _ => return Err(invalid()),
    };
    Ok(Some(Color::from_rgba8(rgb.0, rgb.1, rgb.2, 255)))
}
