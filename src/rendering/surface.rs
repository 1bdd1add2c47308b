use std::path::Path;

use image::RgbaImage;
use tiny_skia::{ColorU8, FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};

use crate::{MapError, Result};

/// A fixed-size pixel buffer the compositor draws into.
pub trait DrawingSurface {
    /// Current size in pixels
    fn size(&self) -> (u32, u32);

    /// Reallocate the surface at `width` x `height`, discarding its contents
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Draw `image` scaled into the destination rectangle
    fn draw_image(
        &mut self,
        image: &RgbaImage,
        dest_x: f64,
        dest_y: f64,
        dest_width: f64,
        dest_height: f64,
    ) -> Result<()>;
}

/// In-memory surface backed by a tiny-skia pixmap
#[derive(Debug, Clone, PartialEq)]
pub struct PixmapSurface {
    pixmap: Pixmap,
    quality: FilterQuality,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            quality: FilterQuality::Bilinear,
        })
    }

    /// Sampling used when an image is drawn at a fractional offset or scaled
    pub fn with_filter_quality(mut self, quality: FilterQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Copy the composited pixels out as straight-alpha RGBA
    pub fn to_rgba_image(&self) -> RgbaImage {
        rgba_from_pixmap(&self.pixmap)
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| MapError::Render(format!("PNG encoding failed: {}", e)))
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.pixmap.save_png(path.as_ref()).map_err(|e| {
            MapError::Render(format!(
                "failed to write {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }
}

impl DrawingSurface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.pixmap = allocate(width, height)?;
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &RgbaImage,
        dest_x: f64,
        dest_y: f64,
        dest_width: f64,
        dest_height: f64,
    ) -> Result<()> {
        let source = pixmap_from_rgba(image)?;
        let scale_x = dest_width / source.width() as f64;
        let scale_y = dest_height / source.height() as f64;

        // integer-aligned, unscaled draws copy pixels exactly
        let exact = scale_x == 1.0
            && scale_y == 1.0
            && dest_x.fract() == 0.0
            && dest_y.fract() == 0.0;

        let paint = PixmapPaint {
            quality: if exact {
                FilterQuality::Nearest
            } else {
                self.quality
            },
            ..PixmapPaint::default()
        };

        let transform = Transform::from_row(
            scale_x as f32,
            0.0,
            0.0,
            scale_y as f32,
            dest_x as f32,
            dest_y as f32,
        );
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
        Ok(())
    }
}

fn allocate(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height)
        .ok_or_else(|| MapError::Render(format!("cannot allocate a {}x{} surface", width, height)))
}

/// Convert straight-alpha RGBA into a premultiplied pixmap
pub(crate) fn pixmap_from_rgba(image: &RgbaImage) -> Result<Pixmap> {
    let (width, height) = image.dimensions();
    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| MapError::Render(format!("cannot draw a {}x{} image", width, height)))?;

    let data = image
        .pixels()
        .flat_map(|p| {
            let c = ColorU8::from_rgba(p[0], p[1], p[2], p[3]).premultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    Pixmap::from_vec(data, size)
        .ok_or_else(|| MapError::Render("pixel buffer does not match image size".to_string()))
}

/// Convert a premultiplied pixmap back to straight-alpha RGBA
pub(crate) fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    // the buffer always holds exactly width * height * 4 bytes
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .unwrap_or_else(|| RgbaImage::new(pixmap.width(), pixmap.height()))
}
