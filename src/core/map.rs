use crate::{
    core::{
        config::StaticMapOptions,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    layers::vector::{build_overlay, MultiPolygonFeature},
    rendering::{
        rasterizer::{SkiaRasterizer, VectorRasterizer},
        surface::DrawingSurface,
    },
    tiles::{
        grid::TileGrid,
        loader::{load_all, HttpImageLoader, ImageLoader},
        source::{PlannedTile, SubdomainPicker, ThreadRngPicker, TileUrlTemplate},
    },
    MapError, Result,
};

/// Progress of the most recent render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStage {
    /// No render has started yet
    #[default]
    Idle,
    CenterAndGridComputed,
    TilesRequested,
    TilesDrawn,
    OverlayRequested,
    OverlayDrawn,
}

/// Renders static map images from a slippy-map tile server plus an optional
/// overlay of multi-polygon features.
///
/// The map keeps its features across renders. Each call to
/// [`StaticMap::render_map`] replaces the center and zoom of the previous one.
pub struct StaticMap {
    options: StaticMapOptions,
    template: TileUrlTemplate,
    loader: Box<dyn ImageLoader>,
    rasterizer: Box<dyn VectorRasterizer>,
    viewport: Option<Viewport>,
    features: Vec<MultiPolygonFeature>,
    stage: RenderStage,
}

impl StaticMap {
    /// Create a map that fetches tiles over HTTP and rasterizes with tiny-skia
    pub fn new(options: StaticMapOptions) -> Result<Self> {
        Self::from_parts(
            options,
            Box::new(HttpImageLoader::new()),
            Box::new(SkiaRasterizer::new()),
            Box::new(ThreadRngPicker),
        )
    }

    pub(crate) fn from_parts(
        options: StaticMapOptions,
        loader: Box<dyn ImageLoader>,
        rasterizer: Box<dyn VectorRasterizer>,
        picker: Box<dyn SubdomainPicker>,
    ) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            template: TileUrlTemplate::with_picker(options.tile_url.clone(), picker),
            options,
            loader,
            rasterizer,
            viewport: None,
            features: Vec::new(),
            stage: RenderStage::Idle,
        })
    }

    pub fn options(&self) -> &StaticMapOptions {
        &self.options
    }

    /// Append a feature to the overlay drawn by every later render
    pub fn add_multi_polygon(&mut self, feature: MultiPolygonFeature) {
        self.features.push(feature);
    }

    pub fn clear_features(&mut self) {
        self.features.clear();
    }

    pub fn features(&self) -> &[MultiPolygonFeature] {
        &self.features
    }

    /// The view used by the most recent render
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn last_stage(&self) -> RenderStage {
        self.stage
    }

    /// List every tile and URL a render at `center` and `zoom` would fetch,
    /// without fetching anything
    pub fn plan_tiles(&self, center: LatLng, zoom: u8) -> Result<Vec<PlannedTile>> {
        let viewport = self.snapshot(center, zoom)?;
        let grid = TileGrid::plan(&viewport);
        self.template.resolve_all(&grid)
    }

    /// Render the map centered on `center` at `zoom` into `surface`.
    ///
    /// The surface is resized to the configured output size. Every tile is
    /// fetched concurrently and the render fails on the first tile error. The
    /// overlay is drawn last, over all tiles; if it fails the tiles stay on the
    /// surface.
    pub async fn render_map(
        &mut self,
        center: LatLng,
        zoom: u8,
        surface: &mut dyn DrawingSurface,
    ) -> Result<()> {
        self.stage = RenderStage::Idle;

        let viewport = self.snapshot(center, zoom)?;
        self.viewport = Some(viewport.clone());
        let features = self.features.clone();

        surface.resize(self.options.width, self.options.height)?;

        let grid = TileGrid::plan(&viewport);
        self.advance(RenderStage::CenterAndGridComputed);

        let planned = self.template.resolve_all(&grid)?;
        self.advance(RenderStage::TilesRequested);

        let tiles = load_all(self.loader.as_ref(), &planned).await?;
        let tile_size = viewport.tile_size;
        for (descriptor, image) in &tiles {
            surface.draw_image(
                image,
                descriptor.offset.x,
                descriptor.offset.y,
                tile_size,
                tile_size,
            )?;
        }
        self.advance(RenderStage::TilesDrawn);

        let Some(document) = build_overlay(&features, &viewport) else {
            log::info!("rendered {} tiles at zoom {}", tiles.len(), zoom);
            return Ok(());
        };
        self.advance(RenderStage::OverlayRequested);

        let overlay = self
            .rasterizer
            .rasterize(&document)
            .await
            .map_err(|e| match e {
                MapError::OverlayRasterize(_) => e,
                other => MapError::OverlayRasterize(other.to_string()),
            })?;
        surface.draw_image(&overlay, 0.0, 0.0, viewport.size.x, viewport.size.y)?;
        self.advance(RenderStage::OverlayDrawn);

        log::info!(
            "rendered {} tiles and {} features at zoom {}",
            tiles.len(),
            features.len(),
            zoom
        );
        Ok(())
    }

    fn snapshot(&self, center: LatLng, zoom: u8) -> Result<Viewport> {
        Viewport::new(
            center,
            zoom,
            Point::new(self.options.width as f64, self.options.height as f64),
            self.options.tile_size.pixels(),
        )
    }

    fn advance(&mut self, stage: RenderStage) {
        log::debug!("render stage {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }
}

impl std::fmt::Debug for StaticMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticMap")
            .field("options", &self.options)
            .field("viewport", &self.viewport)
            .field("features", &self.features.len())
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}
