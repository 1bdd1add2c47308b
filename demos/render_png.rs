use maplet_static::prelude::*;

/// Renders an OpenStreetMap view of Paris with a highlighted area to a PNG file.
///
/// Usage: `cargo run --example render_png -- [output.png]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "static_map.png".to_string());

    let options = StaticMapOptions::from_json(
        r#"{
            "width": 800,
            "height": 600,
            "tileURL": "https://{a-c}.tile.openstreetmap.org/{z}/{x}/{y}.png"
        }"#,
    )?;
    let mut map = StaticMap::new(options)?;

    // Île de la Cité with a small hole around Notre-Dame
    map.add_multi_polygon(MultiPolygonFeature::new(
        vec![
            vec![
                LatLng::new(48.8573, 2.3409),
                LatLng::new(48.8566, 2.3475),
                LatLng::new(48.8531, 2.3529),
                LatLng::new(48.8522, 2.3500),
                LatLng::new(48.8548, 2.3420),
            ],
            vec![
                LatLng::new(48.8535, 2.3485),
                LatLng::new(48.8535, 2.3510),
                LatLng::new(48.8525, 2.3510),
                LatLng::new(48.8525, 2.3485),
            ],
        ],
        PolygonStyle::new("#ff000080", "#aa0000", 2.0),
    ));

    let center = LatLng::new(48.8550, 2.3470);
    let zoom = 15;
    for tile in map.plan_tiles(center, zoom)? {
        log::debug!("{} <- {}", tile.descriptor.coord, tile.url);
    }

    let mut surface = PixmapSurface::new(1, 1)?;
    map.render_map(center, zoom, &mut surface).await?;
    surface.save_png(&output)?;

    if let Some(viewport) = map.viewport() {
        let bounds = viewport.bounds();
        println!(
            "Wrote {} ({}x{}) covering {:.4},{:.4} to {:.4},{:.4}",
            output,
            map.options().width,
            map.options().height,
            bounds.south_west.lat,
            bounds.south_west.lng,
            bounds.north_east.lat,
            bounds.north_east.lng
        );
    }

    Ok(())
}
