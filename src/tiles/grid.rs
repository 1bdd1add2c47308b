//! Tile grid planning.
//!
//! Tiles are first laid out on an integer grid anchored at the top-left cell of
//! the covering range, then the whole grid is shifted once so the fractional
//! center lands exactly on the middle of the output image. Neighbouring tiles
//! stay exactly one tile size apart, which keeps the composite seamless.

use crate::core::{
    geo::{Point, TileCoord},
    viewport::Viewport,
};

/// A tile to draw: its wrapped grid coordinate and its top-left pixel offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDescriptor {
    pub coord: TileCoord,
    pub offset: Point,
}

/// The planned set of tiles covering a viewport
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    /// Unwrapped top-left cell of the covering range
    pub origin: (i64, i64),
    /// Number of tile columns
    pub columns: usize,
    /// Number of tile rows
    pub rows: usize,
    /// Tiles in enumeration order (columns outer, rows inner)
    pub tiles: Vec<TileDescriptor>,
}

impl TileGrid {
    /// Plan the tiles covering `viewport`
    pub fn plan(viewport: &Viewport) -> Self {
        let half = viewport.half_extent();
        let min = viewport.center.subtract(&half).floor();
        let max = viewport.center.add(&half).ceil();

        let (x_min, y_min) = (min.x as i64, min.y as i64);
        let (x_max, y_max) = (max.x as i64, max.y as i64);
        let tile_size = viewport.tile_size;

        let columns = (x_max - x_min).max(0) as usize;
        let rows = (y_max - y_min).max(0) as usize;
        let mut tiles = Vec::with_capacity(columns * rows);

        for x in x_min..x_max {
            for y in y_min..y_max {
                tiles.push(TileDescriptor {
                    coord: TileCoord::wrapped(x, y, viewport.zoom),
                    offset: Point::new(
                        (x - x_min) as f64 * tile_size,
                        (y - y_min) as f64 * tile_size,
                    ),
                });
            }
        }

        let center_px = viewport.center.subtract(&min).multiply(tile_size);
        let correction = viewport.size.multiply(0.5).subtract(&center_px);
        for tile in &mut tiles {
            tile.offset = tile.offset.add(&correction);
        }

        log::debug!(
            "planned {}x{} tile grid at zoom {} from cell ({}, {}), shift ({:.2}, {:.2})",
            columns,
            rows,
            viewport.zoom,
            x_min,
            y_min,
            correction.x,
            correction.y
        );

        Self {
            origin: (x_min, y_min),
            columns,
            rows,
            tiles,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TileDescriptor> {
        self.tiles.iter()
    }
}

impl<'a> IntoIterator for &'a TileGrid {
    type Item = &'a TileDescriptor;
    type IntoIter = std::slice::Iter<'a, TileDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn viewport_at(center: Point, zoom: u8, width: f64, height: f64, tile_size: f64) -> Viewport {
        Viewport {
            center,
            zoom,
            size: Point::new(width, height),
            tile_size,
        }
    }

    /// Checks that the tiles form a gap-free lattice covering the whole image
    /// and that the tile under the image center holds the view center.
    fn assert_covers(viewport: &Viewport, grid: &TileGrid) {
        let ts = viewport.tile_size;
        assert_eq!(grid.len(), grid.columns * grid.rows);

        let first = grid.tiles[0].offset;
        for (i, tile) in grid.iter().enumerate() {
            let column = (i / grid.rows) as f64;
            let row = (i % grid.rows) as f64;
            assert!((tile.offset.x - (first.x + column * ts)).abs() < 1e-6);
            assert!((tile.offset.y - (first.y + row * ts)).abs() < 1e-6);
            assert!(tile.coord.is_valid());
        }

        assert!(first.x <= 1e-9 && first.y <= 1e-9);
        let last = grid.tiles[grid.len() - 1].offset;
        assert!(last.x + ts >= viewport.size.x - 1e-9);
        assert!(last.y + ts >= viewport.size.y - 1e-9);

        let mid = viewport.size.multiply(0.5);
        let center_tiles: Vec<_> = grid
            .iter()
            .filter(|t| {
                mid.x >= t.offset.x
                    && mid.x < t.offset.x + ts
                    && mid.y >= t.offset.y
                    && mid.y < t.offset.y + ts
            })
            .collect();
        assert_eq!(center_tiles.len(), 1);
        let expected = TileCoord::wrapped(
            viewport.center.x.floor() as i64,
            viewport.center.y.floor() as i64,
            viewport.zoom,
        );
        assert_eq!(center_tiles[0].coord, expected);
    }

    #[test]
    fn test_integer_center_512_view() {
        let vp = viewport_at(Point::new(2.0, 2.0), 2, 512.0, 512.0, 256.0);
        let grid = TileGrid::plan(&vp);

        assert_eq!((grid.columns, grid.rows), (2, 2));
        assert_eq!(grid.origin, (1, 1));
        let placed: Vec<_> = grid
            .iter()
            .map(|t| (t.coord.x, t.coord.y, t.offset.x, t.offset.y))
            .collect();
        assert_eq!(
            placed,
            vec![
                (1, 1, 0.0, 0.0),
                (1, 2, 0.0, 256.0),
                (2, 1, 256.0, 0.0),
                (2, 2, 256.0, 256.0),
            ]
        );
        assert_covers(&vp, &grid);
    }

    #[test]
    fn test_fractional_center_shifts_grid() {
        let vp = viewport_at(Point::new(10.25, 20.75), 6, 512.0, 512.0, 256.0);
        let grid = TileGrid::plan(&vp);

        assert_eq!((grid.columns, grid.rows), (3, 3));
        assert_eq!(grid.origin, (9, 19));
        // center sits 1.25 tiles right of x_min: 256 - 320 = -64
        assert!((grid.tiles[0].offset.x + 64.0).abs() < 1e-9);
        // and 1.75 tiles below y_min: 256 - 448 = -192
        assert!((grid.tiles[0].offset.y + 192.0).abs() < 1e-9);
        assert_covers(&vp, &grid);
    }

    #[test]
    fn test_antimeridian_wraps_to_last_column() {
        let vp = viewport_at(Point::new(-0.5, 0.5), 1, 256.0, 256.0, 256.0);
        let grid = TileGrid::plan(&vp);

        assert_eq!(grid.origin.0, -1);
        assert_eq!(grid.tiles[0].coord.x, 1);
        assert!(grid.iter().all(|t| t.coord.x < 2 && t.coord.y < 2));
    }

    #[test]
    fn test_zoom_zero_single_world_tile() {
        let vp = viewport_at(Point::new(0.5, 0.5), 0, 256.0, 256.0, 256.0);
        let grid = TileGrid::plan(&vp);

        assert_eq!(grid.len(), 1);
        assert_eq!(grid.tiles[0].coord, TileCoord::new(0, 0, 0));
        assert_eq!(grid.tiles[0].offset, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_coverage_across_views() {
        let cases = [
            (LatLng::new(52.52, 13.405), 11, 640.0, 480.0, 256),
            (LatLng::new(-33.87, 151.21), 7, 300.0, 900.0, 512),
            (LatLng::new(64.14, -21.94), 4, 1024.0, 256.0, 256),
            (LatLng::new(0.0, 179.9), 5, 777.0, 333.0, 256),
            (LatLng::new(37.77, -122.42), 15, 1.0, 1.0, 512),
        ];

        for (center, zoom, width, height, tile_size) in cases {
            let vp = Viewport::new(center, zoom, Point::new(width, height), tile_size).unwrap();
            let grid = TileGrid::plan(&vp);
            assert!(!grid.is_empty());
            assert_covers(&vp, &grid);
        }
    }
}
