//! Web Mercator (EPSG:3857) conversions between geographic degrees and
//! continuous tile space.
//!
//! Tile space measures positions in tiles at a given zoom level: both axes run
//! over `[0, 2^zoom)`, with the origin at the north-west corner of the world.
//! None of these functions guard the poles; a latitude of ±90° yields an
//! infinite or NaN tile coordinate that propagates to the caller.

use std::f64::consts::PI;

/// Width of the world in tiles at `zoom`.
#[inline]
pub fn world_size(zoom: u8) -> f64 {
    2_f64.powi(zoom as i32)
}

/// Longitude in degrees to continuous tile-space x.
pub fn lon_to_tile_x(lon: f64, zoom: u8) -> f64 {
    (lon + 180.0) / 360.0 * world_size(zoom)
}

/// Latitude in degrees to continuous tile-space y.
pub fn lat_to_tile_y(lat: f64, zoom: u8) -> f64 {
    let lat_rad = lat.to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * world_size(zoom)
}

/// Tile-space x back to longitude in degrees.
pub fn tile_x_to_lon(x: f64, zoom: u8) -> f64 {
    x / world_size(zoom) * 360.0 - 180.0
}

/// Tile-space y back to latitude in degrees.
pub fn tile_y_to_lat(y: f64, zoom: u8) -> f64 {
    (PI * (1.0 - 2.0 * y / world_size(zoom))).sinh().atan().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_known_values() {
        assert!((lon_to_tile_x(0.0, 2) - 2.0).abs() < EPSILON);
        assert!((lon_to_tile_x(-180.0, 5) - 0.0).abs() < EPSILON);
        assert!((lat_to_tile_y(0.0, 2) - 2.0).abs() < EPSILON);
        assert!((lat_to_tile_y(crate::constants::MAX_LATITUDE, 0)).abs() < 1e-6);
        assert!((lat_to_tile_y(-crate::constants::MAX_LATITUDE, 0) - 1.0).abs() < 1e-6);
        // Berlin, zoom 10: tile 550/335
        assert_eq!(lon_to_tile_x(13.4050, 10).floor(), 550.0);
        assert_eq!(lat_to_tile_y(52.5200, 10).floor(), 335.0);
    }

    #[test]
    fn test_longitude_round_trip() {
        for zoom in [0_u8, 1, 5, 12, 20] {
            let mut lon = -180.0;
            while lon < 180.0 {
                let back = tile_x_to_lon(lon_to_tile_x(lon, zoom), zoom);
                assert!((back - lon).abs() < 1e-9, "lon {lon} zoom {zoom} -> {back}");
                lon += 7.3;
            }
        }
    }

    #[test]
    fn test_latitude_round_trip() {
        for zoom in [0_u8, 3, 9, 18] {
            let mut lat = -84.9;
            while lat < 85.0 {
                let back = tile_y_to_lat(lat_to_tile_y(lat, zoom), zoom);
                assert!((back - lat).abs() < 1e-9, "lat {lat} zoom {zoom} -> {back}");
                lat += 3.1;
            }
        }
    }

    #[test]
    fn test_poles_are_not_guarded() {
        assert!(!lat_to_tile_y(90.0, 3).is_finite());
    }
}
