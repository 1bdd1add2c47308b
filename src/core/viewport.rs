use crate::core::{
    constants::MAX_ZOOM,
    geo::{LatLng, LatLngBounds, Point},
    projection,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Immutable view snapshot of a single render: tile-space center, zoom,
/// output size and tile size.
///
/// Every conversion between tile space and output pixels during a render goes
/// through the same snapshot, so the tile grid and the vector overlay always
/// agree on where the center of the image is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the view in continuous tile space at `zoom`
    pub center: Point,
    /// The integer zoom level
    pub zoom: u8,
    /// The size of the output image in pixels
    pub size: Point,
    /// Edge length of one tile in pixels
    pub tile_size: f64,
}

impl Viewport {
    /// Creates a viewport from a geographic center
    pub fn new(center: LatLng, zoom: u8, size: Point, tile_size: u32) -> Result<Self> {
        if zoom > MAX_ZOOM {
            return Err(MapError::InvalidConfig(format!(
                "zoom {} exceeds the maximum of {}",
                zoom, MAX_ZOOM
            )));
        }

        Ok(Self {
            center: Point::new(
                projection::lon_to_tile_x(center.lng, zoom),
                projection::lat_to_tile_y(center.lat, zoom),
            ),
            zoom,
            size,
            tile_size: tile_size as f64,
        })
    }

    /// Geographic center of the view
    pub fn center_lat_lng(&self) -> LatLng {
        self.tile_to_lat_lng(&self.center)
    }

    /// Half the output size, expressed in tiles
    pub fn half_extent(&self) -> Point {
        self.size.multiply(0.5 / self.tile_size)
    }

    /// Converts a tile-space position to output pixel coordinates
    pub fn tile_to_pixel(&self, tile: &Point) -> Point {
        tile.subtract(&self.center)
            .multiply(self.tile_size)
            .add(&self.size.multiply(0.5))
    }

    /// Converts output pixel coordinates back to tile space
    pub fn pixel_to_tile(&self, pixel: &Point) -> Point {
        pixel
            .subtract(&self.size.multiply(0.5))
            .multiply(1.0 / self.tile_size)
            .add(&self.center)
    }

    /// Projects a geographic coordinate to output pixel coordinates
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        let tile = Point::new(
            projection::lon_to_tile_x(lat_lng.lng, self.zoom),
            projection::lat_to_tile_y(lat_lng.lat, self.zoom),
        );
        self.tile_to_pixel(&tile)
    }

    /// Unprojects output pixel coordinates back to a geographic coordinate
    pub fn unproject(&self, pixel: &Point) -> LatLng {
        self.tile_to_lat_lng(&self.pixel_to_tile(pixel))
    }

    /// Geographic extent covered by the output image
    pub fn bounds(&self) -> LatLngBounds {
        let north_west = self.unproject(&Point::new(0.0, 0.0));
        let south_east = self.unproject(&self.size);

        LatLngBounds::from_coords(south_east.lat, north_west.lng, north_west.lat, south_east.lng)
    }

    fn tile_to_lat_lng(&self, tile: &Point) -> LatLng {
        LatLng::new(
            projection::tile_y_to_lat(tile.y, self.zoom),
            projection::tile_x_to_lon(tile.x, self.zoom),
        )
    }
}
