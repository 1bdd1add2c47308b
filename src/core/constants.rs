//! Core constants derived from common slippy-map conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Latitude limit of the square Web Mercator world (EPSG:3857).
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// User agent sent with every tile request. Public tile servers such as
/// OpenStreetMap reject anonymous clients.
pub const USER_AGENT: &str = concat!("maplet-static/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout for tile downloads, in seconds.
pub const TILE_REQUEST_TIMEOUT_SECS: u64 = 10;

/// XML namespace of the overlay document.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Deepest zoom level the tile math accepts. Grid indices are `u32` and the
/// world width `2^zoom` has to fit comfortably in them.
pub const MAX_ZOOM: u8 = 30;
