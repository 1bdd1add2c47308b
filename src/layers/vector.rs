use crate::{
    core::{geo::LatLng, viewport::Viewport},
    rendering::document::{PathShape, VectorDocument},
};
use serde::{Deserialize, Serialize};

/// Style for polygon features. Colors are CSS color strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    /// Fill color
    #[serde(rename = "fillColor")]
    pub fill_color: String,
    /// Border color
    #[serde(rename = "strokeColor")]
    pub stroke_color: String,
    /// Border width
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f32,
}

impl PolygonStyle {
    pub fn new(fill_color: impl Into<String>, stroke_color: impl Into<String>, stroke_width: f32) -> Self {
        Self {
            fill_color: fill_color.into(),
            stroke_color: stroke_color.into(),
            stroke_width,
        }
    }
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self::new("#3388ff", "#ffffff", 2.0)
    }
}

/// A styled set of rings drawn as a single even-odd filled path.
///
/// Rings do not need to repeat their first point; every ring is closed when
/// the path is built. Rings nested inside another ring cut holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygonFeature {
    pub rings: Vec<Vec<LatLng>>,
    #[serde(flatten)]
    pub style: PolygonStyle,
}

impl MultiPolygonFeature {
    pub fn new(rings: Vec<Vec<LatLng>>, style: PolygonStyle) -> Self {
        Self { rings, style }
    }

    /// Build a feature from a `geo-types` multi-polygon. Exterior and interior
    /// rings all become rings of the feature.
    pub fn from_geo(multi_polygon: &geo_types::MultiPolygon<f64>, style: PolygonStyle) -> Self {
        let rings = multi_polygon
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
            .map(ring_from_line_string)
            .filter(|ring| !ring.is_empty())
            .collect();

        Self { rings, style }
    }

    /// Number of vertices across all rings
    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    /// Project every ring into output pixels and build the path shape
    pub fn to_shape(&self, viewport: &Viewport) -> PathShape {
        let rings = self
            .rings
            .iter()
            .map(|ring| ring.iter().map(|vertex| viewport.project(vertex)));

        PathShape {
            data: PathShape::ring_data(rings),
            fill: self.style.fill_color.clone(),
            stroke: self.style.stroke_color.clone(),
            stroke_width: self.style.stroke_width,
        }
    }
}

// geo-types closes rings by repeating the first coordinate
fn ring_from_line_string(line: &geo_types::LineString<f64>) -> Vec<LatLng> {
    let mut ring: Vec<LatLng> = line.coords().map(|c| LatLng::from(*c)).collect();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Build the overlay document for `features` as seen through `viewport`.
///
/// Returns `None` when there is nothing to draw, so callers can skip
/// rasterization entirely.
pub fn build_overlay(features: &[MultiPolygonFeature], viewport: &Viewport) -> Option<VectorDocument> {
    if features.is_empty() {
        return None;
    }

    let mut document = VectorDocument::new(viewport.size.x as u32, viewport.size.y as u32);
    for feature in features {
        document.push(feature.to_shape(viewport));
    }

    log::debug!(
        "built overlay with {} shapes ({} vertices)",
        document.shapes.len(),
        features.iter().map(MultiPolygonFeature::vertex_count).sum::<usize>()
    );
    Some(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;
    use geo_types::{polygon, MultiPolygon};

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(0.0, 0.0), 2, Point::new(512.0, 512.0), 256).unwrap()
    }

    #[test]
    fn test_empty_features_build_nothing() {
        assert!(build_overlay(&[], &viewport()).is_none());
    }

    #[test]
    fn test_center_vertex_lands_on_image_center() {
        let feature = MultiPolygonFeature::new(
            vec![vec![
                LatLng::new(0.0, 0.0),
                LatLng::new(0.0, 45.0),
                LatLng::new(-45.0, 45.0),
            ]],
            PolygonStyle::new("#ff0000", "none", 0.0),
        );

        let document = build_overlay(&[feature], &viewport()).unwrap();
        assert_eq!((document.width, document.height), (512, 512));
        assert_eq!(document.shapes.len(), 1);

        let shape = &document.shapes[0];
        assert!(shape.data.starts_with("M 256 256 L 384 256 L 384 "));
        assert!(shape.data.ends_with(" Z"));
        assert_eq!(shape.fill, "#ff0000");
        assert_eq!(shape.stroke, "none");
    }

    #[test]
    fn test_rings_join_into_one_compound_path() {
        let outer = vec![
            LatLng::new(10.0, -10.0),
            LatLng::new(10.0, 10.0),
            LatLng::new(-10.0, 10.0),
            LatLng::new(-10.0, -10.0),
        ];
        let inner = vec![
            LatLng::new(5.0, -5.0),
            LatLng::new(5.0, 5.0),
            LatLng::new(-5.0, 5.0),
        ];
        let feature = MultiPolygonFeature::new(vec![outer, inner], PolygonStyle::default());

        let shape = feature.to_shape(&viewport());
        assert_eq!(shape.data.matches('M').count(), 2);
        assert_eq!(shape.data.matches('Z').count(), 2);
        assert_eq!(shape.data.matches('L').count(), 5);
    }

    #[test]
    fn test_from_geo_keeps_holes_and_drops_closing_point() {
        let poly = polygon!(
            exterior: [
                (x: -10.0, y: -10.0),
                (x: 10.0, y: -10.0),
                (x: 10.0, y: 10.0),
                (x: -10.0, y: 10.0)
            ],
            interiors: [[
                (x: -2.0, y: -2.0),
                (x: 2.0, y: -2.0),
                (x: 2.0, y: 2.0)
            ]]
        );
        let feature = MultiPolygonFeature::from_geo(&MultiPolygon(vec![poly]), PolygonStyle::default());

        assert_eq!(feature.rings.len(), 2);
        assert_eq!(feature.rings[0].len(), 4);
        assert_eq!(feature.rings[1].len(), 3);
        assert_eq!(feature.rings[0][0], LatLng::new(-10.0, -10.0));
        assert_eq!(feature.vertex_count(), 7);
    }

    #[test]
    fn test_style_uses_camel_case_json_keys() {
        let feature: MultiPolygonFeature = serde_json::from_str(
            r##"{"rings": [[{"lat": 1.0, "lng": 2.0}]], "fillColor": "#00ff00", "strokeColor": "#000", "strokeWidth": 3}"##,
        )
        .unwrap();
        assert_eq!(feature.style, PolygonStyle::new("#00ff00", "#000", 3.0));
        assert_eq!(feature.rings[0][0], LatLng::new(1.0, 2.0));
    }
}
