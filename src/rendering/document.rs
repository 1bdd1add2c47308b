//! Minimal SVG-like vector document handed to the overlay rasterizer.

use std::fmt::Write as _;

use crate::core::{constants::SVG_NAMESPACE, geo::Point};

/// One filled and stroked compound path
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    /// Path data using `M`, `L` and `Z` commands with absolute coordinates
    pub data: String,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f32,
}

impl PathShape {
    /// Build compound path data from closed rings. Rings with no points are skipped.
    pub fn ring_data<R>(rings: R) -> String
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = Point>,
    {
        let mut parts = Vec::new();
        for ring in rings {
            let mut points = ring.into_iter();
            let Some(start) = points.next() else {
                continue;
            };

            let mut part = format!("M {} {}", start.x, start.y);
            for p in points {
                let _ = write!(part, " L {} {}", p.x, p.y);
            }
            part.push_str(" Z");
            parts.push(part);
        }
        parts.join(" ")
    }
}

/// A vector document sized to the output image
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    pub width: u32,
    pub height: u32,
    pub shapes: Vec<PathShape>,
}

impl VectorDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: PathShape) {
        self.shapes.push(shape);
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Serialize to SVG markup
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            "<svg width=\"{}px\" height=\"{}px\" version=\"1.1\" xmlns=\"{}\">\n",
            self.width, self.height, SVG_NAMESPACE
        );

        for shape in &self.shapes {
            let _ = writeln!(
                svg,
                "  <path d=\"{}\" fill-rule=\"evenodd\" stroke=\"{}\" fill=\"{}\" stroke-width=\"{}\"/>",
                escape_attr(&shape.data),
                escape_attr(&shape.stroke),
                escape_attr(&shape.fill),
                shape.stroke_width
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_data_closes_each_ring() {
        let data = PathShape::ring_data(vec![
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            vec![],
            vec![Point::new(2.5, 2.5), Point::new(5.0, 2.5), Point::new(5.0, 5.0)],
        ]);
        assert_eq!(data, "M 0 0 L 10 0 L 10 10 Z M 2.5 2.5 L 5 2.5 L 5 5 Z");
    }

    #[test]
    fn test_svg_serialization() {
        let mut doc = VectorDocument::new(512, 256);
        doc.push(PathShape {
            data: "M 0 0 L 1 0 L 1 1 Z".to_string(),
            fill: "#ff0000".to_string(),
            stroke: "#000".to_string(),
            stroke_width: 1.5,
        });

        let svg = doc.to_svg();
        assert!(svg.starts_with("<svg width=\"512px\" height=\"256px\""));
        assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("d=\"M 0 0 L 1 0 L 1 1 Z\""));
        assert!(svg.contains("fill=\"#ff0000\""));
        assert!(svg.contains("stroke=\"#000\""));
        assert!(svg.contains("stroke-width=\"1.5\""));
        assert_eq!(svg.matches("<path").count(), 1);
    }

    #[test]
    fn test_attribute_escaping() {
        let mut doc = VectorDocument::new(1, 1);
        doc.push(PathShape {
            data: String::new(),
            fill: "\"><script>".to_string(),
            stroke: "none".to_string(),
            stroke_width: 0.0,
        });
        assert!(doc.to_svg().contains("fill=\"&quot;&gt;&lt;script&gt;\""));
    }
}
