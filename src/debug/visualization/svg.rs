// src/debug/visualization/svg.rs
use crate::math::geometry::sphere::{
    coordinates::LatitudeCircle, label::place_label, layout::PlacedPoint,
};
use bevy::log::info;
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Group, Line, Style, Text};

/// Frontalansicht (x nach rechts, y nach oben) des Layouts als SVG.
///
/// SVG-y zeigt nach unten, deshalb wird y gespiegelt.
pub fn build_layout_svg(points: &[PlacedPoint], radius: f32) -> Document {
    let extent = radius * 1.4;
    let point_radius = radius / 40.0;
    let font_size = radius / 12.0;

    let style = Style::new(format!(
        ".sphere {{ fill: #ffffff; fill-opacity: 0.2; stroke: #888888; stroke-width: {w}; }}
.guide {{ stroke: aqua; stroke-width: {w}; }}
.ray {{ stroke: tomato; stroke-width: {w}; }}
.point {{ fill: tomato; }}
.label {{ font-family: arial; font-size: {font_size}px; text-anchor: middle; dominant-baseline: middle; paint-order: stroke fill; stroke: white; stroke-width: {w}; }}",
        w = radius / 200.0,
    ));

    let mut guides = Group::new().set("class", "guides");
    for circle in LatitudeCircle::guide_circles(radius) {
        guides = guides.add(
            Line::new()
                .set("x1", -circle.circle_radius)
                .set("y1", -circle.height)
                .set("x2", circle.circle_radius)
                .set("y2", -circle.height)
                .set("class", "guide"),
        );
    }

    let mut markers = Group::new().set("class", "points");
    for point in points {
        let p = point.position;
        let anchor = place_label(p, radius);
        markers = markers
            .add(
                Line::new()
                    .set("x1", 0.0)
                    .set("y1", 0.0)
                    .set("x2", p.x)
                    .set("y2", -p.y)
                    .set("class", "ray"),
            )
            .add(
                Circle::new()
                    .set("cx", p.x)
                    .set("cy", -p.y)
                    .set("r", point_radius)
                    .set("class", "point"),
            )
            .add(
                Text::new(point.label.clone())
                    .set("x", anchor.position.x)
                    .set("y", -anchor.position.y)
                    .set("class", "label"),
            );
    }

    Document::new()
        .set(
            "viewBox",
            format!("{} {} {} {}", -extent, -extent, 2.0 * extent, 2.0 * extent),
        )
        .add(style)
        .add(
            Circle::new()
                .set("cx", 0.0)
                .set("cy", 0.0)
                .set("r", radius)
                .set("class", "sphere"),
        )
        .add(guides)
        .add(markers)
}

/// Schreibt das Layout als SVG-Datei.
pub fn export_layout_svg(
    points: &[PlacedPoint],
    radius: f32,
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    let document = build_layout_svg(points, radius);
    svg::save(path.as_ref(), &document)?;
    info!("Layout SVG '{}' written.", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{geometry::sphere::layout::layout, types::BitVector};

    #[test]
    fn test_svg_contains_every_point_and_label() {
        let vectors = vec![
            BitVector::from([0, 0, 0]),
            BitVector::from([1, 0, 0]),
            BitVector::from([1, 1, 1]),
        ];
        let points = layout(10.0, 3, &vectors).unwrap();
        let svg = build_layout_svg(&points, 10.0).to_string();

        assert_eq!(svg.matches("class=\"point\"").count(), 3);
        assert_eq!(svg.matches("class=\"guide\"").count(), 3);
        assert!(svg.contains("0,0,0"));
        assert!(svg.contains("1,1,1"));
        assert!(svg.contains("viewBox=\"-14 -14 28 28\""));
    }

    #[test]
    fn test_export_writes_file() {
        let points = layout(1.0, 1, &[BitVector::from([1])]).unwrap();
        let path = std::env::temp_dir().join("bit_sphere_export_test.svg");
        export_layout_svg(&points, 1.0, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
        std::fs::remove_file(&path).unwrap();
    }
}
