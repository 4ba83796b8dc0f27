// src/debug/visualization/sphere_grid.rs
use crate::math::geometry::sphere::coordinates::LatitudeCircle;
use crate::view::{config::SphereViewConfig, resources::ActiveLayout};
use bevy::prelude::*;

const GUIDE_SEGMENTS: usize = 32;

/// Zeichnet die drei Hilfskreise und die Strahlen vom Zentrum zu den Punkten.
pub fn draw_sphere_guides_system(
    mut gizmos: Gizmos,
    config: Res<SphereViewConfig>,
    active: Res<ActiveLayout>,
) {
    let Some(layout_config) = active.config else {
        return;
    };
    let radius = layout_config.radius;

    if config.show_guides {
        // Breitenkreise liegen parallel zur XZ-Ebene
        for circle in LatitudeCircle::guide_circles(radius) {
            gizmos
                .circle(
                    Vec3::new(0.0, circle.height, 0.0),
                    Direction3d::Y, // Normale zeigt entlang der Y-Achse
                    circle.circle_radius,
                    Color::CYAN,
                )
                .segments(GUIDE_SEGMENTS);
        }
    }

    for point in active.points.iter() {
        gizmos.line(Vec3::ZERO, point.position, Color::TOMATO);
    }
}
