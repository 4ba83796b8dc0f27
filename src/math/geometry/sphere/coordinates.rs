// src/math/geometry/sphere/coordinates.rs

use crate::math::{
    error::{MathError, MathResult},
    types::Point3D,
    utils::{angles, constants},
};
use std::f32::consts::PI;

/// Sphärische Koordinaten mit Y als Hochachse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoordinates {
    /// Radius (Abstand vom Ursprung)
    pub radius: f32,
    /// Polar-Winkel (vom Nordpol auf der positiven Y-Achse, 0 bis π)
    pub polar: f32,
    /// Azimut-Winkel (in der XZ-Ebene, von +X Richtung +Z, 0 bis 2π)
    pub azimuth: f32,
}

impl SphericalCoordinates {
    /// Erstellt neue sphärische Koordinaten
    pub fn new(radius: f32, polar: f32, azimuth: f32) -> MathResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("Radius must be finite and non-negative, got {radius}"),
            });
        }

        Ok(Self {
            radius,
            polar: polar.clamp(0.0, PI),
            azimuth: angles::normalize_angle(azimuth),
        })
    }

    pub fn north_pole(radius: f32) -> Self {
        Self {
            radius,
            polar: 0.0,
            azimuth: 0.0,
        }
    }

    pub fn south_pole(radius: f32) -> Self {
        Self {
            radius,
            polar: PI,
            azimuth: 0.0,
        }
    }

    /// Konvertiert zu kartesischen Koordinaten.
    ///
    /// Die Pole werden exakt getroffen, ohne Rundungsreste in X und Z.
    pub fn to_cartesian(&self) -> Point3D {
        if self.polar == 0.0 {
            return Point3D::new(0.0, self.radius, 0.0);
        }
        if self.polar == PI {
            return Point3D::new(0.0, -self.radius, 0.0);
        }

        let sin_polar = self.polar.sin();
        Point3D::new(
            self.radius * sin_polar * self.azimuth.cos(),
            self.radius * self.polar.cos(),
            self.radius * sin_polar * self.azimuth.sin(),
        )
    }
}

/// Breitenkreis auf einer Kugel, beschrieben durch Höhe und Kreisradius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatitudeCircle {
    /// Y-Koordinate der Kreisebene
    pub height: f32,
    /// Radius des Kreises in der XZ-Ebene
    pub circle_radius: f32,
}

impl LatitudeCircle {
    /// Die drei festen Hilfskreise: y = r/2, Äquator, y = -r/2.
    pub fn guide_circles(sphere_radius: f32) -> [Self; 3] {
        let ring = sphere_radius * constants::SQRT_3 / 2.0;
        [
            Self {
                height: sphere_radius / 2.0,
                circle_radius: ring,
            },
            Self {
                height: 0.0,
                circle_radius: sphere_radius,
            },
            Self {
                height: -sphere_radius / 2.0,
                circle_radius: ring,
            },
        ]
    }
}
