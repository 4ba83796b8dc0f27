// src/math/geometry/mod.rs

// Deklaration der Haupt-Geometriemodule
pub mod sphere;
