// src/math/types/mod.rs
pub mod bit_vector;

pub use bit_vector::*;

// Einheitliche Typen für das gesamte Modul
pub type Point3D = bevy::math::Vec3;
