pub mod label_texture;
pub mod sphere_grid;
pub mod svg;
