// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

// Eigene Module deklarieren
pub mod debug;
pub mod math;
pub mod setup; // Kamera und Licht
pub mod view;

use debug::{
    ui::sphere_control_ui_system,
    visualization::{label_texture::face_camera_system, sphere_grid::draw_sphere_guides_system},
};
use setup::{setup_scene, sync_camera_distance_system};
use view::config::load_config_system;
use view::resources::{ActiveLayout, LabelTextures};
use view::systems::{recompute_layout_system, release_labels_on_exit_system};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin)
        .add_plugins(PanOrbitCameraPlugin)
        .init_resource::<ActiveLayout>()
        .init_resource::<LabelTextures>()
        .add_systems(PreStartup, load_config_system)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                // UI zuerst, damit Änderungen im selben Frame neu berechnet werden
                sphere_control_ui_system,
                recompute_layout_system,
                face_camera_system,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (draw_sphere_guides_system, sync_camera_distance_system),
        )
        .add_systems(Last, release_labels_on_exit_system)
        .run();
}
