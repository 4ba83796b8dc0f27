// ./src/setup.rs
use crate::view::config::SphereViewConfig;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use std::f32::consts::PI;

/// Kamera-Abstand relativ zum Kugelradius
const CAMERA_DISTANCE_FACTOR: f32 = 1.9;

pub fn setup_scene(mut commands: Commands, config: Res<SphereViewConfig>) {
    let distance = config.radius * CAMERA_DISTANCE_FACTOR;

    // Kamera: nur Orbit, kein Zoom und kein Pan
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 0.0, distance).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        PanOrbitCamera {
            radius: Some(distance),
            zoom_sensitivity: 0.0,
            pan_sensitivity: 0.0,
            yaw_lower_limit: Some(-PI),
            yaw_upper_limit: Some(PI),
            ..default()
        },
    ));

    // Licht
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 10_000_000.,
            range: 100.0,
            ..default()
        },
        transform: Transform::from_xyz(4.0, 8.0, 4.0),
        ..default()
    });
}

/// Zieht den Orbit-Abstand nach, wenn sich der Kugelradius ändert.
pub fn sync_camera_distance_system(
    config: Res<SphereViewConfig>,
    mut cameras: Query<&mut PanOrbitCamera>,
) {
    if !config.is_changed() {
        return;
    }
    let distance = config.radius * CAMERA_DISTANCE_FACTOR;
    for mut camera in cameras.iter_mut() {
        if camera.target_radius != distance {
            camera.target_radius = distance;
            camera.force_update = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_camera_follows_radius() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SphereViewConfig::default())
            .add_systems(Update, sync_camera_distance_system);
        let camera = app.world.spawn(PanOrbitCamera::default()).id();

        app.update();
        let target = app.world.get::<PanOrbitCamera>(camera).unwrap().target_radius;
        assert_abs_diff_eq!(target, 19.0, epsilon = 1e-5);

        app.world.resource_mut::<SphereViewConfig>().radius = 2.0;
        app.update();
        let target = app.world.get::<PanOrbitCamera>(camera).unwrap().target_radius;
        assert_abs_diff_eq!(target, 3.8, epsilon = 1e-5);
    }
}
