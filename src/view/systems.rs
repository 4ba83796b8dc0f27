// src/view/systems.rs
use super::config::SphereViewConfig;
use super::resources::{ActiveLayout, LabelTextures, compute_layout};
use crate::debug::visualization::label_texture::{ImageLabelRenderer, PointLabel, default_font};
use crate::math::geometry::sphere::label::{place_label, render_labels};
use bevy::app::AppExit;
use bevy::prelude::*;

/// Alles, was zu einem Layout-Durchlauf gehört und beim nächsten entfernt wird.
#[derive(Component, Debug)]
pub struct LayoutVisual;

/// Markiert den Punkt-Marker eines platzierten Vektors.
#[derive(Component, Debug)]
pub struct PointMarker;

/// Berechnet das Layout neu, sobald sich die Konfiguration ändert, und baut
/// die Szene des vorherigen Durchlaufs vollständig ab.
#[allow(clippy::too_many_arguments)]
pub fn recompute_layout_system(
    mut commands: Commands,
    config: Res<SphereViewConfig>,
    mut active: ResMut<ActiveLayout>,
    mut label_textures: ResMut<LabelTextures>,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    fonts: Res<Assets<Font>>,
    visuals: Query<Entity, With<LayoutVisual>>,
) {
    if !config.is_changed() {
        return;
    }

    // --- Vorherigen Durchlauf abbauen ---
    for entity in visuals.iter() {
        commands.entity(entity).despawn_recursive();
    }
    let mut renderer = ImageLabelRenderer::new(&mut images, default_font(&fonts));
    std::mem::take(&mut label_textures.0).release(&mut renderer);

    // --- Neu berechnen ---
    let (layout_config, points) = match compute_layout(&config) {
        Ok(result) => result,
        Err(err) => {
            error!("Layout pass failed: {}", err);
            active.fail(err);
            return;
        }
    };
    active.publish(layout_config, points);
    info!(
        "Layout recomputed: {} points on {} levels (B = {}, r = {:.2}, {:?})",
        active.points.len(),
        active.histogram.occupied_levels(),
        layout_config.bits,
        layout_config.radius,
        config.slot_strategy
    );

    let radius = layout_config.radius;

    // Kugel
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(radius).mesh().uv(32, 32)),
            material: materials.add(StandardMaterial {
                base_color: Color::rgba(1.0, 1.0, 1.0, 0.2),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            }),
            ..default()
        },
        LayoutVisual,
    ));

    // Punkt-Marker
    let marker_mesh = meshes.add(Sphere::new(radius / 160.0).mesh().uv(16, 8));
    let marker_material = materials.add(StandardMaterial {
        base_color: Color::TOMATO,
        unlit: true,
        ..default()
    });
    for point in active.points.iter() {
        commands.spawn((
            PbrBundle {
                mesh: marker_mesh.clone(),
                material: marker_material.clone(),
                transform: Transform::from_translation(point.position),
                ..default()
            },
            PointMarker,
            Name::new(format!("Point [{}]", point.label)),
            LayoutVisual,
        ));
    }

    if !config.show_labels {
        return;
    }

    // Labels: ein Billboard-Quad pro Punkt, fehlende Texturen werden übersprungen
    let labels = render_labels(&mut renderer, &active.points);
    let quad = meshes.add(Rectangle::new(1.0, 1.0));
    for (index, point) in active.points.iter().enumerate() {
        let Some(texture) = labels.get(index) else {
            continue;
        };
        let anchor = place_label(point.position, radius);
        commands.spawn((
            PbrBundle {
                mesh: quad.clone(),
                material: materials.add(StandardMaterial {
                    base_color_texture: Some(texture.clone()),
                    alpha_mode: AlphaMode::Blend,
                    unlit: true,
                    double_sided: true,
                    cull_mode: None,
                    ..default()
                }),
                transform: Transform::from_translation(anchor.position)
                    .with_scale(anchor.scale_for(&point.label)),
                ..default()
            },
            PointLabel,
            LayoutVisual,
        ));
    }
    debug!("{} of {} labels rendered", labels.rendered(), labels.len());
    label_textures.0 = labels;
}

/// Gibt beim Beenden die Label-Texturen des letzten Durchlaufs frei.
pub fn release_labels_on_exit_system(
    mut exit_events: EventReader<AppExit>,
    mut label_textures: ResMut<LabelTextures>,
    mut images: ResMut<Assets<Image>>,
) {
    if exit_events.read().next().is_none() {
        return;
    }
    let released = label_textures.0.rendered();
    // Zum Freigeben wird keine Schrift gebraucht
    std::mem::take(&mut label_textures.0)
        .release(&mut ImageLabelRenderer::new(&mut images, None));
    info!("Released {} label textures on exit.", released);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::visualization::label_texture::bundled_font;
    use crate::math::types::BitVector;

    fn layout_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Image>()
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_asset::<Font>()
            .init_resource::<ActiveLayout>()
            .init_resource::<LabelTextures>()
            .insert_resource(SphereViewConfig::default())
            .add_systems(Update, recompute_layout_system);
        app.world
            .resource_mut::<Assets<Font>>()
            .insert(Handle::<Font>::default().id(), bundled_font());
        app
    }

    fn label_images(app: &App) -> usize {
        app.world.resource::<Assets<Image>>().len()
    }

    #[test]
    fn test_recompute_releases_previous_labels() {
        let mut app = layout_app();
        app.update();
        assert_eq!(label_images(&app), 6);
        assert_eq!(app.world.resource::<LabelTextures>().0.rendered(), 6);

        app.world.resource_mut::<SphereViewConfig>().radius = 4.0;
        app.update();
        assert_eq!(label_images(&app), 6);

        app.world.resource_mut::<SphereViewConfig>().slot_strategy =
            crate::math::combinatorics::SlotStrategy::PerLevel;
        app.update();
        assert_eq!(label_images(&app), 6);

        // Unveränderte Konfiguration: kein neuer Durchlauf
        app.update();
        assert_eq!(label_images(&app), 6);
    }

    #[test]
    fn test_failed_pass_leaves_no_labels() {
        let mut app = layout_app();
        app.update();
        assert_eq!(label_images(&app), 6);

        app.world
            .resource_mut::<SphereViewConfig>()
            .values
            .push(BitVector::from([1, 0]));
        app.update();

        assert_eq!(label_images(&app), 0);
        assert!(app.world.resource::<LabelTextures>().0.is_empty());
        assert!(app.world.resource::<ActiveLayout>().error.is_some());
        assert_eq!(
            app.world
                .query_filtered::<Entity, With<LayoutVisual>>()
                .iter(&app.world)
                .count(),
            0
        );
    }

    #[test]
    fn test_hidden_labels_create_no_images() {
        let mut app = layout_app();
        app.world.resource_mut::<SphereViewConfig>().show_labels = false;
        app.update();
        assert_eq!(label_images(&app), 0);
        assert_eq!(app.world.resource::<ActiveLayout>().points.len(), 6);
    }
}
