// ./src/debug/ui.rs
use crate::debug::visualization::svg::export_layout_svg;
use crate::math::combinatorics::SlotStrategy;
use crate::view::{config::SphereViewConfig, resources::ActiveLayout};
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{self, ComboBox, Grid, ScrollArea, Slider, Window},
};

const SVG_EXPORT_PATH: &str = "bit_sphere.svg";

/// Steuerfenster. Änderungen werden nur übernommen, wenn sich Werte wirklich
/// ändern, sonst würde jedes Frame ein Neu-Layout auslösen.
pub fn sphere_control_ui_system(
    mut contexts: EguiContexts,
    mut config: ResMut<SphereViewConfig>,
    active: Res<ActiveLayout>,
) {
    let mut edited = config.clone();

    Window::new("Sphere View")
        .default_width(320.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Layout");
            ui.add(
                Slider::new(&mut edited.radius, 0.5..=50.0)
                    .logarithmic(true)
                    .text("Radius"),
            );

            ComboBox::from_label("Slots per latitude")
                .selected_text(edited.slot_strategy.label())
                .show_ui(ui, |ui| {
                    for strategy in SlotStrategy::ALL {
                        ui.selectable_value(&mut edited.slot_strategy, strategy, strategy.label());
                    }
                });

            ui.checkbox(&mut edited.show_labels, "Labels");
            ui.checkbox(&mut edited.show_guides, "Latitude guides");

            ui.separator();
            ui.label(format!(
                "B = {}, {} vectors",
                edited.bits,
                edited.values.len()
            ));

            if let Some(err) = &active.error {
                ui.colored_label(egui::Color32::RED, format!("Layout failed: {err}"));
                return;
            }

            ui.collapsing("Levels", |ui| {
                Grid::new("level_histogram").striped(true).show(ui, |ui| {
                    ui.label("Level");
                    ui.label("Points");
                    ui.end_row();
                    for (level, count) in active.histogram.occupied() {
                        ui.label(level.to_string());
                        ui.label(count.to_string());
                        ui.end_row();
                    }
                });
            });

            ui.collapsing("Points", |ui| {
                ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    Grid::new("placed_points").striped(true).show(ui, |ui| {
                        ui.label("Vector");
                        ui.label("Level");
                        ui.label("#");
                        ui.label("Position");
                        ui.end_row();
                        for point in active.points.iter() {
                            ui.monospace(&point.label);
                            ui.label(point.level.to_string());
                            ui.label(point.ordinal.to_string());
                            ui.label(format!(
                                "({:.2}, {:.2}, {:.2})",
                                point.position.x, point.position.y, point.position.z
                            ));
                            ui.end_row();
                        }
                    });
                });
            });

            if ui.button("Export SVG").clicked() {
                if let Some(layout_config) = active.config {
                    if let Err(err) =
                        export_layout_svg(&active.points, layout_config.radius, SVG_EXPORT_PATH)
                    {
                        error!("SVG export to '{}' failed: {}", SVG_EXPORT_PATH, err);
                    }
                }
            }
        });

    config.set_if_neq(edited);
}
