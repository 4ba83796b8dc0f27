// src/view/resources.rs
use crate::math::{
    error::{MathError, MathResult},
    geometry::sphere::{
        label::LabelSet,
        layout::{LayoutConfig, LevelHistogram, PlacedPoint, layout_with},
    },
};
use crate::view::config::SphereViewConfig;
use bevy::prelude::*;
use std::sync::Arc;

/// Das zuletzt berechnete Layout. Wird bei jeder Neuberechnung ersetzt,
/// nie an Ort und Stelle verändert.
#[derive(Resource, Debug, Default)]
pub struct ActiveLayout {
    pub config: Option<LayoutConfig>,
    pub points: Arc<[PlacedPoint]>,
    pub histogram: LevelHistogram,
    pub error: Option<MathError>,
}

impl ActiveLayout {
    pub fn publish(&mut self, config: LayoutConfig, points: Vec<PlacedPoint>) {
        self.histogram = LevelHistogram::from_points(&points);
        self.points = points.into();
        self.config = Some(config);
        self.error = None;
    }

    pub fn fail(&mut self, error: MathError) {
        self.points = Arc::from(Vec::new());
        self.histogram = LevelHistogram::default();
        self.config = None;
        self.error = Some(error);
    }
}

/// Label-Texturen des aktuellen Layouts.
#[derive(Resource, Debug, Default)]
pub struct LabelTextures(pub LabelSet<Handle<Image>>);

/// Berechnet das Layout für eine Ansicht-Konfiguration.
pub fn compute_layout(config: &SphereViewConfig) -> MathResult<(LayoutConfig, Vec<PlacedPoint>)> {
    let layout_config = LayoutConfig::try_from(config)?;
    let points = layout_with(
        layout_config.radius,
        layout_config.bits,
        &config.values,
        &config.slot_strategy,
    )?;
    Ok((layout_config, points))
}
