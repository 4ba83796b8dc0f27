// src/view/config.rs
use crate::math::{
    combinatorics::{SlotStrategy, bit_width},
    error::MathError,
    geometry::sphere::layout::LayoutConfig,
    types::BitVector,
};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Eingaben der Ansicht. Jede Änderung löst ein komplettes Neu-Layout aus.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereViewConfig {
    pub radius: f32,
    /// Rohwert, wird über `bit_width` geprüft
    pub bits: f64,
    pub values: Vec<BitVector>,
    pub slot_strategy: SlotStrategy,
    pub show_labels: bool,
    pub show_guides: bool,
}

impl Default for SphereViewConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            bits: 5.0,
            values: vec![
                BitVector::from([0, 0, 0, 0, 0]),
                BitVector::from([1, 0, 0, 0, 0]),
                BitVector::from([1, 1, 0, 0, 0]),
                BitVector::from([1, 1, 1, 0, 0]),
                BitVector::from([1, 1, 1, 1, 0]),
                BitVector::from([1, 1, 1, 1, 1]),
            ],
            slot_strategy: SlotStrategy::CentralBinomial,
            show_labels: true,
            show_guides: true,
        }
    }
}

impl SphereViewConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Konfiguration aus dem ersten Kommandozeilen-Argument, sonst Default.
    pub fn from_args() -> Self {
        match std::env::args().nth(1) {
            Some(path) => match Self::from_path(&path) {
                Ok(config) => {
                    info!("Loaded sphere config from '{}'", path);
                    config
                }
                Err(err) => {
                    error!("{} ('{}'), falling back to defaults", err, path);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

/// Lädt die Konfiguration vor `Startup`, damit Kamera und Layout sie sehen.
pub fn load_config_system(mut commands: Commands) {
    commands.insert_resource(SphereViewConfig::from_args());
}

impl TryFrom<&SphereViewConfig> for LayoutConfig {
    type Error = MathError;

    fn try_from(config: &SphereViewConfig) -> Result<Self, Self::Error> {
        LayoutConfig::new(config.radius, bit_width(config.bits)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_the_staircase() {
        let config = SphereViewConfig::default();
        assert_eq!(config.values.len(), 6);
        let layout_config = LayoutConfig::try_from(&config).unwrap();
        assert_eq!(layout_config.bits, 5);
        assert_eq!(layout_config.radius, 10.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SphereViewConfig::from_json_str(
            r#"{ "bits": 3, "values": [[0,0,0],[1,0,1]], "slot_strategy": "per_level" }"#,
        )
        .unwrap();
        assert_eq!(config.bits, 3.0);
        assert_eq!(config.values[1], BitVector::from([1, 0, 1]));
        assert_eq!(config.slot_strategy, SlotStrategy::PerLevel);
        assert_eq!(config.radius, 10.0);
        assert!(config.show_labels);
    }

    #[test]
    fn test_invalid_bits_are_rejected() {
        let config = SphereViewConfig {
            bits: -2.0,
            ..Default::default()
        };
        assert!(matches!(
            LayoutConfig::try_from(&config),
            Err(MathError::InvalidInput { .. })
        ));

        let zero = SphereViewConfig {
            bits: 0.4,
            ..Default::default()
        };
        assert!(matches!(
            LayoutConfig::try_from(&zero),
            Err(MathError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            SphereViewConfig::from_json_str("{ bits: }"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            SphereViewConfig::from_path("/nonexistent/bit_sphere.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
