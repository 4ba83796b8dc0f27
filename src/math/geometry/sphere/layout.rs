// src/math/geometry/sphere/layout.rs
//
// Verteilt Bitvektoren auf einer Kugel: das Level bestimmt den Breitenkreis,
// die Platzierungs-Ordinalzahl innerhalb des Levels den Azimut.

use crate::math::{
    combinatorics::{SlotCounter, SlotStrategy},
    error::{MathError, MathResult},
    geometry::sphere::coordinates::SphericalCoordinates,
    types::{BitVector, Level, Point3D, classify},
};
use bevy::log::debug;
use std::collections::BTreeMap;
use std::f64::consts::TAU;

/// Geprüfte Eingabeparameter eines Layout-Durchlaufs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub radius: f32,
    pub bits: u32,
}

impl LayoutConfig {
    pub fn new(radius: f32, bits: u32) -> MathResult<Self> {
        let config = Self { radius, bits };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MathResult<()> {
        if self.bits == 0 {
            return Err(MathError::InvalidConfiguration {
                message: "Bit width must be greater than 0".to_string(),
            });
        }

        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("Radius must be a positive number, got {}", self.radius),
            });
        }

        Ok(())
    }
}

/// Ein platzierter Bitvektor.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPoint {
    pub vector: BitVector,
    pub level: Level,
    /// Index unter allen vorher platzierten Vektoren desselben Levels
    pub ordinal: u64,
    pub coordinates: SphericalCoordinates,
    pub position: Point3D,
    pub label: String,
}

/// Zähler pro Level. Wird durch den Fold gereicht statt geteilt; nur
/// tatsächlich vorkommende Level belegen Speicher.
#[derive(Debug, Clone, PartialEq, Default)]
struct LevelTally(BTreeMap<Level, u64>);

impl LevelTally {
    /// Liefert die Ordinalzahl für `level` und den fortgeschriebenen Stand.
    fn advance(mut self, level: Level) -> (u64, Self) {
        let slot = self.0.entry(level).or_insert(0);
        let ordinal = *slot;
        *slot += 1;
        (ordinal, self)
    }
}

/// Polar-Winkel vom Nordpol für ein Level: arccos(1 - 2·level/B).
pub fn polar_angle(level: Level, bits: u32) -> f32 {
    (1.0 - 2.0 * f64::from(level) / f64::from(bits)).acos() as f32
}

/// Azimut für eine Ordinalzahl bei `slots` Plätzen auf dem Breitenkreis.
pub fn azimuth_angle(ordinal: u64, slots: u128) -> f32 {
    (ordinal as f64 * TAU / slots as f64) as f32
}

fn place<S: SlotCounter + ?Sized>(
    config: &LayoutConfig,
    level: Level,
    ordinal: u64,
    slots: &S,
) -> MathResult<SphericalCoordinates> {
    if level == 0 {
        return Ok(SphericalCoordinates::north_pole(config.radius));
    }
    if level == config.bits {
        return Ok(SphericalCoordinates::south_pole(config.radius));
    }

    let slot_count = slots.slots(config.bits, level)?;
    if slot_count == 0 {
        return Err(MathError::InvalidConfiguration {
            message: format!("Slot count for level {level} must be positive"),
        });
    }

    SphericalCoordinates::new(
        config.radius,
        polar_angle(level, config.bits),
        azimuth_angle(ordinal, slot_count),
    )
}

/// Layout mit dem geteilten zentralen Binomialkoeffizienten als Slot-Anzahl.
pub fn layout(radius: f32, bits: u32, vectors: &[BitVector]) -> MathResult<Vec<PlacedPoint>> {
    layout_with(radius, bits, vectors, &SlotStrategy::CentralBinomial)
}

/// Layout mit frei wählbarer Slot-Anzahl pro Breitenkreis.
///
/// Bricht beim ersten Fehler ab; es gibt kein Teilergebnis.
pub fn layout_with<S: SlotCounter + ?Sized>(
    radius: f32,
    bits: u32,
    vectors: &[BitVector],
    slots: &S,
) -> MathResult<Vec<PlacedPoint>> {
    let config = LayoutConfig::new(radius, bits)?;

    let (_, points) = vectors.iter().enumerate().try_fold(
        (LevelTally::default(), Vec::with_capacity(vectors.len())),
        |(tally, mut points), (index, vector)| {
            let level = classify(vector, bits).map_err(|err| match err {
                MathError::LengthMismatch {
                    expected, actual, ..
                } => MathError::LengthMismatch {
                    index,
                    expected,
                    actual,
                },
                other => other,
            })?;
            let (ordinal, tally) = tally.advance(level);
            let coordinates = place(&config, level, ordinal, slots)?;

            let point = PlacedPoint {
                vector: vector.clone(),
                level,
                ordinal,
                coordinates,
                position: coordinates.to_cartesian(),
                label: vector.to_string(),
            };
            debug!(
                "Placed [{}] at level {} ordinal {} -> {:?}",
                point.label, point.level, point.ordinal, point.position
            );
            points.push(point);
            Ok::<_, MathError>((tally, points))
        },
    )?;

    Ok(points)
}

/// Anzahl der platzierten Punkte pro Level, nur besetzte Level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelHistogram {
    counts: BTreeMap<Level, usize>,
}

impl LevelHistogram {
    pub fn from_points(points: &[PlacedPoint]) -> Self {
        let mut counts = BTreeMap::new();
        for point in points {
            *counts.entry(point.level).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Besetzte Level, aufsteigend.
    pub fn occupied(&self) -> impl Iterator<Item = (Level, usize)> + '_ {
        self.counts.iter().map(|(&level, &count)| (level, count))
    }

    pub fn occupied_levels(&self) -> usize {
        self.counts.len()
    }
}
