// src/math/types/bit_vector.rs
use crate::math::error::{MathError, MathResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anzahl gesetzter Einträge eines Bitvektors (Hamming-Gewicht).
pub type Level = u32;

/// Bitvektor fester Länge. Ein Eintrag gilt als gesetzt, wenn er > 0 ist.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BitVector(pub Vec<f64>);

impl BitVector {
    pub fn new(entries: Vec<f64>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Level ohne Längenprüfung. NaN zählt nicht als gesetzt.
    pub fn level(&self) -> Level {
        self.0.iter().filter(|&&v| v > 0.0).count() as Level
    }
}

impl From<Vec<f64>> for BitVector {
    fn from(entries: Vec<f64>) -> Self {
        Self(entries)
    }
}

impl<const N: usize> From<[u8; N]> for BitVector {
    fn from(bits: [u8; N]) -> Self {
        Self(bits.iter().map(|&b| f64::from(b)).collect())
    }
}

/// Kommagetrennt ohne Leerzeichen, also `1,0,0,0,0`.
impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            // f64-Display schreibt 1.0 als "1", 0.5 als "0.5", -0.0 aber als "-0"
            if *value == 0.0 {
                f.write_str("0")?;
            } else {
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

/// Bestimmt das Level eines Vektors und prüft dabei die erwartete Länge.
pub fn classify(vector: &BitVector, length: u32) -> MathResult<Level> {
    if vector.len() != length as usize {
        return Err(MathError::LengthMismatch {
            index: 0,
            expected: length as usize,
            actual: vector.len(),
        });
    }
    Ok(vector.level())
}
