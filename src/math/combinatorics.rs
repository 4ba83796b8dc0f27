// src/math/combinatorics.rs
//
// Fakultät und Binomialkoeffizienten für die Anzahl der Winkel-Slots pro
// Breitenkreis. Alles iterativ und mit geprüfter u128-Arithmetik.

use crate::math::error::{MathError, MathResult};
use serde::{Deserialize, Serialize};

/// Fakultät n! (1 für n < 2). Exakt bis n = 34, danach `Overflow`.
pub fn factorial(n: u32) -> MathResult<u128> {
    (2..=n as u128).try_fold(1u128, |acc, k| {
        acc.checked_mul(k).ok_or_else(|| MathError::Overflow {
            operation: format!("factorial({n})"),
        })
    })
}

/// Binomialkoeffizient "n choose k".
///
/// Multiplikative Formel: nach Schritt `i` steht `C(n - k + i + 1, i + 1)` im
/// Akkumulator, die Division ist daher in jedem Schritt exakt.
pub fn binomial(n: u32, k: u32) -> MathResult<u128> {
    if k > n {
        return Ok(0);
    }
    // Nutze Symmetrie für Effizienz
    let k = k.min(n - k);

    let mut result = 1u128;
    for i in 0..k as u128 {
        let numerator = (n as u128) - (k as u128) + i + 1;
        result = result
            .checked_mul(numerator)
            .ok_or_else(|| MathError::Overflow {
                operation: format!("binomial({n}, {k})"),
            })?
            / (i + 1);
    }
    Ok(result)
}

/// Zentraler Binomialkoeffizient C(n, ⌊n/2⌋).
///
/// Exakt für alle Bitbreiten bis mindestens 64 (u128 reicht bis etwa n = 125).
pub fn combination(n: u32) -> MathResult<u128> {
    binomial(n, n / 2)
}

/// Wandelt eine rohe Zahl (z.B. aus einer Konfigurationsdatei) in eine
/// Bitbreite um. Nachkommastellen werden abgeschnitten.
pub fn bit_width(raw: f64) -> MathResult<u32> {
    if !raw.is_finite() || raw < 0.0 || raw.floor() > u32::MAX as f64 {
        return Err(MathError::InvalidInput {
            value: raw.to_string(),
        });
    }
    Ok(raw.floor() as u32)
}

/// Entscheidet, wie viele Winkel-Slots ein Breitenkreis hat.
///
/// Argumente sind die Bitbreite `B` und das Level des Punkts.
pub trait SlotCounter {
    fn slots(&self, bits: u32, level: u32) -> MathResult<u128>;
}

impl<F> SlotCounter for F
where
    F: Fn(u32, u32) -> MathResult<u128>,
{
    fn slots(&self, bits: u32, level: u32) -> MathResult<u128> {
        self(bits, level)
    }
}

/// Die beiden eingebauten Varianten für die Slot-Anzahl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStrategy {
    /// Alle Breitenkreise teilen sich C(B, ⌊B/2⌋) Slots.
    #[default]
    CentralBinomial,
    /// Jeder Breitenkreis bekommt C(B, level) Slots.
    PerLevel,
}

impl SlotStrategy {
    pub const ALL: [SlotStrategy; 2] = [SlotStrategy::CentralBinomial, SlotStrategy::PerLevel];

    pub fn label(&self) -> &'static str {
        match self {
            SlotStrategy::CentralBinomial => "C(B, B/2) for every level",
            SlotStrategy::PerLevel => "C(B, level) per level",
        }
    }
}

impl SlotCounter for SlotStrategy {
    fn slots(&self, bits: u32, level: u32) -> MathResult<u128> {
        match self {
            SlotStrategy::CentralBinomial => combination(bits),
            SlotStrategy::PerLevel => binomial(bits, level),
        }
    }
}
