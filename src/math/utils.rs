// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const TAU: f32 = std::f32::consts::TAU; // Explizit TAU von std verwenden
    pub const SQRT_3: f32 = 1.7320508075688772;

    /// Skalierung des Label-Ankers relativ zum Punkt auf der Kugel
    pub const LABEL_DISTANCE_FACTOR: f32 = 1.1;
    /// Vertikaler Versatz des Labels, weg vom Äquator
    pub const LABEL_VERTICAL_OFFSET: f32 = 0.02;
}

/// Winkel-Hilfsfunktionen
pub mod angles {
    use super::constants::TAU;

    /// Normalisiert einen Winkel auf [0, 2π)
    pub fn normalize_angle(angle: f32) -> f32 {
        let mut result = angle % TAU;
        if result < 0.0 {
            result += TAU;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert_abs_diff_eq!(angles::normalize_angle(-PI), PI, epsilon = 1e-6);
        assert_abs_diff_eq!(angles::normalize_angle(constants::TAU + 1.0), 1.0, epsilon = 1e-5);
        assert_eq!(angles::normalize_angle(0.5), 0.5);
    }
}
