// src/utils.rs

/// Mathematische Konstanten
pub mod constants {
    use std::f64::consts::PI;

    pub const EPSILON: f64 = 1e-10;
    pub const SQRT_3: f64 = 1.7320508075688772;
    pub const SQRT_5: f64 = 2.23606797749979;
    pub const SQRT_6: f64 = 2.449489742783178;

    /// Winkelschritt der Goldenen Spirale, `PI * (sqrt(5) - 1)`.
    pub const GOLDEN_ANGLE: f64 = PI * (SQRT_5 - 1.0);
    /// Ebenenabstand dicht gepackter Kugelschichten, `2 * sqrt(6) / 3`.
    pub const HCP_LAYER_STEP: f64 = 2.0 * SQRT_6 / 3.0;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Prüft ob zwei Floats mit custom Toleranz gleich sind
    pub fn nearly_equal_eps(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f64) -> bool {
        a.abs() < EPSILON
    }

    /// Lineare Interpolation
    pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + (b - a) * t
    }
}

/// Volumen einer Kugel mit gegebenem Radius.
pub fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * std::f64::consts::PI * radius.powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_angle_matches_closed_form() {
        let expected = std::f64::consts::PI * (5.0_f64.sqrt() - 1.0);
        assert!(
            (constants::GOLDEN_ANGLE - expected).abs() < 1e-14,
            "GOLDEN_ANGLE: {}",
            constants::GOLDEN_ANGLE
        );
    }

    #[test]
    fn test_hcp_layer_step_matches_closed_form() {
        let expected = 2.0 * 6.0_f64.sqrt() / 3.0;
        assert!((constants::HCP_LAYER_STEP - expected).abs() < 1e-14);
    }

    #[test]
    fn test_nearly_equal() {
        assert!(comparison::nearly_equal(1.0, 1.0 + 1e-12));
        assert!(!comparison::nearly_equal(1.0, 1.0 + 1e-9));
        assert!(comparison::nearly_zero(-1e-12));
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(comparison::lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(comparison::lerp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(comparison::lerp(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn test_sphere_volume() {
        // Einheitskugel: 4/3 * PI
        assert!(comparison::nearly_equal(
            sphere_volume(1.0),
            4.0 / 3.0 * std::f64::consts::PI
        ));
        assert!(comparison::nearly_equal(sphere_volume(0.0), 0.0));
    }
}
