// src/distribution/mod.rs

// Deklaration der Untermodule für die Punkt-Generatoren
pub mod ball;
pub mod lattice;
pub mod sphere;

// Re-Exporte für den einfachen Zugriff auf die wichtigsten Generatoren
pub use self::ball::ball;
pub use self::lattice::{Centering, ball_cubic, ball_hcp, cube};
pub use self::sphere::sphere_surface;

use crate::error::{PrepError, PrepResult};

/// Gemeinsame Prüfung für Kugel-Füller: Radius und Abstand müssen
/// endlich und positiv sein, der Abstand darf den Radius nicht übersteigen.
fn validate_ball_request(radius: f64, delta_r: f64) -> PrepResult<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(PrepError::InvalidConfiguration {
            message: format!("ball radius must be positive and finite, got {radius}"),
        });
    }
    if !delta_r.is_finite() || delta_r <= 0.0 {
        return Err(PrepError::InvalidConfiguration {
            message: format!("particle spacing must be positive and finite, got {delta_r}"),
        });
    }
    if delta_r > radius {
        return Err(PrepError::InvalidConfiguration {
            message: format!(
                "particle spacing {delta_r} exceeds ball radius {radius}, nothing to fill"
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ball_request() {
        assert!(validate_ball_request(1.0, 0.1).is_ok());
        assert!(validate_ball_request(0.0, 0.1).is_err());
        assert!(validate_ball_request(-1.0, 0.1).is_err());
        assert!(validate_ball_request(1.0, 0.0).is_err());
        assert!(validate_ball_request(1.0, f64::NAN).is_err());
        assert!(validate_ball_request(0.05, 0.1).is_err());
    }
}
