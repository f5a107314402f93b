use crate::error::{PrepError, PrepResult};
use crate::utils::constants::EPSILON;
use rand::Rng;

/// Untere Grenze der Aktivierungsenergie für Flaws, J/kg.
pub const FLAW_ENERGY_MIN: f64 = 1.4e-4;
/// Obere Grenze der Aktivierungsenergie für Flaws, J/kg.
pub const FLAW_ENERGY_MAX: f64 = 2.1e-4;
/// Stützstellenzahl der Flaw-Verteilung.
pub const FLAW_SAMPLE_COUNT: usize = 20;

/// Empirische Verteilungsfunktion über Stützstellen mit linearer
/// Interpolation zwischen den Stützstellen.
///
/// Die Verteilung ist ein eigenständiger Wert und wird per Referenz an
/// die Sampler übergeben; es gibt bewusst keinen globalen Zustand.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalCdf {
    values: Vec<f64>,
    cumulative: Vec<f64>,
}

impl EmpiricalCdf {
    /// Baut eine Verteilung aus Stützwerten und zugehörigen kumulierten
    /// Wahrscheinlichkeiten.
    ///
    /// Beide Folgen müssen gleich lang (mindestens 2) und monoton
    /// steigend sein; die kumulierten Werte müssen bei 1 enden.
    pub fn new(values: Vec<f64>, cumulative: Vec<f64>) -> PrepResult<Self> {
        if values.len() < 2 {
            return Err(PrepError::InsufficientPoints {
                expected: 2,
                actual: values.len(),
            });
        }
        if values.len() != cumulative.len() {
            return Err(PrepError::InvalidConfiguration {
                message: format!(
                    "sample count mismatch: {} values vs {} cumulative probabilities",
                    values.len(),
                    cumulative.len()
                ),
            });
        }
        if values.iter().chain(cumulative.iter()).any(|v| !v.is_finite()) {
            return Err(PrepError::InvalidConfiguration {
                message: "distribution samples must be finite".into(),
            });
        }
        if values.windows(2).any(|w| w[1] < w[0]) {
            return Err(PrepError::InvalidConfiguration {
                message: "sample values must be non-decreasing".into(),
            });
        }
        if cumulative.windows(2).any(|w| w[1] < w[0]) {
            return Err(PrepError::InvalidConfiguration {
                message: "cumulative probabilities must be non-decreasing".into(),
            });
        }
        let first = cumulative[0];
        let last = *cumulative.last().unwrap_or(&0.0);
        if first < 0.0 || (last - 1.0).abs() > 1e-9 {
            return Err(PrepError::InvalidConfiguration {
                message: format!(
                    "cumulative probabilities must run from >= 0 to 1, got [{first}, {last}]"
                ),
            });
        }
        let mut cumulative = cumulative;
        // Letzten Wert exakt auf 1 ziehen, damit quantile(1.0) den
        // oberen Stützwert trifft
        *cumulative.last_mut().expect("length checked above") = 1.0;
        Ok(Self { values, cumulative })
    }

    /// Baut die Verteilung aus (unnormierten) Dichte-Gewichten an den
    /// Stützstellen; die Gewichte werden kumuliert und normiert.
    pub fn from_pdf(values: Vec<f64>, weights: &[f64]) -> PrepResult<Self> {
        if values.len() != weights.len() {
            return Err(PrepError::InvalidConfiguration {
                message: format!(
                    "sample count mismatch: {} values vs {} weights",
                    values.len(),
                    weights.len()
                ),
            });
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(PrepError::InvalidConfiguration {
                message: "density weights must be finite and non-negative".into(),
            });
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(PrepError::InvalidConfiguration {
                message: "density weights sum to zero, distribution is undefined".into(),
            });
        }
        let mut running = 0.0;
        let cumulative: Vec<f64> = weights
            .iter()
            .map(|w| {
                running += w;
                running / total
            })
            .collect();
        Self::new(values, cumulative)
    }

    /// Kleinster Stützwert.
    pub fn min_value(&self) -> f64 {
        self.values[0]
    }

    /// Größter Stützwert.
    pub fn max_value(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Anzahl der Stützstellen.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Inverse der Verteilungsfunktion an der Stelle `u` in [0, 1].
    pub fn quantile(&self, u: f64) -> PrepResult<f64> {
        if !(0.0..=1.0).contains(&u) {
            return Err(PrepError::InvalidConfiguration {
                message: format!("quantile argument {u} outside [0, 1]"),
            });
        }
        Ok(self.quantile_in_range(u))
    }

    /// Zieht einen Wert über die Inversionsmethode.
    pub fn draw(&self, rng: &mut impl Rng) -> f64 {
        self.quantile_in_range(rng.random())
    }

    // `u` muss in [0, 1] liegen.
    fn quantile_in_range(&self, u: f64) -> f64 {
        let last = self.cumulative.len() - 1;
        if u <= self.cumulative[0] {
            return self.values[0];
        }
        if u >= self.cumulative[last] {
            return self.values[last];
        }
        // Erste Stützstelle mit kumulierter Wahrscheinlichkeit >= u;
        // u liegt jetzt strikt zwischen dem ersten und letzten
        // kumulierten Wert, der Index damit in [1, n-1].
        let upper = self.cumulative.partition_point(|&c| c < u);
        let lower = upper - 1;
        let (x0, x1) = (self.values[lower], self.values[upper]);
        let (y0, y1) = (self.cumulative[lower], self.cumulative[upper]);
        if y1 - y0 <= EPSILON {
            // (Nahezu) masseloses Segment: linken Stützwert liefern
            // statt durch die Differenz zu teilen
            return x0;
        }
        x0 + (u - y0) * (x1 - x0) / (y1 - y0)
    }
}

/// Verteilung der Flaw-Aktivierungsenergien für Impakt-Szenarien:
/// quadratisch ansteigende Dichte auf
/// [[`FLAW_ENERGY_MIN`], [`FLAW_ENERGY_MAX`]].
pub fn impact_flaw_cdf() -> PrepResult<EmpiricalCdf> {
    // Parametrisierung über t = i/(n-1), damit die Endpunkte exakt
    // getroffen werden
    let denominator = (FLAW_SAMPLE_COUNT - 1) as f64;
    let values: Vec<f64> = (0..FLAW_SAMPLE_COUNT)
        .map(|i| FLAW_ENERGY_MIN + (FLAW_ENERGY_MAX - FLAW_ENERGY_MIN) * (i as f64 / denominator))
        .collect();
    let weights: Vec<f64> = values
        .iter()
        .map(|x| (x - FLAW_ENERGY_MIN).powi(2))
        .collect();
    EmpiricalCdf::from_pdf(values, &weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_quantile_hits_endpoints() {
        let cdf = impact_flaw_cdf().unwrap();
        assert_eq!(cdf.len(), FLAW_SAMPLE_COUNT);
        assert_eq!(cdf.quantile(0.0).unwrap(), FLAW_ENERGY_MIN);
        assert_eq!(cdf.quantile(1.0).unwrap(), FLAW_ENERGY_MAX);
    }

    #[test]
    fn test_quantile_rejects_out_of_range() {
        let cdf = impact_flaw_cdf().unwrap();
        assert!(cdf.quantile(-0.1).is_err());
        assert!(cdf.quantile(1.1).is_err());
        assert!(cdf.quantile(f64::NAN).is_err());
    }

    #[test]
    fn test_quantile_is_monotonic() {
        let cdf = impact_flaw_cdf().unwrap();
        let mut previous = cdf.quantile(0.0).unwrap();
        for i in 1..=100 {
            let u = i as f64 / 100.0;
            let value = cdf.quantile(u).unwrap();
            assert!(
                value >= previous,
                "Quantil fällt bei u = {}: {} < {}",
                u,
                value,
                previous
            );
            previous = value;
        }
    }

    #[test]
    fn test_quantile_at_sample_boundary() {
        // u exakt auf einer Stützstelle muss deren Wert liefern
        let cdf = EmpiricalCdf::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 0.25, 0.75, 1.0],
        )
        .unwrap();
        assert_eq!(cdf.quantile(0.25).unwrap(), 1.0);
        assert_eq!(cdf.quantile(0.75).unwrap(), 2.0);
    }

    #[test]
    fn test_flat_segment_does_not_divide_by_zero() {
        // Segment ohne Masse zwischen 1.0 und 2.0
        let cdf = EmpiricalCdf::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 0.5, 0.5, 1.0],
        )
        .unwrap();
        let at_plateau = cdf.quantile(0.5).unwrap();
        assert!(at_plateau.is_finite());
        assert_eq!(at_plateau, 1.0);
        assert_eq!(cdf.quantile(0.75).unwrap(), 2.5);
    }

    #[test]
    fn test_quadratic_density_pushes_mass_to_the_right() {
        // Bei quadratisch steigender Dichte liegt der Median deutlich
        // über der Intervallmitte.
        let cdf = impact_flaw_cdf().unwrap();
        let median = cdf.quantile(0.5).unwrap();
        let midpoint = 0.5 * (FLAW_ENERGY_MIN + FLAW_ENERGY_MAX);
        assert!(median > midpoint, "Median {} <= Mitte {}", median, midpoint);
    }

    #[test]
    fn test_draw_stays_in_support() {
        let cdf = impact_flaw_cdf().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let value = cdf.draw(&mut rng);
            assert!((FLAW_ENERGY_MIN..=FLAW_ENERGY_MAX).contains(&value));
        }
    }

    #[test]
    fn test_from_pdf_rejects_zero_mass() {
        let result = EmpiricalCdf::from_pdf(vec![0.0, 1.0], &[0.0, 0.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_inconsistent_input() {
        assert!(EmpiricalCdf::new(vec![0.0], vec![1.0]).is_err());
        assert!(EmpiricalCdf::new(vec![0.0, 1.0], vec![0.0, 0.5, 1.0]).is_err());
        assert!(EmpiricalCdf::new(vec![1.0, 0.0], vec![0.0, 1.0]).is_err());
        assert!(EmpiricalCdf::new(vec![0.0, 1.0], vec![0.5, 0.4]).is_err());
        assert!(EmpiricalCdf::new(vec![0.0, 1.0], vec![0.0, 0.9]).is_err());
    }
}
