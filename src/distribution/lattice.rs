use crate::Vec3;
use crate::cloud::PointCloud;
use crate::error::{PrepError, PrepResult};
use crate::utils::constants::{HCP_LAYER_STEP, SQRT_3};

use super::validate_ball_request;

/// Lage der Gitterpunkte eines Würfels relativ zu seinen Zellen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Centering {
    /// Punkte auf den Zellecken, inklusive beider Würfelflächen
    /// (`n + 1` Punkte pro Achse).
    Node,
    /// Punkte in den Zellmitten (`n` Punkte pro Achse, Randabstand
    /// eine halbe Zelle).
    Cell,
}

/// Füllt eine Kugel mit einem kubischen Gitter der Schrittweite `delta_r`.
///
/// Das Gitter startet bei `-radius` auf jeder Achse; behalten werden nur
/// Punkte strikt innerhalb der Kugel (`Norm < radius`). Gitterpunkte
/// exakt auf dem Rand fallen damit heraus.
pub fn ball_cubic(radius: f64, delta_r: f64) -> PrepResult<PointCloud> {
    validate_ball_request(radius, delta_r)?;

    let steps = (2.0 * radius / delta_r).ceil() as usize;
    let coordinate = |index: usize| index as f64 * delta_r - radius;

    let mut cloud = PointCloud::new();
    for i in 0..steps {
        for j in 0..steps {
            for k in 0..steps {
                let point = Vec3::new(coordinate(i), coordinate(j), coordinate(k));
                if point.norm() < radius {
                    cloud.push(point);
                }
            }
        }
    }
    Ok(cloud)
}

/// Füllt eine Kugel mit einem hexagonal dichtest gepackten Gitter
/// (Abstand nächster Nachbarn `delta_r`).
///
/// Das rohe Gitter wird auf seinen Schwerpunkt zentriert und dann wie
/// bei [`ball_cubic`] strikt auf `Norm < radius` beschnitten.
pub fn ball_hcp(radius: f64, delta_r: f64) -> PrepResult<PointCloud> {
    validate_ball_request(radius, delta_r)?;

    let per_axis = (2.0 * radius / delta_r).ceil() as usize;
    let scale = delta_r / 2.0;

    let mut raw = Vec::with_capacity(per_axis.pow(3));
    for k in 0..per_axis {
        for j in 0..per_axis {
            for i in 0..per_axis {
                let x = (2 * i + (j + k) % 2) as f64;
                let y = SQRT_3 * (j as f64 + (k % 2) as f64 / 3.0);
                let z = HCP_LAYER_STEP * k as f64;
                raw.push(Vec3::new(x, y, z) * scale);
            }
        }
    }

    let centroid = raw.iter().fold(Vec3::zeros(), |acc, p| acc + p) / raw.len() as f64;
    Ok(raw
        .into_iter()
        .map(|point| point - centroid)
        .filter(|point| point.norm() < radius)
        .collect())
}

/// Füllt einen Würfel der Kantenlänge `side` mit einem regulären Gitter.
///
/// Die Schrittweite `spacing` wird exakt eingehalten; die Zellenzahl pro
/// Achse ist `round(side / spacing)`. Das Gitter ist symmetrisch um den
/// Ursprung.
pub fn cube(side: f64, spacing: f64, centering: Centering) -> PrepResult<PointCloud> {
    if !side.is_finite() || side <= 0.0 {
        return Err(PrepError::InvalidConfiguration {
            message: format!("cube side must be positive and finite, got {side}"),
        });
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(PrepError::InvalidConfiguration {
            message: format!("grid spacing must be positive and finite, got {spacing}"),
        });
    }
    if spacing > side {
        return Err(PrepError::InvalidConfiguration {
            message: format!("grid spacing {spacing} exceeds cube side {side}, nothing to fill"),
        });
    }

    let cells = (side / spacing).round() as usize;
    let half_extent = cells as f64 * spacing / 2.0;
    let (per_axis, first) = match centering {
        Centering::Node => (cells + 1, -half_extent),
        Centering::Cell => (cells, spacing / 2.0 - half_extent),
    };
    let coordinate = |index: usize| first + index as f64 * spacing;

    let mut cloud = PointCloud::with_capacity(per_axis.pow(3));
    for i in 0..per_axis {
        for j in 0..per_axis {
            for k in 0..per_axis {
                cloud.push(Vec3::new(coordinate(i), coordinate(j), coordinate(k)));
            }
        }
    }
    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::comparison::nearly_equal;

    fn min_pairwise_distance(cloud: &PointCloud) -> f64 {
        let mut min_distance = f64::MAX;
        for (i, a) in cloud.iter().enumerate() {
            for b in cloud.points()[i + 1..].iter() {
                min_distance = min_distance.min((a - b).norm());
            }
        }
        min_distance
    }

    #[test]
    fn test_cubic_ball_reference_count() {
        // Gitter {-1, -0.5, 0, 0.5}^3: nur die 27 Kombinationen aus
        // {-0.5, 0, 0.5} liegen strikt innerhalb der Einheitskugel.
        let cloud = ball_cubic(1.0, 0.5).unwrap();
        assert_eq!(cloud.len(), 27);
    }

    #[test]
    fn test_cubic_ball_boundary_is_strict() {
        let radius = 1.0;
        let cloud = ball_cubic(radius, 0.25).unwrap();
        assert!(!cloud.is_empty());
        for point in &cloud {
            assert!(
                point.norm() < radius,
                "Punkt auf oder außerhalb des Rands: {:?}",
                point
            );
        }
    }

    #[test]
    fn test_cubic_ball_keeps_grid_spacing() {
        let delta_r = 0.25;
        let cloud = ball_cubic(1.0, delta_r).unwrap();
        for point in &cloud {
            for component in [point.x, point.y, point.z] {
                let steps = (component + 1.0) / delta_r;
                assert!(
                    (steps - steps.round()).abs() < 1e-9,
                    "Koordinate {} liegt nicht auf dem Gitter",
                    component
                );
            }
        }
    }

    #[test]
    fn test_hcp_ball_nearest_neighbor_distance() {
        let delta_r = 0.5;
        let cloud = ball_hcp(1.0, delta_r).unwrap();
        assert!(cloud.len() > 2);
        let min_distance = min_pairwise_distance(&cloud);
        assert!(
            (min_distance - delta_r).abs() < 1e-9,
            "Nachbarabstand {} statt {}",
            min_distance,
            delta_r
        );
    }

    #[test]
    fn test_hcp_ball_boundary_is_strict() {
        let radius = 0.8;
        let cloud = ball_hcp(radius, 0.2).unwrap();
        assert!(!cloud.is_empty());
        for point in &cloud {
            assert!(point.norm() < radius);
        }
    }

    #[test]
    fn test_hcp_ball_is_roughly_centered() {
        let cloud = ball_hcp(1.0, 0.2).unwrap();
        let centroid = cloud.centroid().unwrap();
        // Durch den Beschnitt bleibt ein Rest-Versatz unter einer
        // halben Gitterkonstante.
        assert!(centroid.norm() < 0.1, "Schwerpunkt: {:?}", centroid);
    }

    #[test]
    fn test_cell_centered_cube() {
        let cloud = cube(1.0, 0.25, Centering::Cell).unwrap();
        assert_eq!(cloud.len(), 64);
        let max_component = cloud
            .iter()
            .flat_map(|p| [p.x.abs(), p.y.abs(), p.z.abs()])
            .fold(0.0_f64, f64::max);
        // Zellmitten: Randabstand eine halbe Zelle
        assert!(nearly_equal(max_component, 0.375));
        let centroid = cloud.centroid().unwrap();
        assert!(centroid.norm() < 1e-12, "Schwerpunkt: {:?}", centroid);
    }

    #[test]
    fn test_node_centered_cube_includes_faces() {
        let cloud = cube(1.0, 0.25, Centering::Node).unwrap();
        assert_eq!(cloud.len(), 125);
        assert!(cloud.iter().any(|p| p.norm() < 1e-12));
        let max_component = cloud
            .iter()
            .flat_map(|p| [p.x.abs(), p.y.abs(), p.z.abs()])
            .fold(0.0_f64, f64::max);
        assert!(nearly_equal(max_component, 0.5));
    }

    #[test]
    fn test_cube_rejects_invalid_geometry() {
        assert!(cube(0.0, 0.1, Centering::Cell).is_err());
        assert!(cube(1.0, -0.1, Centering::Cell).is_err());
        assert!(cube(1.0, 2.0, Centering::Cell).is_err());
    }
}
