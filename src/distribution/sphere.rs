use crate::Vec3;
use crate::cloud::PointCloud;
use crate::error::{PrepError, PrepResult};
use crate::utils::constants::GOLDEN_ANGLE;

/// Verteilt `count` Punkte gleichmäßig auf der Einheitskugel-Oberfläche
/// (Goldene-Spirale-Methode).
///
/// Die Punkte liegen auf einer Spirale mit dem goldenen Winkel als
/// Azimut-Schritt; die y-Koordinate läuft linear von +1 (erster Punkt)
/// bis -1 (letzter Punkt). Weniger als zwei Punkte sind nicht sinnvoll,
/// da die Breitengrad-Schrittweite dann nicht definiert ist.
pub fn sphere_surface(count: usize) -> PrepResult<PointCloud> {
    if count < 2 {
        return Err(PrepError::InsufficientPoints {
            expected: 2,
            actual: count,
        });
    }

    let mut cloud = PointCloud::with_capacity(count);
    let latitude_step = 2.0 / (count - 1) as f64;

    for index in 0..count {
        // Rundungsfehler könnten y minimal aus [-1, 1] schieben
        let y = (1.0 - index as f64 * latitude_step).clamp(-1.0, 1.0);
        let ring_radius = (1.0 - y * y).sqrt();
        let azimuth = GOLDEN_ANGLE * index as f64;
        cloud.push(Vec3::new(
            ring_radius * azimuth.cos(),
            y,
            ring_radius * azimuth.sin(),
        ));
    }

    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_counts() {
        for count in [0, 1] {
            match sphere_surface(count) {
                Err(PrepError::InsufficientPoints { expected, actual }) => {
                    assert_eq!(expected, 2);
                    assert_eq!(actual, count);
                }
                other => panic!("Erwartet InsufficientPoints, bekommen: {:?}", other.map(|c| c.len())),
            }
        }
    }

    #[test]
    fn test_points_lie_on_unit_sphere() {
        let cloud = sphere_surface(200).unwrap();
        assert_eq!(cloud.len(), 200);
        for point in &cloud {
            assert!(
                (point.norm() - 1.0).abs() < 1e-12,
                "Punkt nicht auf Einheitskugel: {:?}, Norm: {}",
                point,
                point.norm()
            );
        }
    }

    #[test]
    fn test_first_and_last_point_hit_the_poles() {
        let cloud = sphere_surface(50).unwrap();
        let first = cloud.points()[0];
        let last = cloud.points()[49];
        assert!((first.y - 1.0).abs() < 1e-12);
        assert!((last.y + 1.0).abs() < 1e-12);
        assert!(first.x.abs() < 1e-12 && first.z.abs() < 1e-12);
    }

    #[test]
    fn test_minimal_count_yields_both_poles() {
        let cloud = sphere_surface(2).unwrap();
        assert_eq!(cloud.len(), 2);
        assert!((cloud.points()[0].y - 1.0).abs() < 1e-12);
        assert!((cloud.points()[1].y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_points_do_not_cluster() {
        // Bei gleichmäßiger Verteilung entfällt auf jeden Punkt die
        // Fläche 4*PI/n; der Mindestabstand sollte deutlich über einem
        // kleinen Bruchteil der zugehörigen Kantenlänge liegen.
        let n = 100;
        let cloud = sphere_surface(n).unwrap();
        let characteristic = (4.0 * std::f64::consts::PI / n as f64).sqrt();
        let mut min_distance = f64::MAX;
        for (i, a) in cloud.iter().enumerate() {
            for b in cloud.points()[i + 1..].iter() {
                min_distance = min_distance.min((a - b).norm());
            }
        }
        assert!(
            min_distance > 0.3 * characteristic,
            "Punkte klumpen: Mindestabstand {} bei Kantenlänge {}",
            min_distance,
            characteristic
        );
    }
}
