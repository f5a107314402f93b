use crate::cloud::PointCloud;
use crate::error::PrepResult;
use crate::utils::{constants::EPSILON, sphere_volume};
use log::{debug, warn};

use super::sphere::sphere_surface;
use super::validate_ball_request;

/// Füllt eine Kugel vom gegebenen Radius mit konzentrischen Schalen
/// aus Spiral-Oberflächenpunkten (Schalenmethode).
///
/// Die Gesamtzahl der Punkte folgt aus dem Kugelvolumen und dem
/// Zielabstand `delta_r` (ein Punkt pro Würfelzelle `delta_r^3`).
/// Die Schalen liegen bei `delta_r, 2*delta_r, ...` bis einschließlich
/// `radius`; jede Schale erhält Punkte proportional zu ihrer Fläche.
/// Die äußerste Schale liegt damit genau auf dem Rand, alle Punkte
/// erfüllen `Norm <= radius`.
pub fn ball(radius: f64, delta_r: f64) -> PrepResult<PointCloud> {
    validate_ball_request(radius, delta_r)?;

    let target_count = (sphere_volume(radius) / delta_r.powi(3)).round();
    // Schalen bis maximal `radius`; die Toleranz fängt Fälle wie
    // 0.1 / 0.025 ab, die als 3.999... herauskommen.
    let shell_count = (radius / delta_r + EPSILON).floor() as usize;

    let shell_radii: Vec<f64> = (1..=shell_count).map(|i| i as f64 * delta_r).collect();
    let weight_sum: f64 = shell_radii.iter().map(|r| r * r).sum();

    let mut cloud = PointCloud::with_capacity(target_count as usize);
    for &shell_radius in &shell_radii {
        let weight = shell_radius * shell_radius / weight_sum;
        let shell_points = (target_count * weight).round() as usize;
        if shell_points < 2 {
            warn!(
                "Skipping shell at r = {} ({} point(s) allocated, need at least 2).",
                shell_radius, shell_points
            );
            continue;
        }
        debug!(
            "Shell at r = {}: {} points.",
            shell_radius, shell_points
        );
        cloud.merge(sphere_surface(shell_points)?.scaled(shell_radius));
    }

    debug!(
        "Shell-filled ball: radius {}, spacing {}, {} shells, {} points (target {}).",
        radius,
        delta_r,
        shell_count,
        cloud.len(),
        target_count
    );
    Ok(cloud)
}
