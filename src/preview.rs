// src/preview.rs
use crate::Vec3;
use crate::cloud::PointCloud;
use crate::error::{PrepError, PrepResult};
use crate::particle::ParticleRecord;
use crate::utils::comparison::lerp;
use log::info;
use std::io::Write;
use std::path::Path;

const SVG_PIXEL_SIZE: f64 = 1000.0;

/// Projektionsebene für die 2D-Vorschau einer Punktmenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Xy,
    Xz,
    Yz,
}

impl Projection {
    /// Bildet einen Punkt auf (horizontal, vertikal) ab.
    pub fn project(&self, point: &Vec3) -> (f64, f64) {
        match self {
            Projection::Xy => (point.x, point.y),
            Projection::Xz => (point.x, point.z),
            Projection::Yz => (point.y, point.z),
        }
    }
}

/// Ein Helfer zum Erstellen einer SVG-Datei.
struct SvgBuilder {
    content: String,
    point_radius: f64,
}

impl SvgBuilder {
    /// Erstellt ein neues SVG-Grundgerüst mit Header, Stil und
    /// Hintergrund; die viewBox liegt in Weltkoordinaten.
    fn new(min: (f64, f64), max: (f64, f64)) -> Self {
        let viewbox_width = max.0 - min.0;
        let viewbox_height = max.1 - min.1;
        let (viewbox_min_x, viewbox_min_y) = min;

        let stroke_w_thin = (viewbox_width + viewbox_height) / 2.0 * 0.002;
        let point_radius = (viewbox_width + viewbox_height) / 2.0 * 0.004;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{SVG_PIXEL_SIZE}" height="{SVG_PIXEL_SIZE}" viewBox="{viewbox_min_x:.6} {viewbox_min_y:.6} {viewbox_width:.6} {viewbox_height:.6}" xmlns="http://www.w3.org/2000/svg">
  <style>
    .background {{ fill: #f0f0f0; fill-opacity: 1.0; }}
    .cloud-point {{ fill: #aaccff; stroke: #0000cc; stroke-width: {stroke_w_thin:.6}; }}
  </style>
  <rect x="{viewbox_min_x:.6}" y="{viewbox_min_y:.6}" width="{viewbox_width:.6}" height="{viewbox_height:.6}" class="background" />
"#,
        );

        Self {
            content,
            point_radius,
        }
    }

    /// Zeichnet einen Punkt mit CSS-Klasse.
    fn draw_point(&mut self, x: f64, y: f64, class: &str) {
        self.content.push_str(&format!(
            r#"  <circle cx="{:.6}" cy="{:.6}" r="{:.6}" class="{}" />
"#,
            x, y, self.point_radius, class
        ));
    }

    /// Zeichnet einen Punkt mit expliziter Füllfarbe.
    fn draw_point_filled(&mut self, x: f64, y: f64, fill: &str) {
        self.content.push_str(&format!(
            r#"  <circle cx="{:.6}" cy="{:.6}" r="{:.6}" fill="{}" />
"#,
            x, y, self.point_radius, fill
        ));
    }

    /// Speichert die SVG-Datei und schließt die Tags.
    fn save(mut self, path: &Path) -> PrepResult<()> {
        self.content.push_str("</svg>\n");
        let mut file = std::fs::File::create(path)?;
        file.write_all(self.content.as_bytes())?;
        info!("Preview SVG written to '{}'.", path.display());
        Ok(())
    }
}

/// Projizierte Bounding Box mit Rand; `None` für leere Eingaben.
fn projected_bounds(points: &[(f64, f64)]) -> Option<((f64, f64), (f64, f64))> {
    if points.is_empty() {
        return None;
    }
    let mut min = (f64::MAX, f64::MAX);
    let mut max = (f64::MIN, f64::MIN);
    for (u, v) in points {
        min.0 = min.0.min(*u);
        min.1 = min.1.min(*v);
        max.0 = max.0.max(*u);
        max.1 = max.1.max(*v);
    }
    // 5% Rand; das Minimum fängt entartete (punktförmige) Wolken ab
    let padding = ((max.0 - min.0).max(max.1 - min.1)).max(1e-6) * 0.05;
    Some((
        (min.0 - padding, min.1 - padding),
        (max.0 + padding, max.1 + padding),
    ))
}

// SVG-y wächst nach unten, die Physik-Achse nach oben
fn flip_vertical(v: f64, min_v: f64, max_v: f64) -> f64 {
    (min_v + max_v) - v
}

/// Schreibt eine SVG-Vorschau der Punktwolke in der gewählten
/// Projektion.
pub fn preview_cloud<P: AsRef<Path>>(
    path: P,
    cloud: &PointCloud,
    projection: Projection,
) -> PrepResult<()> {
    let projected: Vec<(f64, f64)> = cloud.iter().map(|p| projection.project(p)).collect();
    let (min, max) = projected_bounds(&projected).ok_or(PrepError::InsufficientPoints {
        expected: 1,
        actual: 0,
    })?;

    let mut svg = SvgBuilder::new(min, max);
    for (u, v) in &projected {
        svg.draw_point(*u, flip_vertical(*v, min.1, max.1), "cloud-point");
    }
    svg.save(path.as_ref())
}

// Farbrampe blau -> rot über den normierten Wert t in [0, 1]
fn density_color(t: f64) -> String {
    let r = lerp(59.0, 180.0, t).round() as u8;
    let g = lerp(76.0, 4.0, t).round() as u8;
    let b = lerp(192.0, 38.0, t).round() as u8;
    format!("rgb({r},{g},{b})")
}

/// Schreibt eine SVG-Vorschau der Records, eingefärbt nach Dichte
/// (blau = niedrig, rot = hoch).
pub fn preview_records<P: AsRef<Path>>(
    path: P,
    records: &[ParticleRecord],
    projection: Projection,
) -> PrepResult<()> {
    let projected: Vec<(f64, f64)> = records
        .iter()
        .map(|r| projection.project(&r.position))
        .collect();
    let (min, max) = projected_bounds(&projected).ok_or(PrepError::InsufficientPoints {
        expected: 1,
        actual: 0,
    })?;

    let density_min = records.iter().map(|r| r.density).fold(f64::MAX, f64::min);
    let density_max = records.iter().map(|r| r.density).fold(f64::MIN, f64::max);
    let density_span = density_max - density_min;

    let mut svg = SvgBuilder::new(min, max);
    for (record, (u, v)) in records.iter().zip(&projected) {
        let t = if density_span > 0.0 {
            (record.density - density_min) / density_span
        } else {
            0.5
        };
        svg.draw_point_filled(*u, flip_vertical(*v, min.1, max.1), &density_color(t));
    }
    svg.save(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    #[test]
    fn test_projection_axes() {
        let point = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Projection::Xy.project(&point), (1.0, 2.0));
        assert_eq!(Projection::Xz.project(&point), (1.0, 3.0));
        assert_eq!(Projection::Yz.project(&point), (2.0, 3.0));
    }

    #[test]
    fn test_projected_bounds_include_padding() {
        let points = vec![(0.0, 0.0), (1.0, 2.0)];
        let (min, max) = projected_bounds(&points).unwrap();
        assert!(min.0 < 0.0 && min.1 < 0.0);
        assert!(max.0 > 1.0 && max.1 > 2.0);
        assert!(projected_bounds(&[]).is_none());
    }

    #[test]
    fn test_flip_vertical_mirrors_interval() {
        assert_eq!(flip_vertical(0.0, 0.0, 2.0), 2.0);
        assert_eq!(flip_vertical(2.0, 0.0, 2.0), 0.0);
        assert_eq!(flip_vertical(1.0, 0.0, 2.0), 1.0);
    }

    #[test]
    fn test_density_color_endpoints() {
        assert_eq!(density_color(0.0), "rgb(59,76,192)");
        assert_eq!(density_color(1.0), "rgb(180,4,38)");
    }

    #[test]
    fn test_preview_rejects_empty_cloud() {
        let result = preview_cloud("unused.svg", &PointCloud::new(), Projection::Xy);
        assert!(matches!(
            result,
            Err(PrepError::InsufficientPoints { actual: 0, .. })
        ));
    }
}
