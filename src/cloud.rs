use crate::Vec3;

/// Geordnete Menge von Punkten im R3.
///
/// Alle Verteilungs-Generatoren liefern ihre Punkte als `PointCloud`;
/// die Reihenfolge der Punkte bleibt bei allen Operationen erhalten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Vec3>,
}

impl PointCloud {
    /// Erstellt eine leere Punktwolke.
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt eine leere Punktwolke mit reservierter Kapazität.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Übernimmt einen fertigen Punkt-Vektor.
    pub fn from_points(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Vec3) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec3> {
        self.points.iter()
    }

    /// Verschiebt alle Punkte um `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for point in &mut self.points {
            *point += offset;
        }
    }

    /// Wie [`translate`](Self::translate), aber verkettbar.
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.translate(offset);
        self
    }

    /// Skaliert alle Punkte relativ zum Ursprung.
    pub fn scale(&mut self, factor: f64) {
        for point in &mut self.points {
            *point *= factor;
        }
    }

    /// Wie [`scale`](Self::scale), aber verkettbar.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.scale(factor);
        self
    }

    /// Hängt die Punkte von `other` hinten an.
    pub fn merge(&mut self, other: PointCloud) {
        self.points.extend(other.points);
    }

    /// Vereinigt mehrere Wolken in Eingabereihenfolge.
    pub fn union<I>(clouds: I) -> Self
    where
        I: IntoIterator<Item = PointCloud>,
    {
        let mut result = PointCloud::new();
        for cloud in clouds {
            result.merge(cloud);
        }
        result
    }

    /// Behält nur Punkte, für die das Prädikat `true` liefert.
    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&Vec3) -> bool,
    {
        self.points.retain(predicate);
    }

    /// Teilt die Wolke in (erfüllt Prädikat, Rest).
    pub fn partition<F>(self, predicate: F) -> (Self, Self)
    where
        F: FnMut(&Vec3) -> bool,
    {
        let (matching, rest): (Vec<Vec3>, Vec<Vec3>) = self.points.into_iter().partition(predicate);
        (Self { points: matching }, Self { points: rest })
    }

    /// Arithmetisches Mittel aller Punkte, `None` für leere Wolken.
    pub fn centroid(&self) -> Option<Vec3> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Vec3::zeros(), |acc, point| acc + point);
        Some(sum / self.points.len() as f64)
    }
}

impl FromIterator<Vec3> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PointCloud {
    type Item = Vec3;
    type IntoIter = std::vec::IntoIter<Vec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Vec3;
    type IntoIter = std::slice::Iter<'a, Vec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::comparison::nearly_equal;

    fn sample_cloud() -> PointCloud {
        PointCloud::from_points(vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
        ])
    }

    #[test]
    fn test_translate_shifts_every_point() {
        let cloud = sample_cloud().translated(Vec3::new(1.0, -1.0, 0.5));
        assert_eq!(cloud.points()[0], Vec3::new(2.0, -1.0, 0.5));
        assert_eq!(cloud.points()[2], Vec3::new(1.0, -1.0, 3.5));
    }

    #[test]
    fn test_scale_is_relative_to_origin() {
        let cloud = sample_cloud().scaled(2.0);
        assert_eq!(cloud.points()[1], Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut left = sample_cloud();
        let right = PointCloud::from_points(vec![Vec3::new(9.0, 9.0, 9.0)]);
        left.merge(right);
        assert_eq!(left.len(), 4);
        assert_eq!(left.points()[3], Vec3::new(9.0, 9.0, 9.0));
    }

    #[test]
    fn test_union_concatenates_in_input_order() {
        let union = PointCloud::union(vec![sample_cloud(), sample_cloud()]);
        assert_eq!(union.len(), 6);
        assert_eq!(union.points()[0], union.points()[3]);
    }

    #[test]
    fn test_partition_splits_by_predicate() {
        let (near, far) = sample_cloud().partition(|p| p.norm() < 2.5);
        assert_eq!(near.len(), 2);
        assert_eq!(far.len(), 1);
        assert_eq!(far.points()[0], Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_centroid() {
        let centroid = sample_cloud().centroid().unwrap();
        assert!(nearly_equal(centroid.x, 1.0 / 3.0));
        assert!(nearly_equal(centroid.y, 2.0 / 3.0));
        assert!(nearly_equal(centroid.z, 1.0));
        assert!(PointCloud::new().centroid().is_none());
    }
}
