use serde::{Deserialize, Serialize};

use crate::math::LatLng;

/// Geographic bounding box in degrees.
///
/// Containment is inclusive on every edge. No antimeridian wrapping: a box is
/// always `min_lng..=max_lng`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        GeoBounds {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Degenerate box covering exactly one point.
    pub fn from_point(p: LatLng) -> Self {
        Self::new(p.lat, p.lat, p.lng, p.lng)
    }

    /// Smallest box covering every point, or `None` for an empty slice.
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut b = Self::from_point(*first);
        for p in rest {
            b.extend(*p);
        }
        Some(b)
    }

    /// The whole Web-Mercator-renderable world.
    pub fn world() -> Self {
        Self::new(-90.0, 90.0, -180.0, 180.0)
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.min_lat
            && p.lat <= self.max_lat
            && p.lng >= self.min_lng
            && p.lng <= self.max_lng
    }

    pub fn extend(&mut self, p: LatLng) {
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lat = self.max_lat.max(p.lat);
        self.min_lng = self.min_lng.min(p.lng);
        self.max_lng = self.max_lng.max(p.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) * 0.5,
            (self.min_lng + self.max_lng) * 0.5,
        )
    }

    pub fn lat_span(&self) -> f64 {
        (self.max_lat - self.min_lat).abs()
    }

    pub fn lng_span(&self) -> f64 {
        (self.max_lng - self.min_lng).abs()
    }

    /// Grows each side by `ratio` times the span on that axis.
    ///
    /// A degenerate (single point) box stays degenerate.
    pub fn pad(&self, ratio: f64) -> Self {
        let dlat = self.lat_span() * ratio;
        let dlng = self.lng_span() * ratio;
        Self::new(
            self.min_lat - dlat,
            self.max_lat + dlat,
            self.min_lng - dlng,
            self.max_lng + dlng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::GeoBounds;
    use crate::math::LatLng;

    #[test]
    fn contains_is_inclusive() {
        let b = GeoBounds::new(42.0, 43.0, -72.0, -71.0);
        assert!(b.contains(LatLng::new(42.0, -72.0)));
        assert!(b.contains(LatLng::new(43.0, -71.0)));
        assert!(b.contains(LatLng::new(42.5, -71.5)));
        assert!(!b.contains(LatLng::new(43.0001, -71.5)));
        assert!(!b.contains(LatLng::new(42.5, -70.9)));
    }

    #[test]
    fn nan_is_never_contained() {
        let b = GeoBounds::world();
        assert!(!b.contains(LatLng::new(f64::NAN, 0.0)));
    }

    #[test]
    fn from_points_and_extend() {
        assert!(GeoBounds::from_points(&[]).is_none());
        let b = GeoBounds::from_points(&[
            LatLng::new(42.36, -71.05),
            LatLng::new(42.40, -71.12),
            LatLng::new(42.33, -71.02),
        ])
        .unwrap();
        assert_eq!(b, GeoBounds::new(42.33, 42.40, -71.12, -71.02));
    }

    #[test]
    fn pad_grows_each_side_by_span_fraction() {
        let b = GeoBounds::new(10.0, 20.0, 30.0, 50.0).pad(0.1);
        assert_eq!(b, GeoBounds::new(9.0, 21.0, 28.0, 52.0));
        let p = GeoBounds::from_point(LatLng::new(1.0, 2.0)).pad(0.1);
        assert_eq!(p, GeoBounds::from_point(LatLng::new(1.0, 2.0)));
    }

    #[test]
    fn center_is_midpoint() {
        let b = GeoBounds::new(10.0, 20.0, 30.0, 50.0);
        assert_eq!(b.center(), LatLng::new(15.0, 40.0));
    }
}
