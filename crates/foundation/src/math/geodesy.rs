use serde::{Deserialize, Serialize};

use super::{Projector, ScreenPoint};

/// Mean Earth radius used by the haversine formula (meters).
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// Geographic coordinate in degrees (WGS84 semantics).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Great-circle distance in meters (haversine).
///
/// NaN inputs produce NaN.
pub fn great_circle_distance(a: LatLng, b: LatLng) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let s_phi = (d_phi * 0.5).sin();
    let s_lambda = (d_lambda * 0.5).sin();
    let h = s_phi * s_phi + phi1.cos() * phi2.cos() * s_lambda * s_lambda;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_MEAN_RADIUS_M * c
}

/// Euclidean distance between the screen projections of `a` and `b`.
///
/// Only meaningful for the viewport `projector` was built for.
pub fn projected_pixel_distance<P>(projector: &P, a: LatLng, b: LatLng) -> f64
where
    P: Projector + ?Sized,
{
    let pa: ScreenPoint = projector.project(a);
    let pb: ScreenPoint = projector.project(b);
    pa.distance(pb)
}

#[cfg(test)]
mod tests {
    use super::{LatLng, great_circle_distance, projected_pixel_distance};
    use crate::math::ScreenPoint;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn zero_distance_for_same_point() {
        let p = LatLng::new(42.3601, -71.0589);
        assert_eq!(great_circle_distance(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = great_circle_distance(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
        assert_close(d, 111_194.93, 0.5);
    }

    #[test]
    fn short_city_distance() {
        // Boston Common to Downtown Crossing area, roughly 500 m.
        let a = LatLng::new(42.3601, -71.0589);
        let b = LatLng::new(42.3584, -71.0636);
        let d = great_circle_distance(a, b);
        assert!(d > 400.0 && d < 450.0, "got {d}");
    }

    #[test]
    fn long_distance_is_symmetric() {
        let boston = LatLng::new(42.3601, -71.0589);
        let london = LatLng::new(51.5074, -0.1278);
        let d1 = great_circle_distance(boston, london);
        let d2 = great_circle_distance(london, boston);
        assert_close(d1, d2, 1e-6);
        assert_close(d1, 5_265_000.0, 20_000.0);
    }

    #[test]
    fn nan_propagates() {
        let d = great_circle_distance(LatLng::new(f64::NAN, 0.0), LatLng::new(0.0, 0.0));
        assert!(d.is_nan());
    }

    #[test]
    fn pixel_distance_uses_projector() {
        let scale = |p: LatLng| ScreenPoint::new(p.lng * 10.0, p.lat * 10.0);
        let d = projected_pixel_distance(&scale, LatLng::new(0.0, 0.0), LatLng::new(3.0, 4.0));
        assert_close(d, 50.0, 1e-12);
    }

    #[test]
    fn validity_checks_ranges() {
        assert!(LatLng::new(42.0, -71.0).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, 181.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }
}
