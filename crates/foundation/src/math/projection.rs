use std::f64::consts::PI;

use super::{LatLng, ScreenPoint};
use crate::bounds::GeoBounds;

/// Side length of one map tile in pixels.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Latitude limit of the square Web-Mercator world.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Geographic to screen projection for one viewport.
///
/// Implementations are only valid for the zoom/pan they were built for.
pub trait Projector {
    fn project(&self, position: LatLng) -> ScreenPoint;
}

impl<F> Projector for F
where
    F: Fn(LatLng) -> ScreenPoint,
{
    fn project(&self, position: LatLng) -> ScreenPoint {
        self(position)
    }
}

/// Spherical Web-Mercator projection at an integer zoom level.
///
/// `origin_px` is the world-pixel position of the viewport's top-left corner,
/// so projected points are relative to the visible screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WebMercator {
    pub zoom: i32,
    pub origin_px: ScreenPoint,
}

impl WebMercator {
    pub fn new(zoom: i32) -> Self {
        Self {
            zoom,
            origin_px: ScreenPoint::new(0.0, 0.0),
        }
    }

    /// Projection for a `viewport_px` sized screen centered on `center`.
    pub fn centered(center: LatLng, zoom: i32, viewport_px: [f64; 2]) -> Self {
        let world = Self::new(zoom).world_px(center);
        Self {
            zoom,
            origin_px: ScreenPoint::new(
                world.x - viewport_px[0] * 0.5,
                world.y - viewport_px[1] * 0.5,
            ),
        }
    }

    pub fn world_size_px(&self) -> f64 {
        TILE_SIZE_PX * 2f64.powi(self.zoom)
    }

    /// Absolute world-pixel position, ignoring the viewport origin.
    pub fn world_px(&self, position: LatLng) -> ScreenPoint {
        let size = self.world_size_px();
        let lat = position.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
        let sin = lat.to_radians().sin();
        let x = (position.lng + 180.0) / 360.0 * size;
        let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size;
        ScreenPoint::new(x, y)
    }

    pub fn unproject(&self, screen: ScreenPoint) -> LatLng {
        let size = self.world_size_px();
        let world = screen + self.origin_px;
        let lng = world.x / size * 360.0 - 180.0;
        let n = PI - 2.0 * PI * world.y / size;
        let lat = n.sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    /// Geographic bounds covered by a `viewport_px` screen at this origin.
    pub fn visible_bounds(&self, viewport_px: [f64; 2]) -> GeoBounds {
        let nw = self.unproject(ScreenPoint::new(0.0, 0.0));
        let se = self.unproject(ScreenPoint::new(viewport_px[0], viewport_px[1]));
        GeoBounds::new(se.lat, nw.lat, nw.lng, se.lng)
    }
}

impl Projector for WebMercator {
    fn project(&self, position: LatLng) -> ScreenPoint {
        self.world_px(position) - self.origin_px
    }
}

#[cfg(test)]
mod tests {
    use super::{Projector, TILE_SIZE_PX, WebMercator};
    use crate::math::LatLng;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn zoom_zero_world_is_one_tile() {
        let m = WebMercator::new(0);
        let p = m.project(LatLng::new(0.0, 0.0));
        assert_close(p.x, TILE_SIZE_PX * 0.5, 1e-9);
        assert_close(p.y, TILE_SIZE_PX * 0.5, 1e-9);
    }

    #[test]
    fn each_zoom_doubles_pixel_distances() {
        let a = LatLng::new(42.36, -71.06);
        let b = LatLng::new(42.37, -71.11);
        let (z10, z11) = (WebMercator::new(10), WebMercator::new(11));
        let d10 = z10.project(a).distance(z10.project(b));
        let d11 = z11.project(a).distance(z11.project(b));
        assert_close(d11, d10 * 2.0, 1e-6);
    }

    #[test]
    fn centered_puts_center_mid_screen() {
        let center = LatLng::new(42.3655, -71.1018);
        let m = WebMercator::centered(center, 10, [800.0, 600.0]);
        let p = m.project(center);
        assert_close(p.x, 400.0, 1e-6);
        assert_close(p.y, 300.0, 1e-6);
    }

    #[test]
    fn unproject_inverts_project() {
        let m = WebMercator::centered(LatLng::new(42.0, -71.0), 12, [1024.0, 768.0]);
        let p = LatLng::new(42.05, -70.93);
        let back = m.unproject(m.project(p));
        assert_close(back.lat, p.lat, 1e-9);
        assert_close(back.lng, p.lng, 1e-9);
    }

    #[test]
    fn visible_bounds_contain_center() {
        let center = LatLng::new(42.3655, -71.1018);
        let m = WebMercator::centered(center, 10, [800.0, 600.0]);
        let b = m.visible_bounds([800.0, 600.0]);
        assert!(b.contains(center));
        assert!(b.min_lat < b.max_lat);
        assert!(b.min_lng < b.max_lng);
        assert_eq!(m.project(LatLng::new(b.max_lat, b.min_lng)).x.round(), 0.0);
    }
}
