pub mod headless;
pub mod report;
pub mod run;

pub use headless::*;
pub use report::*;
pub use run::*;

use foundation::math::LatLng;

/// Parses `"LAT,LNG"` in degrees.
pub fn parse_lat_lng(raw: &str) -> Result<LatLng, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {raw:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude {lng:?}: {e}"))?;
    let p = LatLng::new(lat, lng);
    if !p.is_valid() {
        return Err(format!("coordinate ({lat}, {lng}) out of range"));
    }
    Ok(p)
}
