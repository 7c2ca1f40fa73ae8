use serde::{Deserialize, Serialize};

/// Mean earth radius used by the haversine formula, km.
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// Points closer than this on both axes are treated as the same place.
const COINCIDENT_TOLERANCE_DEG: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GeoPoint {
    #[serde(alias = "lat")]
    pub latitude_deg: f64,
    #[serde(alias = "lon")]
    pub longitude_deg: f64,
}

impl GeoPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    fn coincides_with(&self, other: &GeoPoint) -> bool {
        (self.latitude_deg - other.latitude_deg).abs() <= COINCIDENT_TOLERANCE_DEG
            && (self.longitude_deg - other.longitude_deg).abs() <= COINCIDENT_TOLERANCE_DEG
    }
}

/// Bearing and distance from an observer to a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vector {
    pub bearing_deg: f64,
    pub distance_km: f64,
}

pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude_deg - a.latitude_deg).to_radians();
    let d_lon = (b.longitude_deg - a.longitude_deg).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (d_lon / 2.0).sin().powi(2);

    // rounding can push h a hair above 1 for antipodal points
    EARTH_RADIUS_KM * 2.0 * h.min(1.0).sqrt().asin()
}

/// Initial great-circle bearing from `origin` to `target`, in [0, 360).
pub fn bearing_deg(origin: GeoPoint, target: GeoPoint) -> f64 {
    if origin.coincides_with(&target) {
        return 180.0;
    }

    let d_lon = (target.longitude_deg - origin.longitude_deg).to_radians();
    let (lat1, lat2) = (origin.lat_rad(), target.lat_rad());

    let x = lat2.cos() * d_lon.sin();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let bearing = x.atan2(y).to_degrees().rem_euclid(360.0);
    // rem_euclid may return 360.0 for tiny negative inputs
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

pub fn vector(origin: GeoPoint, target: GeoPoint) -> Vector {
    if origin.coincides_with(&target) {
        return Vector {
            bearing_deg: 180.0,
            distance_km: 0.0,
        };
    }

    Vector {
        bearing_deg: bearing_deg(origin, target),
        distance_km: distance_km(origin, target),
    }
}
