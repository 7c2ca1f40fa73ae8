use crate::geo::GeoPoint;
use crate::radar::RadarError;

pub const FEET_PER_METRE: f64 = 3.281;

/// Read side of the compass, GPS and barometer.
///
/// Implementations return whatever they last measured; nothing here may
/// block waiting for a new sample.
pub trait Sensors {
    /// Compass azimuth, degrees in [0, 360).
    fn heading_deg(&self) -> f64;
    fn position(&self) -> Result<GeoPoint, RadarError>;
    fn barometric_altitude_ft(&self) -> Option<f64>;
    fn geometric_altitude_m(&self) -> Result<f64, RadarError>;
}

/// Everything the renderer needs from the sensors for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub heading_deg: f64,
    pub position: Result<GeoPoint, RadarError>,
    pub altitude_ft: Option<f64>,
}

impl Observation {
    pub fn new(heading_deg: f64, position: GeoPoint) -> Self {
        Self {
            heading_deg,
            position: Ok(position),
            altitude_ft: None,
        }
    }

    pub fn without_fix(heading_deg: f64) -> Self {
        Self {
            heading_deg,
            position: Err(RadarError::NoFix),
            altitude_ft: None,
        }
    }

    pub fn with_altitude(mut self, altitude_ft: f64) -> Self {
        self.altitude_ft = Some(altitude_ft);
        self
    }

    /// Reads every sensor once so that the whole tick sees the same values.
    pub fn sample(sensors: &impl Sensors) -> Self {
        Self {
            heading_deg: sensors.heading_deg(),
            position: sensors.position(),
            altitude_ft: altitude_ft(sensors),
        }
    }
}

/// Barometric altitude when the barometer has a reading, otherwise GPS
/// altitude converted to feet.
pub fn altitude_ft(sensors: &impl Sensors) -> Option<f64> {
    match sensors.barometric_altitude_ft() {
        Some(ft) if ft != 0.0 => Some(ft),
        _ => sensors
            .geometric_altitude_m()
            .ok()
            .map(|m| m * FEET_PER_METRE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        baro_ft: Option<f64>,
        gps_m: Result<f64, RadarError>,
        position: Result<GeoPoint, RadarError>,
    }

    impl Sensors for Fixed {
        fn heading_deg(&self) -> f64 {
            42.0
        }

        fn position(&self) -> Result<GeoPoint, RadarError> {
            self.position
        }

        fn barometric_altitude_ft(&self) -> Option<f64> {
            self.baro_ft
        }

        fn geometric_altitude_m(&self) -> Result<f64, RadarError> {
            self.gps_m
        }
    }

    #[test]
    fn barometer_preferred() {
        let s = Fixed {
            baro_ft: Some(1200.0),
            gps_m: Ok(100.0),
            position: Ok(GeoPoint::new(1.0, 2.0)),
        };
        let obs = Observation::sample(&s);

        assert_eq!(obs.heading_deg, 42.0);
        assert_eq!(obs.position, Ok(GeoPoint::new(1.0, 2.0)));
        assert_eq!(obs.altitude_ft, Some(1200.0));
    }

    #[test]
    fn falls_back_to_gps_in_feet() {
        let s = Fixed {
            baro_ft: None,
            gps_m: Ok(100.0),
            position: Err(RadarError::NoFix),
        };
        let alt = altitude_ft(&s).unwrap();
        assert!((alt - 328.1).abs() < 1e-9);

        // a barometer that has not started yet reads zero
        let s = Fixed {
            baro_ft: Some(0.0),
            ..s
        };
        assert!((altitude_ft(&s).unwrap() - 328.1).abs() < 1e-9);
    }

    #[test]
    fn no_altitude_at_all() {
        let s = Fixed {
            baro_ft: None,
            gps_m: Err(RadarError::NoFix),
            position: Err(RadarError::NoFix),
        };
        let obs = Observation::sample(&s);

        assert_eq!(obs.altitude_ft, None);
        assert_eq!(obs.position, Err(RadarError::NoFix));
    }
}
