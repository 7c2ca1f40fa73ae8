use crate::radar::RadarError;

/// ICAO standard sea level pressure, hPa.
const STANDARD_PRESSURE_HPA: f64 = 1013.25;

/// Standard-atmosphere pressure altitude in feet.
///
/// This is height relative to 1013.25 hPa at 15 degrees C, not height
/// above ground.
pub fn pressure_altitude_ft(pressure_hpa: f64) -> f64 {
    145366.45 * (1.0 - (pressure_hpa / STANDARD_PRESSURE_HPA).powf(0.190284))
}

/// Reports altitude relative to the first usable reading.
#[derive(Debug, Default)]
pub struct AltitudeTracker {
    reference: Option<f64>,
}

impl AltitudeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference(&self) -> Option<f64> {
        self.reference
    }

    pub fn is_calibrated(&self) -> bool {
        self.reference.is_some()
    }

    /// Feeds one reading in feet and returns height above the reference.
    ///
    /// A reading of exactly zero before calibration means the altimeter has
    /// not started yet; it is rejected rather than latched. NaN and infinite
    /// readings count as no reading at all.
    pub fn update(&mut self, current_ft: Option<f64>) -> Result<f64, RadarError> {
        let current = current_ft
            .filter(|ft| ft.is_finite())
            .ok_or(RadarError::NoReading)?;

        match self.reference {
            Some(reference) => Ok(current - reference),
            None if current == 0.0 => Err(RadarError::NotCalibrated),
            None => {
                log::info!("altitude reference set to {:.0} ft", current);
                self.reference = Some(current);
                Ok(0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_reading_becomes_zero() {
        let mut tracker = AltitudeTracker::new();

        assert_eq!(tracker.update(Some(100.0)), Ok(0.0));
        assert_eq!(tracker.update(Some(150.0)), Ok(50.0));
        assert_eq!(tracker.update(Some(40.0)), Ok(-60.0));
        assert_eq!(tracker.reference(), Some(100.0));
    }

    #[test]
    fn zero_before_calibration_is_rejected() {
        let mut tracker = AltitudeTracker::new();

        assert_eq!(tracker.update(Some(0.0)), Err(RadarError::NotCalibrated));
        assert!(!tracker.is_calibrated());

        assert_eq!(tracker.update(Some(320.0)), Ok(0.0));
        // zero is a real reading once calibrated
        assert_eq!(tracker.update(Some(0.0)), Ok(-320.0));
    }

    #[test]
    fn missing_reading_does_not_disturb_reference() {
        let mut tracker = AltitudeTracker::new();

        assert_eq!(tracker.update(None), Err(RadarError::NoReading));
        assert_eq!(tracker.update(Some(75.0)), Ok(0.0));
        assert_eq!(tracker.update(None), Err(RadarError::NoReading));
        assert_eq!(tracker.update(Some(80.0)), Ok(5.0));
    }

    #[test]
    fn garbage_reading_is_not_latched() {
        let mut tracker = AltitudeTracker::new();

        assert_eq!(tracker.update(Some(f64::NAN)), Err(RadarError::NoReading));
        assert_eq!(tracker.update(Some(f64::INFINITY)), Err(RadarError::NoReading));
        assert!(!tracker.is_calibrated());

        assert_eq!(tracker.update(Some(600.0)), Ok(0.0));
        assert_eq!(tracker.update(Some(f64::NEG_INFINITY)), Err(RadarError::NoReading));
        assert_eq!(tracker.update(Some(650.0)), Ok(50.0));
    }

    #[test]
    fn standard_pressure_is_sea_level() {
        assert!(pressure_altitude_ft(1013.25).abs() < 1e-9);
        // roughly 27 ft per hPa near sea level
        let alt = pressure_altitude_ft(1003.25);
        assert!(alt > 270.0 && alt < 285.0, "got {}", alt);
        assert!(pressure_altitude_ft(1020.0) < 0.0);
    }
}
