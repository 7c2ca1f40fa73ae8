use std::time::Duration;

use serde::Deserialize;

use super::error::ScenarioError;
use crate::altitude::pressure_altitude_ft;
use crate::geo::GeoPoint;
use crate::radar::{DisplayFlags, RadarError, TrackedObject};
use crate::sensors::Sensors;

/// Everything the host saw during one tick.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tick {
    #[serde(default)]
    pub heading: f64,
    /// Missing means the GPS had no fix.
    #[serde(default)]
    pub position: Option<GeoPoint>,
    #[serde(default)]
    pub baro_altitude_ft: Option<f64>,
    /// Raw barometer reading, used when `baro_altitude_ft` is absent.
    #[serde(default)]
    pub pressure_hpa: Option<f64>,
    #[serde(default)]
    pub geometric_altitude_m: Option<f64>,
    #[serde(default)]
    pub flags: DisplayFlags,
    /// Receiver reports: new aircraft or updates to known ones.
    #[serde(default)]
    pub aircraft: Vec<TrackedObject>,
    /// Aircraft the receiver has stopped hearing.
    #[serde(default)]
    pub remove: Vec<String>,
    /// The receiver is holding the traffic table while this tick renders.
    #[serde(default)]
    pub busy: bool,
}

impl Sensors for Tick {
    fn heading_deg(&self) -> f64 {
        self.heading
    }

    fn position(&self) -> Result<GeoPoint, RadarError> {
        self.position.ok_or(RadarError::NoFix)
    }

    fn barometric_altitude_ft(&self) -> Option<f64> {
        self.baro_altitude_ft
            .or_else(|| self.pressure_hpa.map(pressure_altitude_ft))
    }

    fn geometric_altitude_m(&self) -> Result<f64, RadarError> {
        self.geometric_altitude_m.ok_or(RadarError::NoFix)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScenario {
    #[serde(default)]
    interval: Option<String>,
    ticks: Vec<Tick>,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    /// Wall-clock spacing between ticks when replaying in real time.
    pub interval: Option<Duration>,
    pub ticks: Vec<Tick>,
}

impl Scenario {
    pub fn from_file(path: &str) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self, ScenarioError> {
        let raw: RawScenario = serde_yaml::from_str(yaml)?;

        let interval = raw
            .interval
            .map(|s| {
                humantime::parse_duration(s.trim()).map_err(|_| ScenarioError::Interval(s.clone()))
            })
            .transpose()?;

        for (i, tick) in raw.ticks.iter().enumerate() {
            validate_tick(tick).map_err(|msg| ScenarioError::Tick(i, msg))?;
        }

        Ok(Scenario {
            interval,
            ticks: raw.ticks,
        })
    }
}

fn validate_tick(tick: &Tick) -> Result<(), String> {
    if !tick.heading.is_finite() {
        return Err("heading must be a number".into());
    }
    if let Some(p) = tick.position {
        if !(-90.0..=90.0).contains(&p.latitude_deg) {
            return Err(format!("latitude {} out of range", p.latitude_deg));
        }
        if !(-180.0..=180.0).contains(&p.longitude_deg) {
            return Err(format!("longitude {} out of range", p.longitude_deg));
        }
    }
    if let Some(p) = tick.pressure_hpa {
        if !p.is_finite() || p <= 0.0 {
            return Err(format!("pressure {} hPa is not physical", p));
        }
    }
    if tick.baro_altitude_ft.is_some_and(|ft| !ft.is_finite()) {
        return Err("baro_altitude_ft must be a number".into());
    }
    if tick.geometric_altitude_m.is_some_and(|m| !m.is_finite()) {
        return Err("geometric_altitude_m must be a number".into());
    }
    if tick.aircraft.iter().any(|a| a.id.trim().is_empty()) {
        return Err("aircraft id must not be empty".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
interval: 250ms
ticks:
  - heading: 10
    flags: {show_north: true}
  - heading: 12.5
    position: {lat: 51.47, lon: -0.45}
    pressure_hpa: 1003.25
    flags: {show_north: true, track_home: true}
    aircraft:
      - {id: "4ca2b1", lat: 51.50, lon: -0.40, altitude: 3200}
      - {id: "406a3f"}
  - heading: 15
    remove: ["406a3f"]
    busy: true
"#;

    #[test]
    fn parses_sample() {
        let scenario = Scenario::from_str(SAMPLE).unwrap();

        assert_eq!(scenario.interval, Some(Duration::from_millis(250)));
        assert_eq!(scenario.ticks.len(), 3);

        let first = &scenario.ticks[0];
        assert_eq!(first.position(), Err(RadarError::NoFix));
        assert!(first.flags.show_north);
        assert!(!first.flags.track_home);

        let second = &scenario.ticks[1];
        assert_eq!(second.position(), Ok(GeoPoint::new(51.47, -0.45)));
        assert_eq!(second.aircraft.len(), 2);
        assert_eq!(second.aircraft[1].position(), None);
        let baro = second.barometric_altitude_ft().unwrap();
        assert!((baro - 274.09).abs() < 0.01, "got {}", baro);

        assert!(scenario.ticks[2].busy);
        assert_eq!(scenario.ticks[2].remove, vec!["406a3f".to_string()]);
    }

    #[test]
    fn interval_is_optional() {
        let scenario = Scenario::from_str("ticks: []").unwrap();
        assert!(scenario.interval.is_none());
        assert!(scenario.ticks.is_empty());
    }

    #[test]
    fn bad_interval() {
        let err = Scenario::from_str("interval: soon\nticks: []").unwrap_err();
        assert!(matches!(err, ScenarioError::Interval(s) if s == "soon"));
    }

    #[test]
    fn bad_latitude_names_the_tick() {
        let yaml = "ticks:\n  - heading: 0\n  - position: {lat: 95.0, lon: 0.0}\n";
        let err = Scenario::from_str(yaml).unwrap_err();
        assert!(matches!(err, ScenarioError::Tick(1, _)));
    }

    #[test]
    fn non_finite_altitudes_rejected() {
        let yaml = "ticks:\n  - heading: 0\n  - baro_altitude_ft: .nan\n";
        let err = Scenario::from_str(yaml).unwrap_err();
        assert!(matches!(err, ScenarioError::Tick(1, _)));

        let yaml = "ticks:\n  - geometric_altitude_m: .inf\n";
        let err = Scenario::from_str(yaml).unwrap_err();
        assert!(matches!(err, ScenarioError::Tick(0, _)));

        let yaml = "ticks:\n  - pressure_hpa: .nan\n";
        let err = Scenario::from_str(yaml).unwrap_err();
        assert!(matches!(err, ScenarioError::Tick(0, _)));
    }

    #[test]
    fn unknown_field_rejected() {
        let err = Scenario::from_str("ticks:\n  - headng: 4\n").unwrap_err();
        assert!(matches!(err, ScenarioError::Yaml(_)));
    }
}
