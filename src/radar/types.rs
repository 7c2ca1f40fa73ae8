use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::{self, GeoPoint, Vector};

/// Per-tick display switches. Hosts re-read these on every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayFlags {
    pub flight_mode: bool,
    pub track_home: bool,
    pub show_north: bool,
    pub high_brightness: bool,
}

/// An aircraft as reported by the receiver, annotated with the last
/// bearing and distance from the observer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TrackedObject {
    pub id: String,
    #[serde(default, alias = "lat")]
    pub latitude_deg: Option<f64>,
    #[serde(default, alias = "lon")]
    pub longitude_deg: Option<f64>,
    #[serde(default, alias = "altitude")]
    pub altitude_ft: Option<f64>,
    #[serde(skip_deserializing)]
    pub vector: Option<Vector>,
    #[serde(skip_deserializing)]
    pub bearing_updated_at: Option<DateTime<Utc>>,
}

impl TrackedObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, latitude_deg: f64, longitude_deg: f64) -> Self {
        self.latitude_deg = Some(latitude_deg);
        self.longitude_deg = Some(longitude_deg);
        self
    }

    pub fn with_altitude(mut self, altitude_ft: f64) -> Self {
        self.altitude_ft = Some(altitude_ft);
        self
    }

    pub fn position(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.latitude_deg?, self.longitude_deg?))
    }

    pub fn bearing_deg(&self) -> Option<f64> {
        self.vector.map(|v| v.bearing_deg)
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.vector.map(|v| v.distance_km)
    }

    /// Recomputes the vector from `observer`. Objects without a position are
    /// left untouched and keep whatever they had before.
    pub fn update_vector(&mut self, observer: GeoPoint, now: DateTime<Utc>) -> Option<Vector> {
        let target = self.position()?;
        let v = geo::vector(observer, target);
        self.vector = Some(v);
        self.bearing_updated_at = Some(now);
        Some(v)
    }

    /// Takes fresh receiver data for this object, keeping derived fields.
    pub fn merge_report(&mut self, report: &TrackedObject) {
        if report.latitude_deg.is_some() && report.longitude_deg.is_some() {
            self.latitude_deg = report.latitude_deg;
            self.longitude_deg = report.longitude_deg;
        }
        if report.altitude_ft.is_some() {
            self.altitude_ft = report.altitude_ft;
        }
    }
}

/// Tracked objects keyed by id.
pub type Traffic = BTreeMap<String, TrackedObject>;

/// Traffic table shared with a receiver thread.
pub type SharedTraffic = Arc<Mutex<Traffic>>;

pub fn shared_traffic(traffic: Traffic) -> SharedTraffic {
    Arc::new(Mutex::new(traffic))
}

/// Inserts or refreshes an object in the table.
pub fn upsert(traffic: &mut Traffic, report: &TrackedObject) {
    traffic
        .entry(report.id.clone())
        .and_modify(|existing| existing.merge_report(report))
        .or_insert_with(|| report.clone());
}
