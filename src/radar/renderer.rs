use std::sync::TryLockError;

use chrono::Utc;
use strum_macros::Display;

use super::error::RadarError;
use super::types::{DisplayFlags, SharedTraffic, Traffic};
use crate::altitude::AltitudeTracker;
use crate::config::RadarConfig;
use crate::home::HomeTracker;
use crate::ring::{Color, Frame};
use crate::sensors::Observation;

const SELF_TEST_COLORS: [Color; 4] = [
    Color::red(),
    Color::green(),
    Color::blue(),
    Color::white(),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Layer {
    Altimeter,
    North,
    Home,
    Traffic,
}

/// What happened while rendering a tick, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    pub layers: Vec<Layer>,
    pub traffic_drawn: usize,
    pub traffic_hidden: usize,
    /// Non-fatal conditions hit this tick, in the order they occurred.
    pub conditions: Vec<RadarError>,
}

impl RenderReport {
    /// Lit layers as a comma separated list, e.g. `north,home,traffic`.
    pub fn layer_names(&self) -> String {
        self.layers
            .iter()
            .map(|layer| layer.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub frame: Frame,
    pub report: RenderReport,
}

/// One aircraft reduced to what drawing needs.
#[derive(Debug, Clone, Copy)]
struct Contact {
    bearing_deg: f64,
    distance_km: f64,
    altitude_ft: f64,
}

/// Turns sensor snapshots and traffic into ring frames.
///
/// Owns the state that has to survive between ticks: the altitude zero
/// point, the home location, and the self-test color cycle.
pub struct RadarRenderer {
    config: RadarConfig,
    altitude: AltitudeTracker,
    home: HomeTracker,
    test_cycle: usize,
}

impl RadarRenderer {
    pub fn new(config: RadarConfig) -> Self {
        Self {
            config,
            altitude: AltitudeTracker::new(),
            home: HomeTracker::new(),
            test_cycle: 0,
        }
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    pub fn altitude(&self) -> &AltitudeTracker {
        &self.altitude
    }

    pub fn home(&self) -> &HomeTracker {
        &self.home
    }

    /// Renders one tick. Later layers overwrite earlier ones, so the
    /// drawing order below is also the priority order.
    pub fn render(
        &mut self,
        obs: &Observation,
        traffic: &mut Traffic,
        flags: DisplayFlags,
    ) -> Rendered {
        let brightness = if flags.high_brightness {
            self.config.brightness.high
        } else {
            self.config.brightness.low
        };
        let mut frame = Frame::new(self.config.ring.size, brightness);
        let mut report = RenderReport::default();

        self.draw_altimeter(&mut frame, &mut report, obs, flags);

        if flags.show_north {
            let ring = self.config.geometry();
            frame.set(ring.pixel_for_bearing(obs.heading_deg), self.config.colors.north);
            report.layers.push(Layer::North);
        }

        self.draw_home(&mut frame, &mut report, obs, flags);
        self.draw_traffic(&mut frame, &mut report, obs, traffic, flags);

        Rendered { frame, report }
    }

    /// Renders against a table another thread may be writing to.
    ///
    /// If the table is busy the tick is dropped with `ConcurrentMutation`
    /// and no frame is produced. A table left poisoned by a panicked writer
    /// is taken over as it stands and the poison cleared, so later ticks
    /// render normally.
    pub fn render_shared(
        &mut self,
        obs: &Observation,
        traffic: &SharedTraffic,
        flags: DisplayFlags,
    ) -> Result<Rendered, RadarError> {
        let mut table = match traffic.try_lock() {
            Ok(table) => table,
            Err(TryLockError::WouldBlock) => return Err(RadarError::ConcurrentMutation),
            Err(TryLockError::Poisoned(poisoned)) => {
                log::warn!("traffic table writer panicked, recovering table");
                traffic.clear_poison();
                poisoned.into_inner()
            }
        };

        Ok(self.render(obs, &mut table, flags))
    }

    /// Fills the ring with the next color of the red, green, blue, white
    /// cycle at self-test brightness.
    pub fn self_test(&mut self) -> Frame {
        let color = SELF_TEST_COLORS[self.test_cycle % SELF_TEST_COLORS.len()];
        self.test_cycle = (self.test_cycle + 1) % SELF_TEST_COLORS.len();

        let mut frame = Frame::new(self.config.ring.size, self.config.brightness.self_test);
        frame.fill(color);
        frame
    }

    fn draw_altimeter(
        &mut self,
        frame: &mut Frame,
        report: &mut RenderReport,
        obs: &Observation,
        flags: DisplayFlags,
    ) {
        // calibrate from power-on even when the altimeter is not shown
        let relative = match self.altitude.update(obs.altitude_ft) {
            Ok(relative) => relative,
            Err(e) => {
                log::debug!("altimeter skipped: {}", e);
                return;
            }
        };

        let t = &self.config.thresholds;
        if flags.flight_mode && relative > t.altimeter_min_ft && relative < t.altimeter_max_ft {
            frame.fill_percent(
                self.config.colors.altimeter,
                relative / t.altimeter_max_ft,
                self.config.ring.top_offset,
            );
            report.layers.push(Layer::Altimeter);
        }
    }

    fn draw_home(
        &mut self,
        frame: &mut Frame,
        report: &mut RenderReport,
        obs: &Observation,
        flags: DisplayFlags,
    ) {
        let vector = match self.home.tick(flags.track_home, obs.position) {
            Some(home) => home.vector,
            None => return,
        };
        let Some(v) = vector else {
            return;
        };

        let ring = self.config.geometry();
        let (bearing, color) = if v.distance_km < self.config.thresholds.ignore_closer_than_km {
            // GPS is not much better than 5 m, so pin a nearby home due south
            (180.0, self.config.colors.home_near)
        } else {
            (v.bearing_deg, self.config.colors.home)
        };

        frame.set(
            ring.pixel_for_bearing((bearing + obs.heading_deg).rem_euclid(360.0)),
            color,
        );
        report.layers.push(Layer::Home);
    }

    fn draw_traffic(
        &self,
        frame: &mut Frame,
        report: &mut RenderReport,
        obs: &Observation,
        traffic: &mut Traffic,
        flags: DisplayFlags,
    ) {
        let me = match obs.position {
            Ok(me) => me,
            Err(e) => {
                log::warn!("error updating bearings: {}", e);
                report.conditions.push(e);
                return;
            }
        };

        let now = Utc::now();
        for object in traffic.values_mut() {
            object.update_vector(me, now);
        }

        // altitude unknown is drawn as if on the ground
        let mut contacts: Vec<Contact> = traffic
            .values()
            .filter_map(|object| {
                object.vector.map(|v| Contact {
                    bearing_deg: v.bearing_deg,
                    distance_km: v.distance_km,
                    altitude_ft: object.altitude_ft.unwrap_or(0.0),
                })
            })
            .collect();

        // furthest first so nearer aircraft end up on top
        contacts.sort_by(|a, b| b.distance_km.total_cmp(&a.distance_km));

        let ring = self.config.geometry();
        let ramp = self.config.ramp();
        for contact in &contacts {
            if !self.is_visible(contact, obs.altitude_ft, flags) {
                report.traffic_hidden += 1;
                continue;
            }

            let bearing = (contact.bearing_deg + obs.heading_deg).rem_euclid(360.0);
            frame.set(
                ring.pixel_for_bearing(bearing),
                ramp.color_for_distance(contact.distance_km),
            );
            report.traffic_drawn += 1;
        }

        if report.traffic_drawn > 0 {
            report.layers.push(Layer::Traffic);
        }
    }

    fn is_visible(&self, contact: &Contact, own_altitude_ft: Option<f64>, flags: DisplayFlags) -> bool {
        let t = &self.config.thresholds;

        if flags.flight_mode {
            if let Some(own) = own_altitude_ft {
                if (contact.altitude_ft - own).abs() > t.flight_vertical_sep_ft {
                    return false;
                }
            }
            if contact.distance_km > t.flight_horizontal_sep_km {
                return false;
            }
        }

        contact.distance_km <= t.squelch_km && contact.distance_km >= t.ignore_closer_than_km
    }
}
