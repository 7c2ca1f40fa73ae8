use std::sync::MutexGuard;

use super::error::ScenarioError;
use super::parser::Scenario;
use crate::config::RadarConfig;
use crate::radar::{shared_traffic, upsert, RadarError, RadarRenderer, SharedTraffic, Traffic};
use crate::ring::FrameSink;
use crate::sensors::Observation;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub ticks: usize,
    pub frames: usize,
    /// Ticks dropped because the traffic table was busy.
    pub aborted: usize,
    /// Ticks rendered without a position fix.
    pub no_fix: usize,
}

/// Drives a renderer through a recorded scenario, the way the device's
/// main loop would.
pub struct Replay {
    renderer: RadarRenderer,
    traffic: SharedTraffic,
}

impl Replay {
    pub fn new(config: RadarConfig) -> Self {
        Self {
            renderer: RadarRenderer::new(config),
            traffic: shared_traffic(Traffic::new()),
        }
    }

    pub fn renderer(&self) -> &RadarRenderer {
        &self.renderer
    }

    pub fn traffic(&self) -> &SharedTraffic {
        &self.traffic
    }

    pub fn run(
        &mut self,
        scenario: &Scenario,
        sink: &mut impl FrameSink,
        realtime: bool,
    ) -> Result<ReplaySummary, ScenarioError> {
        let mut summary = ReplaySummary::default();

        for (i, tick) in scenario.ticks.iter().enumerate() {
            summary.ticks += 1;

            {
                let mut table = lock_table(&self.traffic);
                for report in &tick.aircraft {
                    upsert(&mut table, report);
                }
                for id in &tick.remove {
                    table.remove(id);
                }
            }

            let obs = Observation::sample(tick);

            let result = if tick.busy {
                let _receiver = lock_table(&self.traffic);
                self.renderer.render_shared(&obs, &self.traffic, tick.flags)
            } else {
                self.renderer.render_shared(&obs, &self.traffic, tick.flags)
            };

            match result {
                Ok(rendered) => {
                    log::debug!(
                        "tick {}: layers [{}], {} aircraft drawn, {} hidden",
                        i,
                        rendered.report.layer_names(),
                        rendered.report.traffic_drawn,
                        rendered.report.traffic_hidden
                    );
                    if rendered.report.conditions.contains(&RadarError::NoFix) {
                        summary.no_fix += 1;
                    }
                    sink.show(&rendered.frame)?;
                    summary.frames += 1;
                }
                Err(e) => {
                    log::warn!("tick {}: {}, skipping update", i, e);
                    summary.aborted += 1;
                }
            }

            if realtime {
                if let Some(interval) = scenario.interval {
                    std::thread::sleep(interval);
                }
            }
        }

        log::info!(
            "replayed {} ticks: {} frames, {} aborted, {} without fix",
            summary.ticks,
            summary.frames,
            summary.aborted,
            summary.no_fix
        );

        Ok(summary)
    }
}

/// The replay thread is the only writer, so a poisoned table still holds
/// the last complete update.
fn lock_table(traffic: &SharedTraffic) -> MutexGuard<'_, Traffic> {
    traffic
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
