use crate::geo::{self, GeoPoint, Vector};
use crate::radar::RadarError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeLocation {
    pub position: GeoPoint,
    /// Bearing and distance from the observer; `None` until the tick after
    /// home was latched.
    pub vector: Option<Vector>,
}

/// Remembers where home tracking was switched on.
#[derive(Debug, Default)]
pub struct HomeTracker {
    home: Option<HomeLocation>,
}

impl HomeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn home(&self) -> Option<&HomeLocation> {
        self.home.as_ref()
    }

    /// Advances the tracker by one tick.
    ///
    /// Returns the home location once it has been latched. The tick that
    /// latches it returns `None`. If the observer has no fix while home is
    /// set, the previous vector is kept.
    pub fn tick(
        &mut self,
        enabled: bool,
        observer: Result<GeoPoint, RadarError>,
    ) -> Option<&HomeLocation> {
        if !enabled {
            if self.home.take().is_some() {
                log::info!("home tracking disabled, home location cleared");
            }
            return None;
        }

        if self.home.is_none() {
            if let Ok(position) = observer {
                log::info!(
                    "home location set to {:.6}, {:.6}",
                    position.latitude_deg,
                    position.longitude_deg
                );
                self.home = Some(HomeLocation {
                    position,
                    vector: None,
                });
            }
            return None;
        }

        let home = self.home.as_mut()?;
        if let Ok(me) = observer {
            home.vector = Some(geo::vector(me, home.position));
        }
        Some(&*home)
    }
}
