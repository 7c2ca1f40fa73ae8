//! Bearing and distance of nearby aircraft and a home point, drawn on a
//! ring of addressable lights.
//!
//! The core is [`radar::RadarRenderer`]: feed it one [`sensors::Observation`],
//! the current [`radar::Traffic`] table and the [`radar::DisplayFlags`] for
//! the tick, and it returns a [`ring::Frame`] for the light strip.

pub mod altitude;
pub mod config;
pub mod geo;
pub mod home;
pub mod radar;
pub mod ring;
pub mod scenario;
pub mod sensors;
