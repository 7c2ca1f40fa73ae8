mod error;
mod renderer;
mod types;

pub use error::RadarError;
pub use renderer::{Layer, RadarRenderer, RenderReport, Rendered};
pub use types::{shared_traffic, upsert, DisplayFlags, SharedTraffic, TrackedObject, Traffic};
