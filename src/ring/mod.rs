mod color;
mod frame;
mod geometry;
mod sink;

pub use color::{color_for_distance, Color, ColorRamp};
pub use frame::Frame;
pub use geometry::{pixel_for_bearing, RingGeometry};
pub use sink::{FrameSink, JsonLinesSink, SinkError, TextSink};
