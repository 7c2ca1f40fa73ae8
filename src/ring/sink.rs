use std::io::Write;

use thiserror::Error;

use super::color::Color;
use super::frame::Frame;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where finished frames go: a light-strip driver, a log, a test buffer.
pub trait FrameSink {
    fn show(&mut self, frame: &Frame) -> Result<(), SinkError>;
}

/// Writes each frame as a single JSON object followed by a newline.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn show(&mut self, frame: &Frame) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.out, frame)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Draws the ring as one line of characters, pixel 0 first.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TextSink<W> {
    fn show(&mut self, frame: &Frame) -> Result<(), SinkError> {
        let line: String = frame.pixels.iter().map(symbol).collect();
        writeln!(self.out, "[{}] {:.2}", line, frame.brightness)?;
        Ok(())
    }
}

fn symbol(c: &Color) -> char {
    if c.is_off() {
        return '.';
    }
    if c.r > 192 && c.g > 192 && c.b > 192 {
        return 'W';
    }

    let max = c.r.max(c.g).max(c.b);
    if c.r == max {
        'R'
    } else if c.g == max {
        'G'
    } else {
        'B'
    }
}
