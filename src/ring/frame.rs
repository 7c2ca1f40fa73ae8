use serde::Serialize;

use super::color::Color;

/// One rendered picture of the ring. Pixels left black are off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub ring_size: usize,
    pub brightness: f64,
    pub pixels: Vec<Color>,
}

impl Frame {
    pub fn new(ring_size: usize, brightness: f64) -> Self {
        Self {
            ring_size,
            brightness,
            pixels: vec![Color::black(); ring_size],
        }
    }

    /// Writes `color` at `index`, replacing whatever was there.
    pub fn set(&mut self, index: usize, color: Color) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.pixels.get(index).copied()
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn clear(&mut self) {
        self.fill(Color::black());
    }

    /// Lights `floor(ring_size * value)` consecutive pixels from `start`,
    /// wrapping round the ring. `value` is clamped to [0, 1].
    pub fn fill_percent(&mut self, color: Color, value: f64, start: usize) {
        if self.ring_size == 0 {
            return;
        }

        let value = value.clamp(0.0, 1.0);
        let count = (self.ring_size as f64 * value) as usize;
        for i in 0..count {
            self.set((i + start) % self.ring_size, color);
        }
    }

    /// Pixels that are on, in index order.
    pub fn lit(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_off())
            .map(|(i, c)| (i, *c))
    }

    pub fn lit_count(&self) -> usize {
        self.lit().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_dark() {
        let frame = Frame::new(36, 0.6);
        assert_eq!(frame.pixels.len(), 36);
        assert_eq!(frame.lit_count(), 0);
    }

    #[test]
    fn later_writes_win() {
        let mut frame = Frame::new(12, 1.0);
        frame.set(3, Color::blue());
        frame.set(3, Color::red());
        assert_eq!(frame.get(3), Some(Color::red()));
        assert_eq!(frame.lit_count(), 1);
    }

    #[test]
    fn out_of_range_write_is_ignored() {
        let mut frame = Frame::new(12, 1.0);
        frame.set(12, Color::red());
        assert_eq!(frame.lit_count(), 0);
    }

    #[test]
    fn fill_percent_wraps_from_start() {
        let mut frame = Frame::new(10, 1.0);
        frame.fill_percent(Color::green(), 0.5, 8);

        let lit: Vec<usize> = frame.lit().map(|(i, _)| i).collect();
        assert_eq!(lit, vec![0, 1, 2, 8, 9]);
    }

    #[test]
    fn fill_percent_clamps() {
        let mut frame = Frame::new(10, 1.0);
        frame.fill_percent(Color::green(), 3.0, 0);
        assert_eq!(frame.lit_count(), 10);

        frame.clear();
        frame.fill_percent(Color::green(), -1.0, 0);
        assert_eq!(frame.lit_count(), 0);
    }
}
