use serde::{Deserialize, Serialize};

/// RGB color, written as `[r, g, b]` in config files and frame output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub const fn red() -> Self {
        Self::new(255, 0, 0)
    }

    pub const fn green() -> Self {
        Self::new(0, 255, 0)
    }

    pub const fn blue() -> Self {
        Self::new(0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub fn is_off(&self) -> bool {
        *self == Self::black()
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Blends from `near` at zero range to `far` at `warning_km`, then holds `far`.
///
/// Everything between the warning distance and the squelch shares one color.
pub fn color_for_distance(distance_km: f64, near: Color, far: Color, warning_km: f64) -> Color {
    let distance = distance_km.max(0.0);
    if distance > warning_km || warning_km <= 0.0 {
        return far;
    }

    let t = distance / warning_km;
    let blend = |n: u8, f: u8| (n as f64 * (1.0 - t) + f as f64 * t) as u8;

    Color::new(blend(near.r, far.r), blend(near.g, far.g), blend(near.b, far.b))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRamp {
    pub near: Color,
    pub far: Color,
    pub warning_km: f64,
}

impl ColorRamp {
    pub fn color_for_distance(&self, distance_km: f64) -> Color {
        color_for_distance(distance_km, self.near, self.far, self.warning_km)
    }
}
