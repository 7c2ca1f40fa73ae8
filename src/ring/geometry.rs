/// Maps a bearing to a pixel on a ring of `ring_size` lights.
///
/// `mount_offset_pixels` rotates the result to account for how the ring is
/// physically mounted: for the reference board this is 18 pixels (the ring
/// reads 180 degrees off magnetic north) plus 4.5 (pixel 0 sits at the
/// top-left of the board rather than top-centre).
pub fn pixel_for_bearing(bearing_deg: f64, ring_size: usize, mount_offset_pixels: f64) -> usize {
    if ring_size == 0 {
        return 0;
    }

    let n = ring_size as f64;
    let degrees_per_pixel = 360.0 / n;
    let uncorrected = n + bearing_deg / degrees_per_pixel;

    ((uncorrected + mount_offset_pixels).rem_euclid(n) as usize) % ring_size
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub ring_size: usize,
    pub mount_offset_pixels: f64,
    /// First pixel clockwise of top-dead-centre; progress fills start here.
    pub top_offset: usize,
}

impl RingGeometry {
    pub fn pixel_for_bearing(&self, bearing_deg: f64) -> usize {
        pixel_for_bearing(bearing_deg, self.ring_size, self.mount_offset_pixels)
    }

    pub fn degrees_per_pixel(&self) -> f64 {
        360.0 / self.ring_size as f64
    }
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            ring_size: 36,
            mount_offset_pixels: 18.0 + 4.5,
            top_offset: 5,
        }
    }
}
