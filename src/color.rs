use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed chart colours
// ---------------------------------------------------------------------------

pub const PRICE_COLOR: Color32 = Color32::from_rgb(135, 206, 235); // skyblue
pub const FREIGHT_COLOR: Color32 = Color32::from_rgb(250, 128, 114); // salmon
pub const DELIVERY_COLOR: Color32 = Color32::from_rgb(144, 238, 144); // lightgreen

// ---------------------------------------------------------------------------
// Sequential colour ramps for bar charts
// ---------------------------------------------------------------------------

/// Perceptual ramps sampled from ten anchor colours each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Viridis,
    Magma,
}

const VIRIDIS: [(u8, u8, u8); 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

const MAGMA: [(u8, u8, u8); 10] = [
    (0x00, 0x00, 0x04),
    (0x18, 0x0f, 0x3e),
    (0x45, 0x10, 0x77),
    (0x72, 0x1f, 0x81),
    (0x9f, 0x2f, 0x7f),
    (0xcd, 0x40, 0x71),
    (0xf1, 0x60, 0x5d),
    (0xfd, 0x95, 0x67),
    (0xfe, 0xca, 0x8d),
    (0xfc, 0xfd, 0xbf),
];

impl Ramp {
    fn anchors(self) -> &'static [(u8, u8, u8)] {
        match self {
            Ramp::Viridis => &VIRIDIS,
            Ramp::Magma => &MAGMA,
        }
    }

    /// Colour at position `t` in `[0, 1]`, interpolated in linear RGB.
    pub fn sample(self, t: f32) -> Color32 {
        let anchors = self.anchors();
        let scaled = t.clamp(0.0, 1.0) * (anchors.len() - 1) as f32;
        let lo = (scaled.floor() as usize).min(anchors.len() - 2);
        let frac = scaled - lo as f32;

        let to_linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
            Srgb::new(r, g, b).into_format::<f32>().into_linear()
        };
        let mixed = to_linear(anchors[lo]).mix(to_linear(anchors[lo + 1]), frac);
        let rgb: Srgb<u8> = Srgb::from_linear(mixed);
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// `n` colours spread along the ramp, leaving out both extremes.
    pub fn colors(self, n: usize) -> Vec<Color32> {
        (0..n)
            .map(|i| self.sample((i + 1) as f32 / (n + 1) as f32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color32, b: Color32) -> bool {
        let d = |x: u8, y: u8| (x as i16 - y as i16).abs() <= 1;
        d(a.r(), b.r()) && d(a.g(), b.g()) && d(a.b(), b.b())
    }

    #[test]
    fn ramp_endpoints_match_anchors() {
        assert!(close(Ramp::Viridis.sample(0.0), Color32::from_rgb(0x44, 0x01, 0x54)));
        assert!(close(Ramp::Viridis.sample(1.0), Color32::from_rgb(0xfd, 0xe7, 0x25)));
        assert!(close(Ramp::Magma.sample(0.0), Color32::from_rgb(0x00, 0x00, 0x04)));
    }

    #[test]
    fn colors_skip_extremes() {
        assert!(Ramp::Magma.colors(0).is_empty());
        let colors = Ramp::Viridis.colors(9);
        assert_eq!(colors.len(), 9);
        assert_ne!(colors[0], Ramp::Viridis.sample(0.0));
        assert_ne!(colors[8], Ramp::Viridis.sample(1.0));
    }
}
