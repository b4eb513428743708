use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Line colour of the discoveries-per-year chart.
pub const YEAR_LINE: Color32 = Color32::from_rgb(0x00, 0xCC, 0x96);

/// Fill colour of the mass histogram.
pub const MASS_BARS: Color32 = Color32::from_rgb(0xAB, 0x63, 0xFA);

const LOW_HUE: f32 = 265.0;
const HIGH_HUE: f32 = 50.0;

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Count gradient: bar value → Color32
// ---------------------------------------------------------------------------

/// Continuous colour scale for the country ranking, purple for the smallest
/// count through to yellow for the largest.
#[derive(Debug, Clone, Copy)]
pub struct CountGradient {
    min: usize,
    max: usize,
}

impl CountGradient {
    pub fn new(counts: impl IntoIterator<Item = usize>) -> Self {
        let (min, max) = counts
            .into_iter()
            .fold((usize::MAX, 0), |(lo, hi), c| (lo.min(c), hi.max(c)));
        CountGradient {
            min: min.min(max),
            max,
        }
    }

    /// Position of `count` on the scale, in `[0, 1]`.
    pub fn position(&self, count: usize) -> f32 {
        if self.max <= self.min {
            return 1.0;
        }
        let clamped = count.clamp(self.min, self.max);
        (clamped - self.min) as f32 / (self.max - self.min) as f32
    }

    pub fn color_for(&self, count: usize) -> Color32 {
        let t = self.position(count);
        let hue = LOW_HUE + (HIGH_HUE + 360.0 - LOW_HUE) * t;
        let lightness = 0.40 + 0.20 * t;
        hsl_to_color32(Hsl::new(hue % 360.0, 0.80, lightness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_map_to_ends_of_scale() {
        let g = CountGradient::new([3, 10, 7]);
        assert_eq!(g.position(3), 0.0);
        assert_eq!(g.position(10), 1.0);
        assert!((g.position(7) - 4.0 / 7.0).abs() < 1e-6);
        assert_ne!(g.color_for(3), g.color_for(10));
    }

    #[test]
    fn single_value_sits_at_top() {
        let g = CountGradient::new([5]);
        assert_eq!(g.position(5), 1.0);
    }

    #[test]
    fn empty_scale_does_not_panic() {
        let g = CountGradient::new(std::iter::empty());
        assert_eq!(g.position(0), 1.0);
        let _ = g.color_for(0);
    }
}
