//! Color scales for SST rendering.

use crate::error::{RenderError, Result};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// CSS `lightgray`, the plot background behind missing cells.
    pub fn light_gray() -> Self {
        Self::rgb(211, 211, 211)
    }

    /// CSS color string: `rgb(r,g,b)` when opaque, `rgba(..)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| ((a as f32 * t_inv) + (b as f32 * t)).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// A color at a normalized position in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub position: f32,
    pub color: Color,
}

/// Piecewise-linear color scale over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<ColorStop>,
}

impl ColorScale {
    /// Build a scale from stops sorted by position, first at 0 and last at 1.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(RenderError::InvalidColorScale(
                "a color scale needs at least two stops".to_string(),
            ));
        }
        if stops[0].position != 0.0 || stops[stops.len() - 1].position != 1.0 {
            return Err(RenderError::InvalidColorScale(
                "color stops must start at 0 and end at 1".to_string(),
            ));
        }
        if stops.windows(2).any(|w| w[0].position > w[1].position) {
            return Err(RenderError::InvalidColorScale(
                "color stop positions must be ascending".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    /// Spread `colors` evenly over `[0, 1]`.
    pub fn evenly_spaced(colors: &[Color]) -> Result<Self> {
        let last = colors.len().saturating_sub(1).max(1) as f32;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| ColorStop {
                position: i as f32 / last,
                color,
            })
            .collect();
        Self::new(stops)
    }

    /// ColorBrewer RdBu reversed: dark blue for cold, dark red for warm.
    pub fn rdbu_r() -> Self {
        const RDBU_R: [(u8, u8, u8); 11] = [
            (5, 48, 97),
            (33, 102, 172),
            (67, 147, 195),
            (146, 197, 222),
            (209, 229, 240),
            (247, 247, 247),
            (253, 219, 199),
            (244, 165, 130),
            (214, 96, 77),
            (178, 24, 43),
            (103, 0, 31),
        ];
        let last = (RDBU_R.len() - 1) as f32;
        Self {
            stops: RDBU_R
                .iter()
                .enumerate()
                .map(|(i, &(r, g, b))| ColorStop {
                    position: i as f32 / last,
                    color: Color::rgb(r, g, b),
                })
                .collect(),
        }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at normalized position `t` (clamped to `[0, 1]`).
    pub fn color_at(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.position {
                let span = hi.position - lo.position;
                if span <= 0.0 {
                    return hi.color;
                }
                return interpolate_color(lo.color, hi.color, (t - lo.position) / span);
            }
        }
        self.stops[self.stops.len() - 1].color
    }

    /// 256-entry lookup table indexed by byte code.
    ///
    /// Entry `k < 255` is the color at `k / 254`; entry 255 is `nodata`.
    pub fn palette(&self, nodata: Color) -> Vec<Color> {
        let mut palette: Vec<Color> = (0..255u16)
            .map(|k| self.color_at(k as f32 / 254.0))
            .collect();
        palette.push(nodata);
        palette
    }

    /// CSS `linear-gradient` running from the first stop to the last.
    ///
    /// `direction` is a CSS side keyword such as `to top` or `to right`.
    pub fn css_gradient(&self, direction: &str) -> String {
        let stops: Vec<String> = self
            .stops
            .iter()
            .map(|s| format!("{} {:.1}%", s.color.to_css(), s.position * 100.0))
            .collect();
        format!("linear-gradient({}, {})", direction, stops.join(", "))
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::rdbu_r()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdbu_r_endpoints() {
        let scale = ColorScale::rdbu_r();
        assert_eq!(scale.color_at(0.0), Color::rgb(5, 48, 97));
        assert_eq!(scale.color_at(0.5), Color::rgb(247, 247, 247));
        assert_eq!(scale.color_at(1.0), Color::rgb(103, 0, 31));
        assert_eq!(scale.color_at(-1.0), scale.color_at(0.0));
        assert_eq!(scale.color_at(2.0), scale.color_at(1.0));
    }

    #[test]
    fn test_interpolate_midpoint() {
        let c = interpolate_color(Color::rgb(0, 0, 0), Color::rgb(255, 100, 10), 0.5);
        assert_eq!(c, Color::rgb(128, 50, 5));
    }

    #[test]
    fn test_palette_layout() {
        let scale = ColorScale::rdbu_r();
        let palette = scale.palette(Color::light_gray());
        assert_eq!(palette.len(), 256);
        assert_eq!(palette[0], Color::rgb(5, 48, 97));
        assert_eq!(palette[254], Color::rgb(103, 0, 31));
        assert_eq!(palette[255], Color::light_gray());
    }

    #[test]
    fn test_css() {
        assert_eq!(Color::rgb(1, 2, 3).to_css(), "rgb(1,2,3)");
        assert_eq!(Color::transparent().to_css(), "rgba(0,0,0,0.000)");

        let scale = ColorScale::evenly_spaced(&[Color::rgb(0, 0, 255), Color::rgb(255, 0, 0)]).unwrap();
        assert_eq!(
            scale.css_gradient("to top"),
            "linear-gradient(to top, rgb(0,0,255) 0.0%, rgb(255,0,0) 100.0%)"
        );
    }

    #[test]
    fn test_invalid_scales() {
        assert!(ColorScale::evenly_spaced(&[Color::rgb(0, 0, 0)]).is_err());
        let unordered = vec![
            ColorStop { position: 0.0, color: Color::rgb(0, 0, 0) },
            ColorStop { position: 0.8, color: Color::rgb(1, 1, 1) },
            ColorStop { position: 0.5, color: Color::rgb(2, 2, 2) },
            ColorStop { position: 1.0, color: Color::rgb(3, 3, 3) },
        ];
        assert!(ColorScale::new(unordered).is_err());
    }
}
