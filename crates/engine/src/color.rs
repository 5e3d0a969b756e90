// ABOUTME: Color value types and raw RGB<->HSL conversion math.
// ABOUTME: Provides Rgb, Hsl, channel-list parsing, and CSS color string formatting.

//! Color value types and conversions.
//!
//! Single-letter channel names (r, g, b, h, s, l) are the convention in color
//! math and are kept here to stay comparable with reference formulas.

/// An RGB color with rounded integer channels in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Channels as floats, in the order expected by [`css_color`].
    pub fn channels(&self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }
}

/// An HSL color with all three components in [0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Converts RGB channels (each in [0, 255]) to HSL.
///
/// Lightness is (max+min)/2; the achromatic case (max == min) yields h = s = 0.
/// Uncached variant; passes go through [`ColorCache`](crate::ColorCache).
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // achromatic
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl { h: h / 6.0, s, l }
}

/// Converts HSL (each component in [0, 1)) to RGB with channels rounded to the
/// nearest integer in [0, 255]. The achromatic case (s == 0) yields
/// r = g = b = round(l * 255).
/// Uncached variant; passes go through [`ColorCache`](crate::ColorCache).
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let (r, g, b) = if s == 0.0 {
        // achromatic
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    Rgb {
        r: (r * 255.0).round() as u8,
        g: (g * 255.0).round() as u8,
        b: (b * 255.0).round() as u8,
    }
}

/// The standard two-interval hue blend used by the HSL->RGB conversion.
fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Splits a raw parenthesized channel list into floats.
///
/// Each comma-separated entry that fails to parse becomes NaN, matching the
/// "garbage in, garbage out" contract of color parsing: callers must pre-filter
/// input with an `rgb` prefix check.
pub(crate) fn parse_channels(inner: &str) -> Vec<f64> {
    inner
        .split(',')
        .map(|chunk| chunk.trim().parse::<f64>().unwrap_or(f64::NAN))
        .collect()
}

/// Extracts the substring between the parentheses of a functional color string.
///
/// `"rgb(1, 2, 3)"` yields `"1, 2, 3"`. Without an opening parenthesis the
/// whole string minus a trailing `)` is returned, which downstream parsing
/// turns into NaN channels.
pub(crate) fn paren_contents(color: &str) -> &str {
    let after_paren = match color.find('(') {
        Some(pos) => &color[pos + 1..],
        None => color,
    };
    after_paren.strip_suffix(')').unwrap_or(after_paren)
}

/// Formats RGB channels as a CSS `rgb(...)` or `rgba(...)` string.
///
/// Channels are joined without spaces; whole numbers print without a decimal
/// point, so `rgb(10,10,10)` round-trips exactly.
pub(crate) fn css_color(channels: &[f64], alpha: Option<f64>) -> String {
    let joined = channels
        .iter()
        .take(3)
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",");
    match alpha {
        Some(a) => format!("rgba({},{})", joined, a),
        None => format!("rgb({})", joined),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_hsl_achromatic() {
        let hsl = rgb_to_hsl(128.0, 128.0, 128.0);
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_to_hsl_primaries() {
        let red = rgb_to_hsl(255.0, 0.0, 0.0);
        assert!((red.h - 0.0).abs() < 1e-9);
        assert!((red.s - 1.0).abs() < 1e-9);
        assert!((red.l - 0.5).abs() < 1e-9);

        let green = rgb_to_hsl(0.0, 255.0, 0.0);
        assert!((green.h - 1.0 / 3.0).abs() < 1e-9);

        let blue = rgb_to_hsl(0.0, 0.0, 255.0);
        assert!((blue.h - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_hsl_to_rgb_achromatic() {
        let rgb = hsl_to_rgb(0.0, 0.0, 0.5);
        assert_eq!(rgb, Rgb { r: 128, g: 128, b: 128 });
    }

    #[test]
    fn test_hsl_to_rgb_red() {
        let rgb = hsl_to_rgb(0.0, 1.0, 0.5);
        assert_eq!(rgb, Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn test_parse_channels_floats() {
        assert_eq!(parse_channels("10, 20, 30"), vec![10.0, 20.0, 30.0]);
        assert_eq!(
            parse_channels("255,255,255,0.5"),
            vec![255.0, 255.0, 255.0, 0.5]
        );
    }

    #[test]
    fn test_parse_channels_garbage_is_nan() {
        let parsed = parse_channels("#888888");
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].is_nan());
    }

    #[test]
    fn test_paren_contents() {
        assert_eq!(paren_contents("rgb(1, 2, 3)"), "1, 2, 3");
        assert_eq!(paren_contents("rgba(1,2,3,0.5)"), "1,2,3,0.5");
        assert_eq!(paren_contents("#888888"), "#888888");
        assert_eq!(paren_contents(""), "");
    }

    #[test]
    fn test_css_color_formatting() {
        assert_eq!(css_color(&[10.0, 20.0, 30.0], None), "rgb(10,20,30)");
        assert_eq!(
            css_color(&[10.0, 20.0, 30.0], Some(0.5)),
            "rgba(10,20,30,0.5)"
        );
        // Whole-number alpha prints without a decimal point, like the source.
        assert_eq!(css_color(&[0.0, 0.0, 0.0], Some(1.0)), "rgba(0,0,0,1)");
    }
}
