// ABOUTME: Memoized color conversion component backing the shading pass.
// ABOUTME: Owns three maps: (r,g,b)->Hsl, (h,s,l)->Rgb, raw channel string->parsed floats.

//! Memoized color conversions.
//!
//! Conversions are pure functions of their inputs, so entries are written once
//! and never invalidated. The cache is an owned component rather than global
//! state: callers hold one for the lifetime of a page session and every result
//! leaves the cache by copy, so nothing a caller does can corrupt an entry.

use std::collections::HashMap;

use crate::color::{self, Hsl, Rgb};

/// Exact-input key for a float triple. NaN inputs key on their bit pattern
/// like any other value.
type FloatKey = [u64; 3];

fn float_key(a: f64, b: f64, c: f64) -> FloatKey {
    [a.to_bits(), b.to_bits(), c.to_bits()]
}

/// Memoization component for the three color conversions of a shading pass.
#[derive(Debug, Default)]
pub struct ColorCache {
    rgb_to_hsl: HashMap<FloatKey, Hsl>,
    hsl_to_rgb: HashMap<FloatKey, Rgb>,
    parsed: HashMap<String, Vec<f64>>,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts RGB channels (each in [0, 255]) to HSL, memoized by the exact
    /// input triple.
    pub fn rgb_to_hsl(&mut self, r: f64, g: f64, b: f64) -> Hsl {
        *self
            .rgb_to_hsl
            .entry(float_key(r, g, b))
            .or_insert_with(|| color::rgb_to_hsl(r, g, b))
    }

    /// Converts HSL (each component in [0, 1)) to RGB, memoized by the exact
    /// input triple.
    pub fn hsl_to_rgb(&mut self, h: f64, s: f64, l: f64) -> Rgb {
        *self
            .hsl_to_rgb
            .entry(float_key(h, s, l))
            .or_insert_with(|| color::hsl_to_rgb(h, s, l))
    }

    /// Parses a functional color string of the `rgb(...)`/`rgba(...)` family
    /// into its channel list.
    ///
    /// Precondition (documented, not checked): callers must pre-filter with
    /// `starts_with("rgb")`. Any other input yields NaN channels. Memoized by
    /// the raw substring between the parentheses; the returned vector is a
    /// fresh clone on every call.
    pub fn parse_color(&mut self, color: &str) -> Vec<f64> {
        let inner = color::paren_contents(color);
        if let Some(cached) = self.parsed.get(inner) {
            return cached.clone();
        }
        let channels = color::parse_channels(inner);
        self.parsed.insert(inner.to_string(), channels.clone());
        channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rgb_to_hsl_memoized_and_equal() {
        let mut cache = ColorCache::new();
        let first = cache.rgb_to_hsl(200.0, 100.0, 50.0);
        let second = cache.rgb_to_hsl(200.0, 100.0, 50.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_mutating_parse_result_does_not_corrupt_cache() {
        let mut cache = ColorCache::new();
        let mut first = cache.parse_color("rgb(10, 20, 30)");
        first[0] = 999.0;
        let second = cache.parse_color("rgb(10, 20, 30)");
        assert_eq!(second, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_parse_keyed_by_paren_contents() {
        let mut cache = ColorCache::new();
        // Same channel list through rgb and rgba spellings hits one entry.
        let a = cache.parse_color("rgb(1,2,3)");
        let b = cache.parse_color("rgba(1,2,3)");
        assert_eq!(a, b);
    }

    #[test]
    fn test_round_trip_within_one_per_channel() {
        let mut cache = ColorCache::new();
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let hsl = cache.rgb_to_hsl(f64::from(r), f64::from(g), f64::from(b));
                    let back = cache.hsl_to_rgb(hsl.h, hsl.s, hsl.l);
                    assert!(
                        (i32::from(back.r) - r).abs() <= 1
                            && (i32::from(back.g) - g).abs() <= 1
                            && (i32::from(back.b) - b).abs() <= 1,
                        "({}, {}, {}) round-tripped to ({}, {}, {})",
                        r,
                        g,
                        b,
                        back.r,
                        back.g,
                        back.b
                    );
                }
            }
        }
    }

    #[test]
    fn test_nan_inputs_are_cacheable() {
        let mut cache = ColorCache::new();
        let first = cache.rgb_to_hsl(f64::NAN, 0.0, 0.0);
        let second = cache.rgb_to_hsl(f64::NAN, 0.0, 0.0);
        // NaN poisons the result either way; the cache must still behave.
        assert_eq!(first.l.is_nan(), second.l.is_nan());
    }
}
