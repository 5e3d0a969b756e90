// ABOUTME: The shading pass: per-tag background rewriting with foreground contrast correction.
// ABOUTME: Recurses over a window and its frames; inaccessible frames are logged and skipped.

use tracing::warn;

use crate::cache::ColorCache;
use crate::color::css_color;
use crate::config::{ShadeConfig, ShadeTarget};
use crate::window::{PageWindow, StyleProp};

/// Content tags swept by one shading pass, in pass order. Structural and
/// text-bearing tags only; purely inline presentational tags stay untouched.
pub const SHADE_TAGS: &[&str] = &[
    "iframe",
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "cite",
    "code",
    "dd",
    "div",
    "dl",
    "details",
    "fieldset",
    "figcaption",
    "figure",
    "font",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "li",
    "main",
    "math",
    "nav",
    "noscript",
    "ol",
    "output",
    "p",
    "pre",
    "q",
    "section",
    "span",
    "table",
    "tbody",
    "td",
    "textarea",
    "tfoot",
    "ul",
];

// Minimum distance kept between foreground and background after shading.
// Hue is in [0, 1).
const MIN_LIT_GAP: f64 = 0.3;
const MIN_HUE_GAP: f64 = 30.0 / 360.0;

/// A body without a resolvable rgb-form background is assumed to need one for
/// contrast purposes and gets this neutral mid-gray.
const BODY_FALLBACK_BACKGROUND: &str = "rgb(126, 126, 126)";

/// Runs shading passes over page windows, memoizing color conversions for the
/// lifetime of the shader.
#[derive(Debug, Default)]
pub struct Shader {
    cache: ColorCache,
}

impl Shader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry point: one full shading pass over the root window and every
    /// accessible frame beneath it.
    pub fn shade<W: PageWindow>(&mut self, window: &mut W, config: &ShadeConfig) {
        self.shade_window(window, config);
    }

    /// Shades every content tag in one window, then recurses into its child
    /// frames. A frame that denies access is logged and skipped; siblings are
    /// still processed.
    pub fn shade_window<W: PageWindow>(&mut self, window: &mut W, config: &ShadeConfig) {
        for tag in SHADE_TAGS {
            self.shade_tag(window, tag, config);
        }

        for frame in window.frames() {
            let visited = window.with_frame(&frame, |child| self.shade_window(child, config));
            if let Err(err) = visited {
                warn!(error = %err, "skipping frame");
            }
        }
    }

    /// Shades every element of one tag in one window.
    ///
    /// Backgrounds lighter than `config.threshold` are rewritten to the
    /// configured target; the foreground is then nudged to restore the
    /// original lightness distance when it lands too close to the new
    /// background in both lightness and hue.
    pub fn shade_tag<W: PageWindow>(&mut self, window: &mut W, tag: &str, config: &ShadeConfig) {
        // Fixed-color targets are prepared once per call; rgb-form targets are
        // parsed up front so alpha carry-over can rebuild the string per element.
        let mut fixed_channels: Option<Vec<f64>> = None;
        let mut fixed_color: Option<String> = None;
        if let ShadeTarget::Color(color) = &config.target {
            if color.starts_with("rgb") {
                fixed_channels = Some(self.cache.parse_color(color));
            }
            fixed_color = Some(color.clone());
        }

        // Applied-background lightness, resolved once from the first element
        // whose rewritten background reads back in rgb form, then reused for
        // every later element of this call.
        let mut new_bg_lit: Option<f64> = None;

        for element in window.elements_by_tag(tag) {
            let bg = match window.computed_style(&element, StyleProp::BackgroundColor) {
                Some(value) if value.starts_with("rgb") => value,
                _ => {
                    if tag == "body" {
                        window.set_style(
                            &element,
                            StyleProp::BackgroundColor,
                            BODY_FALLBACK_BACKGROUND,
                        );
                    }
                    continue;
                }
            };

            let channels = self.cache.parse_color(&bg);
            if !usable_channels(&channels) {
                continue;
            }
            let hsl = self.cache.rgb_to_hsl(channels[0], channels[1], channels[2]);
            if hsl.l <= config.threshold {
                continue;
            }

            let new_channels = match &config.target {
                ShadeTarget::Lightness(lightness) => {
                    let rgb = self.cache.hsl_to_rgb(hsl.h, hsl.s, *lightness);
                    Some(rgb.channels().to_vec())
                }
                ShadeTarget::Color(_) => fixed_channels.clone(),
            };

            let alpha = channels.get(3).copied();
            let new_color = match &new_channels {
                Some(ch) => css_color(ch, alpha),
                // Non-rgb fixed target: applied verbatim.
                None => match &fixed_color {
                    Some(color) => color.clone(),
                    None => continue,
                },
            };
            window.set_style_important(&element, StyleProp::BackgroundColor, &new_color);

            // Try to keep the original lightness distance between foreground
            // and background when the text lands too close to the new shade.
            let fg = match window.computed_style(&element, StyleProp::Color) {
                Some(value) if value.starts_with("rgb") => value,
                _ => continue,
            };

            if new_bg_lit.is_none() {
                new_bg_lit = self.resolve_applied_lightness(window, &element);
            }
            let Some(bg_lit) = new_bg_lit else { continue };

            let fg_channels = self.cache.parse_color(&fg);
            if !usable_channels(&fg_channels) {
                continue;
            }
            let fg_hsl = self
                .cache
                .rgb_to_hsl(fg_channels[0], fg_channels[1], fg_channels[2]);

            if (fg_hsl.l - bg_lit).abs() < MIN_LIT_GAP && (fg_hsl.h - hsl.h).abs() < MIN_HUE_GAP {
                let fg_light = (bg_lit + fg_hsl.l - hsl.l).clamp(0.0, 1.0);
                let new_fg = self.cache.hsl_to_rgb(fg_hsl.h, fg_hsl.s, fg_light);
                let new_fg_color = css_color(&new_fg.channels(), fg_channels.get(3).copied());
                window.set_style_important(&element, StyleProp::Color, &new_fg_color);
            }
        }
    }

    /// Sets the body's inline background only when none is present yet.
    pub fn set_background_if_unset<W: PageWindow>(&mut self, window: &mut W, color: &str) {
        let bodies = window.elements_by_tag("body");
        let Some(body) = bodies.first() else { return };
        let unset = window
            .inline_style(body, StyleProp::BackgroundColor)
            .map_or(true, |value| value.is_empty());
        if unset {
            window.set_style(body, StyleProp::BackgroundColor, color);
        }
    }

    /// Reads back an element's just-applied background and returns its
    /// lightness, or `None` when it does not resolve to an rgb form.
    fn resolve_applied_lightness<W: PageWindow>(
        &mut self,
        window: &W,
        element: &W::Element,
    ) -> Option<f64> {
        let applied = window.computed_style(element, StyleProp::BackgroundColor)?;
        if !applied.starts_with("rgb") {
            return None;
        }
        let channels = self.cache.parse_color(&applied);
        if !usable_channels(&channels) {
            return None;
        }
        let hsl = self.cache.rgb_to_hsl(channels[0], channels[1], channels[2]);
        Some(hsl.l)
    }
}

/// A parsed channel list is usable when it carries three finite color channels.
fn usable_channels(channels: &[f64]) -> bool {
    channels.len() >= 3 && channels[..3].iter().all(|c| c.is_finite())
}
