// ABOUTME: Main library entry point for the shades color-shading engine.
// ABOUTME: Re-exports the public API: Shader, ColorCache, ShadeConfig, ShadeTarget, ShadeSettings, PageWindow.

//! Shades - a brightness-reduction engine for rendered pages.
//!
//! Given a page window and a [`ShadeConfig`], the [`Shader`] rewrites the
//! backgrounds of content elements lighter than a threshold and nudges
//! foreground colors to keep text legible, recursing into nested frames.
//! Page access goes through the [`PageWindow`] capability, so any document
//! model - live or static - can sit behind the pass.
//!
//! # Example
//!
//! ```ignore
//! use shades_engine::{ShadeConfig, Shader};
//!
//! let mut shader = Shader::new();
//! let config = ShadeConfig::with_lightness(0.8, 0.66);
//! shader.shade(&mut window, &config);
//! ```

pub mod cache;
pub mod color;
pub mod config;
pub mod error;
pub mod shader;
pub mod window;

pub use crate::cache::ColorCache;
pub use crate::color::{Hsl, Rgb};
pub use crate::config::{ShadeConfig, ShadeSettings, ShadeTarget};
pub use crate::error::FrameError;
pub use crate::shader::{Shader, SHADE_TAGS};
pub use crate::window::{PageWindow, StyleProp};
