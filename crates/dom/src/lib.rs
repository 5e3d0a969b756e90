// ABOUTME: Main library entry point for the static-DOM page backend.
// ABOUTME: Re-exports DomWindow and its element/frame handles.

//! Static-DOM backend for the shades engine.
//!
//! Parses an HTML string into a [`DomWindow`] implementing the engine's
//! `PageWindow` capability, shades it in place, and serializes the result.
//!
//! # Example
//!
//! ```
//! use shades_dom::DomWindow;
//! use shades_engine::{ShadeConfig, Shader};
//!
//! let mut window = DomWindow::parse(r#"<p style="background-color: rgb(255, 255, 255)">hi</p>"#);
//! let mut shader = Shader::new();
//! shader.shade(&mut window, &ShadeConfig::with_lightness(0.8, 0.2));
//! assert!(window.html().contains("rgb(51,51,51) !important"));
//! ```

mod matchers;
mod style;
mod window;

pub use crate::window::{DomElement, DomFrame, DomWindow};
