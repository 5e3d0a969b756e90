// ABOUTME: The PageWindow capability trait through which the engine reads and writes page styles.
// ABOUTME: Defines StyleProp and the Result-returning frame access used by the recursion.

use crate::error::FrameError;

/// The two style properties a shading pass touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleProp {
    BackgroundColor,
    Color,
}

impl StyleProp {
    /// The CSS property name.
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProp::BackgroundColor => "background-color",
            StyleProp::Color => "color",
        }
    }
}

/// Style and frame access for one window.
///
/// The engine is generic over this capability: a live rendering engine, a
/// static document model, or a test double all fit behind it. Methods that
/// read return resolved strings; the engine never inspects page structure
/// beyond tag names and frame handles.
pub trait PageWindow {
    /// Handle to one element of this window's document.
    type Element: Clone;
    /// Handle to one child frame of this window.
    type Frame: Clone;

    /// All elements with the given tag name, in document order.
    fn elements_by_tag(&self, tag: &str) -> Vec<Self::Element>;

    /// The resolved value of a style property, or `None` when nothing
    /// resolvable exists (treated by the engine like a non-rgb value).
    fn computed_style(&self, element: &Self::Element, prop: StyleProp) -> Option<String>;

    /// The element's own inline declaration of a property, if any.
    fn inline_style(&self, element: &Self::Element, prop: StyleProp) -> Option<String>;

    /// Writes an inline declaration at normal precedence.
    fn set_style(&mut self, element: &Self::Element, prop: StyleProp, value: &str);

    /// Writes an inline declaration at `!important` precedence, overriding
    /// any `!important` rule already in force on the property.
    fn set_style_important(&mut self, element: &Self::Element, prop: StyleProp, value: &str);

    /// Handles to this window's child frames, in document order.
    fn frames(&self) -> Vec<Self::Frame>;

    /// Enters a child frame and runs `visit` against it.
    ///
    /// Denied access (cross-origin or equivalent) is an error result, never a
    /// panic; the caller decides whether to continue with siblings.
    fn with_frame<R>(
        &mut self,
        frame: &Self::Frame,
        visit: impl FnOnce(&mut Self) -> R,
    ) -> Result<R, FrameError>;
}
