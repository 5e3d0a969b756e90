// ABOUTME: DomWindow: a PageWindow over a parsed dom_query document.
// ABOUTME: Resolves computed style from inline attributes and models frames as srcdoc iframes.

//! Static-document implementation of the engine's page capability.
//!
//! Computed style is resolved from inline `style` attributes only:
//! `background-color` comes from the element itself (it never inherits),
//! `color` from the nearest styled ancestor with the browser default
//! `rgb(0, 0, 0)` as fallback. `hsl(...)` values are computed down to the
//! `rgb(...)` form a rendering engine would report. Stylesheet cascade is out
//! of scope; a richer document model slots in behind the same trait.
//!
//! A child frame is an `iframe` carrying its document inline in `srcdoc`.
//! An `iframe` without one behaves like a cross-origin frame: entering it
//! fails, which the shading recursion logs and skips.

use dom_query::{Document, Selection};

use shades_engine::{FrameError, PageWindow, StyleProp};

use crate::matchers::get_or_compile;
use crate::style;

/// Browser default text color, used when no ancestor declares one.
const DEFAULT_TEXT_COLOR: &str = "rgb(0, 0, 0)";

/// Handle to one element: the tag selection it came from plus its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    tag: String,
    index: usize,
}

/// Handle to one child frame (an `iframe` element, in document order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomFrame {
    index: usize,
}

/// One window over a parsed HTML document.
pub struct DomWindow {
    doc: Document,
}

impl DomWindow {
    /// Parses an HTML string into a window.
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Document::from(html),
        }
    }

    /// Serializes the document, including any styles applied so far.
    pub fn html(&self) -> String {
        self.doc.html().to_string()
    }

    /// The element's own `style` attribute, if any.
    fn style_attr(&self, element: &DomElement) -> Option<String> {
        let matcher = get_or_compile(&element.tag)?;
        self.doc
            .select_matcher(&matcher)
            .iter()
            .nth(element.index)?
            .attr("style")
            .map(|value| value.to_string())
    }

    /// Resolves an inherited property by walking the ancestor chain.
    fn inherited_style(&self, element: &DomElement, prop: StyleProp) -> Option<String> {
        let matcher = get_or_compile(&element.tag)?;
        let selection = self.doc.select_matcher(&matcher);
        let mut current = selection.iter().nth(element.index);
        while let Some(node) = current {
            if let Some(style_attr) = node.attr("style") {
                if let Some(value) = style::property_value(&style_attr, prop.css_name()) {
                    return Some(value);
                }
            }
            current = Some(node.parent()).filter(Selection::exists);
        }
        None
    }

    /// Rewrites one declaration in the element's `style` attribute.
    fn write_style(&self, element: &DomElement, prop: StyleProp, value: &str, important: bool) {
        let Some(matcher) = get_or_compile(&element.tag) else {
            return;
        };
        let selection = self.doc.select_matcher(&matcher);
        let Some(node) = selection.iter().nth(element.index) else {
            return;
        };
        let current = node.attr("style").map(|v| v.to_string()).unwrap_or_default();
        let updated = style::with_property(&current, prop.css_name(), value, important);
        node.set_attr("style", &updated);
    }
}

impl PageWindow for DomWindow {
    type Element = DomElement;
    type Frame = DomFrame;

    fn elements_by_tag(&self, tag: &str) -> Vec<DomElement> {
        let Some(matcher) = get_or_compile(tag) else {
            return Vec::new();
        };
        let count = self.doc.select_matcher(&matcher).iter().count();
        (0..count)
            .map(|index| DomElement {
                tag: tag.to_string(),
                index,
            })
            .collect()
    }

    fn computed_style(&self, element: &DomElement, prop: StyleProp) -> Option<String> {
        let resolved = match prop {
            // background-color never inherits.
            StyleProp::BackgroundColor => self
                .style_attr(element)
                .and_then(|attr| style::property_value(&attr, prop.css_name())),
            StyleProp::Color => self
                .inherited_style(element, prop)
                .or_else(|| Some(DEFAULT_TEXT_COLOR.to_string())),
        };
        resolved.map(|value| style::normalize_color(&value))
    }

    fn inline_style(&self, element: &DomElement, prop: StyleProp) -> Option<String> {
        self.style_attr(element)
            .and_then(|attr| style::property_value(&attr, prop.css_name()))
    }

    fn set_style(&mut self, element: &DomElement, prop: StyleProp, value: &str) {
        self.write_style(element, prop, value, false);
    }

    fn set_style_important(&mut self, element: &DomElement, prop: StyleProp, value: &str) {
        self.write_style(element, prop, value, true);
    }

    fn frames(&self) -> Vec<DomFrame> {
        let Some(matcher) = get_or_compile("iframe") else {
            return Vec::new();
        };
        let count = self.doc.select_matcher(&matcher).iter().count();
        (0..count).map(|index| DomFrame { index }).collect()
    }

    fn with_frame<R>(
        &mut self,
        frame: &DomFrame,
        visit: impl FnOnce(&mut Self) -> R,
    ) -> Result<R, FrameError> {
        let srcdoc = {
            let matcher = get_or_compile("iframe")
                .ok_or_else(|| FrameError::inaccessible("iframe selector failed to compile"))?;
            let selection = self.doc.select_matcher(&matcher);
            let node = selection
                .iter()
                .nth(frame.index)
                .ok_or_else(|| FrameError::inaccessible("frame is no longer present"))?;
            node.attr("srcdoc")
                .ok_or_else(|| FrameError::inaccessible("frame has no inline document"))?
                .to_string()
        };

        let mut child = DomWindow::parse(&srcdoc);
        let result = visit(&mut child);
        let rendered = child.html();

        if let Some(matcher) = get_or_compile("iframe") {
            if let Some(node) = self.doc.select_matcher(&matcher).iter().nth(frame.index) {
                node.set_attr("srcdoc", &rendered);
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_elements_by_tag_in_document_order() {
        let window = DomWindow::parse("<div>a</div><p>b</p><div>c</div>");
        assert_eq!(window.elements_by_tag("div").len(), 2);
        assert_eq!(window.elements_by_tag("p").len(), 1);
        assert_eq!(window.elements_by_tag("table").len(), 0);
    }

    #[test]
    fn test_background_does_not_inherit() {
        let window =
            DomWindow::parse(r#"<div style="background-color: rgb(1, 2, 3)"><p>x</p></div>"#);
        let paragraphs = window.elements_by_tag("p");
        let p = &paragraphs[0];
        assert_eq!(window.computed_style(p, StyleProp::BackgroundColor), None);
    }

    #[test]
    fn test_color_inherits_from_nearest_ancestor() {
        let window = DomWindow::parse(
            r#"<div style="color: rgb(9, 9, 9)"><section><p>x</p></section></div>"#,
        );
        let paragraphs = window.elements_by_tag("p");
        let p = &paragraphs[0];
        assert_eq!(
            window.computed_style(p, StyleProp::Color),
            Some("rgb(9, 9, 9)".to_string())
        );
    }

    #[test]
    fn test_color_defaults_to_black() {
        let window = DomWindow::parse("<p>x</p>");
        let paragraphs = window.elements_by_tag("p");
        let p = &paragraphs[0];
        assert_eq!(
            window.computed_style(p, StyleProp::Color),
            Some("rgb(0, 0, 0)".to_string())
        );
    }

    #[test]
    fn test_important_write_reads_back() {
        let mut window = DomWindow::parse(r#"<p style="background-color: white !important">x</p>"#);
        let p = window.elements_by_tag("p")[0].clone();
        window.set_style_important(&p, StyleProp::BackgroundColor, "rgb(5,5,5)");
        assert_eq!(
            window.computed_style(&p, StyleProp::BackgroundColor),
            Some("rgb(5,5,5)".to_string())
        );
        assert!(window.html().contains("rgb(5,5,5) !important"));
    }

    #[test]
    fn test_with_frame_requires_srcdoc() {
        let mut window = DomWindow::parse(r#"<iframe src="https://example.com/"></iframe>"#);
        let frames = window.frames();
        assert_eq!(frames.len(), 1);
        let denied = window.with_frame(&frames[0], |_child| ());
        assert!(denied.is_err());
    }

    #[test]
    fn test_with_frame_round_trips_srcdoc() {
        let mut window =
            DomWindow::parse(r#"<iframe srcdoc="<p style='color: red'>hi</p>"></iframe>"#);
        let frames = window.frames();
        let visited = window.with_frame(&frames[0], |child| {
            let p = child.elements_by_tag("p")[0].clone();
            child.set_style(&p, StyleProp::BackgroundColor, "rgb(7,7,7)");
        });
        assert!(visited.is_ok());
        assert!(window.html().contains("rgb(7,7,7)"));
    }
}
