use dioxus::document;
use indoc::formatdoc;
use std::cell::Cell;
use std::rc::Rc;

use crate::drag::{Overflow, ScrollSurface, SurfaceStyle, TouchAction};

/// A DOM element addressed by CSS selector, driven through `document::eval`.
///
/// The webview can't be read synchronously, so the surface keeps a mirror of
/// the inline style it last wrote. The scroll offset is fed from `onscroll`
/// through the shared cell returned by [`DomSurface::scroll_offset_handle`].
#[derive(Debug, Clone)]
pub struct DomSurface {
    selector: String,
    overflow: Overflow,
    touch_action: TouchAction,
    scroll_offset: Rc<Cell<f64>>,
}

impl DomSurface {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            overflow: Overflow::Unset,
            touch_action: TouchAction::Unset,
            scroll_offset: Rc::new(Cell::new(0.0)),
        }
    }

    /// The page body
    pub fn body() -> Self {
        Self::new("body")
    }

    /// Shared cell the scroll listener writes the current offset into
    pub fn scroll_offset_handle(&self) -> Rc<Cell<f64>> {
        Rc::clone(&self.scroll_offset)
    }

    fn script(&self, style: &SurfaceStyle) -> String {
        // Use JSON encoding to safely escape the selector for JavaScript
        let selector = serde_json::to_string(&self.selector).unwrap_or_default();
        let overflow = style.overflow.as_css();
        let touch_action = style.touch_action.as_css();
        let offset = style.scroll_offset;
        formatdoc! {r#"
            const el = document.querySelector({selector});
            if (el) {{
                el.style.overflow = "{overflow}";
                el.style.touchAction = "{touch_action}";
                if (Math.abs(el.scrollTop - {offset}) > 0.5) el.scrollTop = {offset};
            }}
        "#}
    }
}

impl ScrollSurface for DomSurface {
    fn capture(&self) -> SurfaceStyle {
        SurfaceStyle {
            overflow: self.overflow,
            touch_action: self.touch_action,
            scroll_offset: self.scroll_offset.get(),
        }
    }

    fn apply(&mut self, style: &SurfaceStyle) {
        self.overflow = style.overflow;
        self.touch_action = style.touch_action;
        self.scroll_offset.set(style.scroll_offset);

        let script = self.script(style);
        tracing::trace!(selector = %self.selector, ?style, "Applying surface style");
        let _ = document::eval(&script);
    }
}
