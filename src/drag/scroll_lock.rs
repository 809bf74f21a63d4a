//! Scroll containment for the duration of a drag.
//!
//! While a row is dragged the ambient scroll container and the page body must
//! neither scroll nor pan, otherwise the pointer offset and the list drift
//! apart. [`ScrollLock`] captures the inline style of both surfaces, applies
//! the locked style, and restores the captured style exactly on release
//! (including the scroll offset, which scroll anchoring may have moved).

/// Inline `overflow` value of a surface. `Unset` means no inline value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Unset,
    Visible,
    Auto,
    Scroll,
    Hidden,
}

impl Overflow {
    /// CSS value; empty string clears the inline property
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Visible => "visible",
            Self::Auto => "auto",
            Self::Scroll => "scroll",
            Self::Hidden => "hidden",
        }
    }
}

/// Inline `touch-action` value of a surface. `Unset` means no inline value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TouchAction {
    #[default]
    Unset,
    Auto,
    None,
    PanY,
    Manipulation,
}

impl TouchAction {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Auto => "auto",
            Self::None => "none",
            Self::PanY => "pan-y",
            Self::Manipulation => "manipulation",
        }
    }
}

/// The scroll-related style state of one surface
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceStyle {
    pub overflow: Overflow,
    pub touch_action: TouchAction,
    /// Vertical scroll offset in pixels
    pub scroll_offset: f64,
}

impl SurfaceStyle {
    /// Locked variant of this style: same offset, no scrolling, no panning
    pub fn locked(self) -> Self {
        Self {
            overflow: Overflow::Hidden,
            touch_action: TouchAction::None,
            scroll_offset: self.scroll_offset,
        }
    }
}

/// A surface whose scroll behaviour can be read and overridden
pub trait ScrollSurface {
    /// Read the current style state
    fn capture(&self) -> SurfaceStyle;

    /// Overwrite the style state
    fn apply(&mut self, style: &SurfaceStyle);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Captured {
    container: SurfaceStyle,
    body: SurfaceStyle,
}

/// Scoped scroll lock over the ambient container and the page body.
///
/// `acquire` while held and `release` while free are no-ops. Dropping a held
/// lock releases it.
#[derive(Debug)]
pub struct ScrollLock<S: ScrollSurface> {
    container: S,
    body: S,
    captured: Option<Captured>,
}

impl<S: ScrollSurface> ScrollLock<S> {
    pub fn new(container: S, body: S) -> Self {
        Self {
            container,
            body,
            captured: None,
        }
    }

    pub fn is_held(&self) -> bool {
        self.captured.is_some()
    }

    /// Capture both surfaces and lock them.
    ///
    /// Returns `false` if the lock was already held.
    pub fn acquire(&mut self) -> bool {
        if self.captured.is_some() {
            return false;
        }

        let captured = Captured {
            container: self.container.capture(),
            body: self.body.capture(),
        };
        self.container.apply(&captured.container.locked());
        self.body.apply(&captured.body.locked());
        self.captured = Some(captured);

        tracing::debug!(
            scroll_offset = captured.container.scroll_offset,
            "Scroll lock acquired"
        );
        true
    }

    /// Restore the captured style of both surfaces.
    ///
    /// Returns `false` if the lock was not held.
    pub fn release(&mut self) -> bool {
        let Some(captured) = self.captured.take() else {
            return false;
        };

        self.container.apply(&captured.container);
        self.body.apply(&captured.body);

        tracing::debug!(
            scroll_offset = captured.container.scroll_offset,
            "Scroll lock released"
        );
        true
    }

    pub fn container(&self) -> &S {
        &self.container
    }
}

impl<S: ScrollSurface> Drop for ScrollLock<S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory surface shared with the test so state survives the lock
    #[derive(Debug, Clone, Default)]
    pub(crate) struct MemorySurface(pub Rc<RefCell<SurfaceStyle>>);

    impl MemorySurface {
        pub(crate) fn with_style(style: SurfaceStyle) -> Self {
            Self(Rc::new(RefCell::new(style)))
        }

        pub(crate) fn get(&self) -> SurfaceStyle {
            *self.0.borrow()
        }

        /// Simulate the browser scrolling the surface
        pub(crate) fn scroll_to(&self, offset: f64) {
            self.0.borrow_mut().scroll_offset = offset;
        }
    }

    impl ScrollSurface for MemorySurface {
        fn capture(&self) -> SurfaceStyle {
            self.get()
        }

        fn apply(&mut self, style: &SurfaceStyle) {
            *self.0.borrow_mut() = *style;
        }
    }

    fn container_style() -> SurfaceStyle {
        SurfaceStyle {
            overflow: Overflow::Auto,
            touch_action: TouchAction::PanY,
            scroll_offset: 240.0,
        }
    }

    fn surfaces() -> (MemorySurface, MemorySurface) {
        (
            MemorySurface::with_style(container_style()),
            MemorySurface::default(),
        )
    }

    #[test]
    fn test_acquire_locks_both_surfaces() {
        let (container, body) = surfaces();
        let mut lock = ScrollLock::new(container.clone(), body.clone());

        assert!(lock.acquire());
        assert!(lock.is_held());

        let locked = container.get();
        assert_eq!(locked.overflow, Overflow::Hidden);
        assert_eq!(locked.touch_action, TouchAction::None);
        assert_eq!(locked.scroll_offset, 240.0);
        assert_eq!(body.get().touch_action, TouchAction::None);
        assert_eq!(body.get().overflow, Overflow::Hidden);
    }

    #[test]
    fn test_release_restores_exactly_including_offset() {
        let (container, body) = surfaces();
        let mut lock = ScrollLock::new(container.clone(), body.clone());

        lock.acquire();
        // Scroll anchoring moved the container while locked
        container.scroll_to(310.0);
        assert!(lock.release());

        assert_eq!(container.get(), container_style());
        assert_eq!(body.get(), SurfaceStyle::default());
        assert!(!lock.is_held());
    }

    #[test]
    fn test_double_acquire_keeps_first_capture() {
        let (container, body) = surfaces();
        let mut lock = ScrollLock::new(container.clone(), body);

        assert!(lock.acquire());
        assert!(!lock.acquire());
        lock.release();

        // A second capture would have recorded the locked style
        assert_eq!(container.get(), container_style());
    }

    #[test]
    fn test_release_without_acquire_is_noop() {
        let (container, body) = surfaces();
        let mut lock = ScrollLock::new(container.clone(), body);

        assert!(!lock.release());
        assert_eq!(container.get(), container_style());
    }

    #[test]
    fn test_drop_releases() {
        let (container, body) = surfaces();
        {
            let mut lock = ScrollLock::new(container.clone(), body.clone());
            lock.acquire();
        }
        assert_eq!(container.get(), container_style());
        assert_eq!(body.get(), SurfaceStyle::default());
    }

    #[test]
    fn test_css_values() {
        assert_eq!(Overflow::Unset.as_css(), "");
        assert_eq!(Overflow::Hidden.as_css(), "hidden");
        assert_eq!(TouchAction::None.as_css(), "none");
        assert_eq!(TouchAction::PanY.as_css(), "pan-y");
    }
}
