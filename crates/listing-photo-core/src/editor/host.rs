//! Seams to the host page around the editor.

/// Host control over background page scrolling.
pub trait BackgroundScroll {
    /// Stop the page behind the editor from scrolling.
    fn suppress(&mut self);
    /// Undo a previous [`suppress`](Self::suppress).
    fn restore(&mut self);
}

/// Host without a scrollable background (tests, headless use).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBackgroundScroll;

impl BackgroundScroll for NoBackgroundScroll {
    fn suppress(&mut self) {}
    fn restore(&mut self) {}
}

/// Scoped scroll suppression: suppressed on acquire, restored on drop.
///
/// Dropping the guard is the only way to restore, so every path that
/// closes the editor (apply, cancel, drop) restores exactly once.
pub struct ScrollSuppression {
    host: Box<dyn BackgroundScroll>,
}

impl ScrollSuppression {
    pub fn acquire(mut host: Box<dyn BackgroundScroll>) -> Self {
        host.suppress();
        Self { host }
    }
}

impl Drop for ScrollSuppression {
    fn drop(&mut self) {
        self.host.restore();
    }
}

impl std::fmt::Debug for ScrollSuppression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSuppression").finish_non_exhaustive()
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Escape,
    Other,
}

impl EditorKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => EditorKey::Escape,
            _ => EditorKey::Other,
        }
    }
}
