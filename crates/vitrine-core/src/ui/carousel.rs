//! Lightbox carousel: an indexed media viewer inside a focus-trapped overlay

use tracing::debug;

use super::overlay::{FocusTrapOverlay, OpenOutcome, OverlayAria, OverlayPhase};
use crate::dom::{ElementId, FocusHost, Key};

/// Keyboard-driven carousel over `items`
#[derive(Debug)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
    overlay: FocusTrapOverlay,
    noun: &'static str,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>, overlay: FocusTrapOverlay) -> Self {
        Self {
            items,
            index: 0,
            overlay,
            noun: "image",
        }
    }

    /// Word used by `position_label` ("image", "slide", ...)
    pub fn with_noun(mut self, noun: &'static str) -> Self {
        self.noun = noun;
        self
    }

    /// Open at `at` (clamped); a no-op for an empty collection
    pub fn open<H: FocusHost + ?Sized>(&mut self, at: usize, host: &H, trigger: Option<ElementId>) -> OpenOutcome {
        if self.items.is_empty() {
            debug!("Ignoring open on empty carousel");
            return OpenOutcome::Empty;
        }
        let outcome = self.overlay.open(host, trigger);
        if matches!(outcome, OpenOutcome::Opening | OpenOutcome::AlreadyOpen) {
            self.index = at.min(self.items.len() - 1);
        }
        outcome
    }

    pub fn close(&mut self) -> bool {
        self.overlay.close()
    }

    /// Frame step for the underlying overlay
    pub fn settle<H: FocusHost + ?Sized>(&mut self, host: &mut H) -> OverlayPhase {
        self.overlay.settle(host)
    }

    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + 1) % self.items.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.items.is_empty() {
            let len = self.items.len();
            self.index = (self.index + len - 1) % len;
        }
    }

    /// Arrows navigate; Escape and Tab go to the focus trap
    pub fn handle_key<H: FocusHost + ?Sized>(&mut self, key: Key, host: &mut H) -> bool {
        if !self.overlay.is_open() {
            return false;
        }
        match key {
            Key::ArrowRight => {
                self.next();
                true
            }
            Key::ArrowLeft => {
                self.previous();
                true
            }
            _ => self.overlay.handle_key(key, host),
        }
    }

    pub fn click_scrim(&mut self) -> bool {
        self.overlay.click_scrim()
    }

    /// Replace the collection, keeping the index in range
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.items.is_empty() {
            self.index = 0;
            if self.overlay.is_open() {
                debug!("Carousel emptied while open, closing");
                self.overlay.close();
            }
        } else {
            self.index = self.index.min(self.items.len() - 1);
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.index)
    }

    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// "image 2 of 8"
    pub fn position_label(&self) -> Option<String> {
        self.current_index()
            .map(|i| format!("{} {} of {}", self.noun, i + 1, self.items.len()))
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    pub fn is_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    pub fn overlay(&self) -> &FocusTrapOverlay {
        &self.overlay
    }

    pub fn aria(&self) -> OverlayAria {
        self.overlay.aria()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayConfig;
    use crate::dom::ElementTree;
    use crate::resources::SharedResources;

    fn setup(items: Vec<&'static str>) -> (ElementTree, Carousel<&'static str>) {
        let mut tree = ElementTree::new();
        let root = tree.append(None, "lightbox", false);
        tree.append(Some(root), "prev", true);
        tree.append(Some(root), "next", true);
        tree.append(Some(root), "close", true);
        let overlay = FocusTrapOverlay::new(root, "Gallery", OverlayConfig::default(), SharedResources::new());
        (tree, Carousel::new(items, overlay))
    }

    #[test]
    fn test_wraps_in_both_directions() {
        let (mut tree, mut c) = setup(vec!["a", "b", "c"]);
        c.open(1, &tree, None);
        c.settle(&mut tree);

        c.next();
        c.next();
        assert_eq!(c.current(), Some(&"a"));
        c.previous();
        assert_eq!(c.current(), Some(&"c"));
    }

    #[test]
    fn test_full_lap_returns_to_start() {
        for len in 1..=5 {
            let items: Vec<&'static str> = ["a", "b", "c", "d", "e"][..len].to_vec();
            let (tree, mut c) = setup(items);
            for start in 0..len {
                c.open(start, &tree, None);
                assert_eq!(c.current_index(), Some(start));

                for _ in 0..len {
                    c.next();
                }
                assert_eq!(c.current_index(), Some(start), "next x{len} from {start}");
                for _ in 0..len {
                    c.previous();
                }
                assert_eq!(c.current_index(), Some(start), "previous x{len} from {start}");

                c.next();
                c.previous();
                assert_eq!(c.current_index(), Some(start));
                c.previous();
                c.next();
                assert_eq!(c.current_index(), Some(start));
            }
        }
    }

    #[test]
    fn test_empty_open_is_noop() {
        let (tree, mut c) = setup(vec![]);
        assert_eq!(c.open(0, &tree, None), OpenOutcome::Empty);
        assert!(!c.is_open());
        assert_eq!(c.position_label(), None);
    }

    #[test]
    fn test_open_clamps_index() {
        let (tree, mut c) = setup(vec!["a", "b"]);
        c.open(9, &tree, None);
        assert_eq!(c.current_index(), Some(1));
    }

    #[test]
    fn test_arrow_keys_and_escape() {
        let (mut tree, mut c) = setup(vec!["a", "b", "c", "d"]);
        c.open(0, &tree, None);
        c.settle(&mut tree);

        assert!(c.handle_key(Key::ArrowLeft, &mut tree));
        assert_eq!(c.position_label().as_deref(), Some("image 4 of 4"));
        assert!(c.handle_key(Key::Escape, &mut tree));
        c.settle(&mut tree);
        assert!(!c.is_visible());
        assert!(!c.handle_key(Key::ArrowRight, &mut tree));
    }

    #[test]
    fn test_set_items_clamps_index() {
        let (tree, mut c) = setup(vec!["a", "b", "c", "d"]);
        c.open(3, &tree, None);
        c.set_items(vec!["x", "y"]);
        assert_eq!(c.current_index(), Some(1));
    }
}
