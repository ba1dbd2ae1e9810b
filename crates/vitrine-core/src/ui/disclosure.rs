//! Accordion groups (FAQ, menus, syllabus outlines)

use std::collections::BTreeSet;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureMode {
    /// Opening one panel closes the others
    #[default]
    Single,
    Multiple,
}

/// Expanded/collapsed state for a fixed set of panels
#[derive(Debug, Clone)]
pub struct DisclosureGroup<K> {
    panels: Vec<K>,
    mode: DisclosureMode,
    open: BTreeSet<K>,
}

impl<K: Ord + Clone + Debug> DisclosureGroup<K> {
    /// Unknown ids in `initially_open` are dropped; single mode keeps the first
    pub fn new(panels: Vec<K>, mode: DisclosureMode, initially_open: impl IntoIterator<Item = K>) -> Self {
        let mut group = Self {
            panels,
            mode,
            open: BTreeSet::new(),
        };
        for id in initially_open {
            if !group.contains(&id) {
                debug!(panel = ?id, "Ignoring unknown initially open panel");
                continue;
            }
            if mode == DisclosureMode::Single && !group.open.is_empty() {
                break;
            }
            group.open.insert(id);
        }
        group
    }

    pub fn mode(&self) -> DisclosureMode {
        self.mode
    }

    pub fn panels(&self) -> &[K] {
        &self.panels
    }

    fn contains(&self, id: &K) -> bool {
        self.panels.contains(id)
    }

    pub fn is_open(&self, id: &K) -> bool {
        self.open.contains(id)
    }

    /// Open ids in panel order
    pub fn open_ids(&self) -> Vec<&K> {
        self.panels.iter().filter(|p| self.open.contains(*p)).collect()
    }

    /// Flip a panel; returns whether it is open afterwards
    pub fn toggle(&mut self, id: &K) -> bool {
        if self.is_open(id) {
            self.close(id);
            false
        } else {
            self.open(id)
        }
    }

    /// Returns whether the panel is open afterwards
    pub fn open(&mut self, id: &K) -> bool {
        if !self.contains(id) {
            debug!(panel = ?id, "Ignoring unknown disclosure panel");
            return false;
        }
        match self.mode {
            DisclosureMode::Single => {
                // Replace the whole set so no reader sees two open panels
                self.open = BTreeSet::from([id.clone()]);
            }
            DisclosureMode::Multiple => {
                self.open.insert(id.clone());
            }
        }
        true
    }

    pub fn close(&mut self, id: &K) {
        self.open.remove(id);
    }

    pub fn close_all(&mut self) {
        self.open.clear();
    }

    /// Enter and Space on a trigger act like a click
    pub fn handle_key(&mut self, id: &K, key: Key) -> bool {
        match key {
            Key::Enter | Key::Space => {
                self.toggle(id);
                true
            }
            _ => false,
        }
    }

    /// Value for the trigger's `aria-expanded`
    pub fn aria_expanded(&self, id: &K) -> &'static str {
        if self.is_open(id) {
            "true"
        } else {
            "false"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq(mode: DisclosureMode) -> DisclosureGroup<u32> {
        DisclosureGroup::new((1..=5).collect(), mode, [3])
    }

    #[test]
    fn test_single_mode_swaps() {
        let mut g = faq(DisclosureMode::Single);
        assert_eq!(g.open_ids(), vec![&3]);

        assert!(g.toggle(&1));
        assert_eq!(g.open_ids(), vec![&1]);
        assert!(!g.toggle(&1));
        assert!(g.open_ids().is_empty());
    }

    #[test]
    fn test_single_mode_every_pair_leaves_only_the_toggled() {
        for a in 1..=5u32 {
            for b in (1..=5u32).filter(|b| *b != a) {
                let mut g = DisclosureGroup::new((1..=5).collect(), DisclosureMode::Single, [a]);
                assert!(g.toggle(&b));
                assert_eq!(g.open_ids(), vec![&b], "open {a}, toggle {b}");
                assert_eq!(g.aria_expanded(&a), "false");

                // Keyboard activation behaves the same way
                assert!(g.handle_key(&a, Key::Enter));
                assert_eq!(g.open_ids(), vec![&a], "keyboard back to {a}");
            }
        }
    }

    #[test]
    fn test_multiple_mode_accumulates() {
        let mut g = faq(DisclosureMode::Multiple);
        g.toggle(&1);
        g.toggle(&5);
        assert_eq!(g.open_ids(), vec![&1, &3, &5]);
        g.close_all();
        assert!(g.open_ids().is_empty());
    }

    #[test]
    fn test_unknown_id_noop() {
        let mut g = faq(DisclosureMode::Single);
        assert!(!g.toggle(&42));
        assert_eq!(g.open_ids(), vec![&3]);
    }

    #[test]
    fn test_single_mode_keeps_first_initial() {
        let g = DisclosureGroup::new(vec!["a", "b", "c"], DisclosureMode::Single, ["c", "a"]);
        assert_eq!(g.open_ids(), vec![&"c"]);
    }

    #[test]
    fn test_keyboard_and_aria() {
        let mut g = faq(DisclosureMode::Single);
        assert_eq!(g.aria_expanded(&2), "false");
        assert!(g.handle_key(&2, Key::Space));
        assert_eq!(g.aria_expanded(&2), "true");
        assert!(!g.handle_key(&2, Key::Tab));
    }
}
