//! Host surface consumed by the interaction layer
//!
//! The layer never owns a real document. Hosts expose focus through
//! [`FocusHost`]; [`ElementTree`] is the in-memory host used by the terminal
//! preview and by tests.

use std::collections::HashMap;
use std::fmt;

/// Opaque handle to a host element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Platform-neutral key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    /// Shift+Tab
    BackTab,
    Escape,
    Enter,
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Char(char),
}

/// Axis-aligned rectangle in host pixels (or cells)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Focus operations the overlay primitives need from the host document
pub trait FocusHost {
    /// Currently focused element, if any
    fn active_element(&self) -> Option<ElementId>;

    /// Move focus; ignored by hosts when the element is not connected
    fn focus(&mut self, id: ElementId);

    /// Clear focus so nothing is active
    fn blur(&mut self);

    /// Focusable descendants of `root` in document order
    fn focusable_within(&self, root: ElementId) -> Vec<ElementId>;

    /// Whether the element is still attached to the document
    fn is_connected(&self, id: ElementId) -> bool;
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    focusable: bool,
    label: String,
}

/// In-memory element tree with a single focus cursor
#[derive(Debug, Default)]
pub struct ElementTree {
    nodes: HashMap<ElementId, Node>,
    roots: Vec<ElementId>,
    next_id: u64,
    active: Option<ElementId>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent` (or at the top level)
    pub fn append(&mut self, parent: Option<ElementId>, label: impl Into<String>, focusable: bool) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.nodes.insert(
            id,
            Node {
                parent,
                children: Vec::new(),
                focusable,
                label: label.into(),
            },
        );
        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Detach an element and its subtree; focus inside it is dropped
    pub fn remove(&mut self, id: ElementId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        match node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent_node) => parent_node.children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
        if self.active == Some(id) {
            self.active = None;
        }
        for child in node.children {
            // Children point at a parent that no longer exists
            if let Some(child_node) = self.nodes.get_mut(&child) {
                child_node.parent = None;
            }
            self.remove(child);
        }
    }

    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.label.as_str())
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Every focusable element in document order
    pub fn focus_order(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        for root in &self.roots {
            if self.nodes.get(root).is_some_and(|n| n.focusable) {
                out.push(*root);
            }
            self.collect_focusable(*root, &mut out);
        }
        out
    }

    fn collect_focusable(&self, id: ElementId, out: &mut Vec<ElementId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        for child in &node.children {
            if self.nodes.get(child).is_some_and(|n| n.focusable) {
                out.push(*child);
            }
            self.collect_focusable(*child, out);
        }
    }
}

impl FocusHost for ElementTree {
    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn focus(&mut self, id: ElementId) {
        if self.nodes.contains_key(&id) {
            self.active = Some(id);
        }
    }

    fn blur(&mut self) {
        self.active = None;
    }

    fn focusable_within(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.collect_focusable(root, &mut out);
        out
    }

    fn is_connected(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focusable_document_order() {
        let mut tree = ElementTree::new();
        let dialog = tree.append(None, "dialog", false);
        let a = tree.append(Some(dialog), "a", true);
        let group = tree.append(Some(dialog), "group", false);
        let b = tree.append(Some(group), "b", true);
        let c = tree.append(Some(dialog), "c", true);

        assert_eq!(tree.focusable_within(dialog), vec![a, b, c]);
    }

    #[test]
    fn test_remove_drops_subtree_and_focus() {
        let mut tree = ElementTree::new();
        let section = tree.append(None, "section", false);
        let button = tree.append(Some(section), "button", true);
        tree.focus(button);

        tree.remove(section);
        assert!(!tree.is_connected(section));
        assert!(!tree.is_connected(button));
        assert_eq!(tree.active_element(), None);
    }

    #[test]
    fn test_focus_ignores_unknown() {
        let mut tree = ElementTree::new();
        tree.focus(ElementId(99));
        assert_eq!(tree.active_element(), None);
    }

    #[test]
    fn test_rect_contains_and_center() {
        let rect = Rect::new(10.0, 10.0, 20.0, 10.0);
        assert_eq!(rect.center(), (20.0, 15.0));
        assert!(rect.contains(10.0, 20.0));
        assert!(!rect.contains(31.0, 15.0));
    }
}
