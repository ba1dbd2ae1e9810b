//! Category filter over a static collection (portfolio grids, menus)
//!
//! The active category is either "All" or one of the categories present in
//! the collection. Reveal handles for the visible subset are owned here so a
//! category change disposes the outgoing set before the incoming one is
//! subscribed.

use std::time::Instant;

use tracing::debug;

use crate::dom::ElementId;
use crate::motion::{RevealController, RevealHandle, RevealOptions, ViewportProbe};

/// Label of the catch-all tab
pub const ALL: &str = "All";

/// Items that belong to exactly one category
pub trait Categorized {
    fn category(&self) -> &str;
}

/// Result of applying the active filter
#[derive(Debug, PartialEq)]
pub enum FilterView<'a, T> {
    Items(Vec<&'a T>),
    /// No item matches; render an explicit empty state
    Empty { category: &'a str },
}

impl<'a, T> FilterView<'a, T> {
    pub fn len(&self) -> usize {
        match self {
            FilterView::Items(items) => items.len(),
            FilterView::Empty { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub struct FilterableCollection<T> {
    items: Vec<T>,
    categories: Vec<String>,
    /// `None` is "All"
    active: Option<String>,
    generation: u64,
    mounted: Vec<RevealHandle>,
}

impl<T: Categorized> FilterableCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        let categories = Self::collect_categories(&items);
        Self {
            items,
            categories,
            active: None,
            generation: 0,
            mounted: Vec::new(),
        }
    }

    fn collect_categories(items: &[T]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for item in items {
            let category = item.category();
            if !out.iter().any(|c| c == category) {
                out.push(category.to_string());
            }
        }
        out
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Categories present in the collection, first-seen order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Tab labels: "All" followed by the categories
    pub fn tabs(&self) -> Vec<&str> {
        std::iter::once(ALL)
            .chain(self.categories.iter().map(String::as_str))
            .collect()
    }

    pub fn active_category(&self) -> &str {
        self.active.as_deref().unwrap_or(ALL)
    }

    /// Bumped once per applied change
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switch category; unknown names and no-change requests return `false`
    pub fn set_active_category(&mut self, name: &str) -> bool {
        let next = if name == ALL {
            None
        } else if self.categories.iter().any(|c| c == name) {
            Some(name.to_string())
        } else {
            debug!(category = name, "Ignoring unknown filter category");
            return false;
        };
        if next == self.active {
            return false;
        }
        self.unmount_reveals();
        self.active = next;
        self.generation += 1;
        true
    }

    /// Move to the next (or previous) tab, wrapping
    pub fn cycle(&mut self, forward: bool) -> bool {
        let tabs = self.tabs();
        let len = tabs.len();
        let current = tabs
            .iter()
            .position(|t| *t == self.active_category())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        let name = tabs[next].to_string();
        self.set_active_category(&name)
    }

    fn matches(&self, item: &T) -> bool {
        match &self.active {
            None => true,
            Some(active) => item.category() == active,
        }
    }

    /// Indices of visible items, in collection order
    pub fn visible_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(item))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn visible(&self) -> FilterView<'_, T> {
        let items: Vec<&T> = self.items.iter().filter(|item| self.matches(item)).collect();
        if items.is_empty() {
            FilterView::Empty {
                category: self.active_category(),
            }
        } else {
            FilterView::Items(items)
        }
    }

    /// Replace the collection; an active category that disappears resets to "All"
    pub fn set_items(&mut self, items: Vec<T>) {
        self.unmount_reveals();
        self.categories = Self::collect_categories(&items);
        self.items = items;
        if let Some(active) = &self.active {
            if !self.categories.contains(active) {
                debug!(category = %active, "Active category no longer available, showing all");
                self.active = None;
            }
        }
        self.generation += 1;
    }

    /// Subscribe reveals for the visible subset, replacing any mounted set
    pub fn mount_reveals<E, O>(
        &mut self,
        controller: &RevealController,
        probe: &dyn ViewportProbe,
        now: Instant,
        element_of: E,
        options_for: O,
    ) where
        E: Fn(usize, &T) -> ElementId,
        O: Fn(usize) -> RevealOptions,
    {
        self.unmount_reveals();
        let visible = self.visible_indices();
        let mut handles = Vec::with_capacity(visible.len());
        for (position, index) in visible.into_iter().enumerate() {
            let element = element_of(index, &self.items[index]);
            handles.push(controller.subscribe(element, options_for(position), probe, now));
        }
        self.mounted = handles;
    }

    /// Drop every mounted reveal handle
    pub fn unmount_reveals(&mut self) {
        if !self.mounted.is_empty() {
            debug!(count = self.mounted.len(), "Disposing filtered reveal handles");
            self.mounted.clear();
        }
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }
}
