//! Focus-trapped overlays (navigation drawers, dialogs, lightboxes)
//!
//! Lifecycle: Closed -> Opening -> Open -> Closing -> Closed. `open` and
//! `close` record requests; `settle` (called once per frame) performs the
//! focus work, so a close issued while opening waits until the initial focus
//! assignment has happened.
//!
//! While not Closed the overlay holds the trap lock, one scroll-lock
//! reference and one Escape-listener reference. They are guards: dropping the
//! overlay releases them on every exit path.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::config::OverlayConfig;
use crate::dom::{ElementId, FocusHost, Key};
use crate::resources::{RefGuard, SharedResources, TrapGuard};

static NEXT_OVERLAY_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Result of an open request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Transition started; focus moves on the next `settle`
    Opening,
    /// Already opening or open
    AlreadyOpen,
    /// Another overlay holds the trap lock
    Rejected { holder: u64 },
    /// Nothing to show (empty carousel)
    Empty,
}

/// Dialog semantics exposed on the rendered overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayAria {
    pub role: &'static str,
    pub modal: bool,
    pub label: String,
}

#[derive(Debug)]
struct OpenState {
    previously_focused: Option<ElementId>,
    trigger: Option<ElementId>,
    focusables: Vec<ElementId>,
    _trap: TrapGuard,
    _scroll_lock: RefGuard,
    _escape_listener: RefGuard,
}

/// Modal overlay that owns keyboard focus while open
#[derive(Debug)]
pub struct FocusTrapOverlay {
    id: u64,
    root: ElementId,
    label: String,
    config: OverlayConfig,
    resources: SharedResources,
    phase: OverlayPhase,
    state: Option<OpenState>,
    close_pending: bool,
}

impl FocusTrapOverlay {
    pub fn new(
        root: ElementId,
        label: impl Into<String>,
        config: OverlayConfig,
        resources: SharedResources,
    ) -> Self {
        Self {
            id: NEXT_OVERLAY_ID.fetch_add(1, Ordering::Relaxed),
            root,
            label: label.into(),
            config,
            resources,
            phase: OverlayPhase::Closed,
            state: None,
            close_pending: false,
        }
    }

    /// Overlay using default config and the process-wide resources
    pub fn with_defaults(root: ElementId, label: impl Into<String>) -> Self {
        Self::new(root, label, OverlayConfig::default(), SharedResources::global())
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Opening or open: render as open, route keys here
    pub fn is_open(&self) -> bool {
        matches!(self.phase, OverlayPhase::Opening | OverlayPhase::Open)
    }

    /// Anything but Closed: keep it on screen (exit transitions included)
    pub fn is_visible(&self) -> bool {
        self.phase != OverlayPhase::Closed
    }

    pub fn holds_trap(&self) -> bool {
        self.state.is_some()
    }

    /// Focus targets in trap order
    pub fn focusables(&self) -> &[ElementId] {
        self.state
            .as_ref()
            .map(|s| s.focusables.as_slice())
            .unwrap_or(&[])
    }

    pub fn aria(&self) -> OverlayAria {
        OverlayAria {
            role: "dialog",
            modal: true,
            label: self.label.clone(),
        }
    }

    /// Request opening; `trigger` is the control that asked for it
    pub fn open<H: FocusHost + ?Sized>(&mut self, host: &H, trigger: Option<ElementId>) -> OpenOutcome {
        match self.phase {
            OverlayPhase::Opening | OverlayPhase::Open => {
                // A pending close loses to a fresh open request
                self.close_pending = false;
                return OpenOutcome::AlreadyOpen;
            }
            OverlayPhase::Closing => {
                debug!(overlay = self.id, "Reopening overlay during close");
                self.phase = OverlayPhase::Opening;
                return OpenOutcome::Opening;
            }
            OverlayPhase::Closed => {}
        }

        let Some(trap) = self.resources.trap.try_acquire(self.id) else {
            let holder = self.resources.trap.holder().unwrap_or_default();
            warn!(
                overlay = self.id,
                holder,
                label = %self.label,
                "Ignoring open request: another overlay holds the focus trap"
            );
            return OpenOutcome::Rejected { holder };
        };

        let focusables = host.focusable_within(self.root);
        debug!(overlay = self.id, focusables = focusables.len(), "Opening overlay");
        self.state = Some(OpenState {
            previously_focused: host.active_element(),
            trigger,
            focusables,
            _trap: trap,
            _scroll_lock: self.resources.scroll_lock.acquire(),
            _escape_listener: self.resources.escape_listener.acquire(),
        });
        self.phase = OverlayPhase::Opening;
        self.close_pending = false;
        OpenOutcome::Opening
    }

    /// Request closing; deferred while the opening focus assignment is pending
    pub fn close(&mut self) -> bool {
        match self.phase {
            OverlayPhase::Opening => {
                self.close_pending = true;
                true
            }
            OverlayPhase::Open => {
                self.phase = OverlayPhase::Closing;
                true
            }
            OverlayPhase::Closing | OverlayPhase::Closed => false,
        }
    }

    /// Frame step: completes pending transitions, returns the new phase
    pub fn settle<H: FocusHost + ?Sized>(&mut self, host: &mut H) -> OverlayPhase {
        match self.phase {
            OverlayPhase::Opening => {
                let target = self.initial_focus_target();
                host.focus(target);
                self.phase = OverlayPhase::Open;
                if std::mem::take(&mut self.close_pending) {
                    debug!(overlay = self.id, "Running close deferred during open");
                    self.phase = OverlayPhase::Closing;
                }
            }
            OverlayPhase::Closing => self.finish_close(host),
            OverlayPhase::Open | OverlayPhase::Closed => {}
        }
        self.phase
    }

    /// Recompute the focusable list (overlay content changed while open)
    pub fn refresh_focusables<H: FocusHost + ?Sized>(&mut self, host: &H) {
        if let Some(state) = self.state.as_mut() {
            state.focusables = host.focusable_within(self.root);
        }
    }

    /// Keyboard handling while open; returns whether the key was consumed
    ///
    /// Escape during Opening is accepted and runs once focus has been assigned.
    pub fn handle_key<H: FocusHost + ?Sized>(&mut self, key: Key, host: &mut H) -> bool {
        match self.phase {
            OverlayPhase::Open => {}
            OverlayPhase::Opening => {
                return key == Key::Escape && self.config.close_on_escape && self.close();
            }
            OverlayPhase::Closing | OverlayPhase::Closed => return false,
        }
        match key {
            Key::Tab => {
                self.cycle_focus(host, true);
                true
            }
            Key::BackTab => {
                self.cycle_focus(host, false);
                true
            }
            Key::Escape if self.config.close_on_escape => self.close(),
            _ => false,
        }
    }

    /// Backdrop click
    pub fn click_scrim(&mut self) -> bool {
        if self.phase == OverlayPhase::Open && self.config.close_on_scrim {
            self.close()
        } else {
            false
        }
    }

    /// Pull focus back if the host moved it outside the trap
    pub fn focus_changed<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        if self.phase != OverlayPhase::Open {
            return;
        }
        let active = host.active_element();
        let inside = active.is_some_and(|a| a == self.root || self.focusables().contains(&a));
        if !inside {
            debug!(overlay = self.id, "Focus escaped the trap, restoring");
            let target = self.initial_focus_target();
            host.focus(target);
        }
    }

    fn initial_focus_target(&self) -> ElementId {
        self.focusables().first().copied().unwrap_or(self.root)
    }

    fn cycle_focus<H: FocusHost + ?Sized>(&self, host: &mut H, forward: bool) {
        let list = self.focusables();
        if list.is_empty() {
            host.focus(self.root);
            return;
        }
        let len = list.len();
        let next = match host.active_element().and_then(|a| list.iter().position(|e| *e == a)) {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        host.focus(list[next]);
    }

    fn finish_close<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        // Dropping the state releases the trap, scroll lock and listener
        if let Some(state) = self.state.take() {
            let restore = state
                .previously_focused
                .filter(|e| host.is_connected(*e))
                .or(state.trigger.filter(|e| host.is_connected(*e)));
            match restore {
                Some(element) => host.focus(element),
                None => {
                    // Focus must not stay inside a closed overlay
                    debug!(overlay = self.id, "No focus target left to restore, blurring");
                    host.blur();
                }
            }
        }
        self.phase = OverlayPhase::Closed;
        self.close_pending = false;
        debug!(overlay = self.id, "Overlay closed");
    }
}

impl Drop for FocusTrapOverlay {
    fn drop(&mut self) {
        if self.state.is_some() {
            debug!(overlay = self.id, phase = ?self.phase, "Overlay dropped while active, releasing resources");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementTree;

    struct Fixture {
        tree: ElementTree,
        trigger: ElementId,
        dialog: ElementId,
        links: Vec<ElementId>,
        resources: SharedResources,
    }

    fn fixture() -> Fixture {
        let mut tree = ElementTree::new();
        let page = tree.append(None, "page", false);
        let trigger = tree.append(Some(page), "menu-button", true);
        let dialog = tree.append(None, "drawer", false);
        let links = (0..3)
            .map(|i| tree.append(Some(dialog), format!("link-{i}"), true))
            .collect();
        tree.focus(trigger);
        Fixture {
            tree,
            trigger,
            dialog,
            links,
            resources: SharedResources::new(),
        }
    }

    fn overlay(f: &Fixture) -> FocusTrapOverlay {
        FocusTrapOverlay::new(f.dialog, "Main menu", OverlayConfig::default(), f.resources.clone())
    }

    #[test]
    fn test_open_focuses_first_and_locks_scroll() {
        let mut f = fixture();
        let mut o = overlay(&f);

        assert_eq!(o.open(&f.tree, Some(f.trigger)), OpenOutcome::Opening);
        assert!(f.resources.is_scroll_locked());
        assert_eq!(o.settle(&mut f.tree), OverlayPhase::Open);
        assert_eq!(f.tree.active_element(), Some(f.links[0]));
    }

    #[test]
    fn test_tab_wraps_both_ways() {
        let mut f = fixture();
        let mut o = overlay(&f);
        o.open(&f.tree, None);
        o.settle(&mut f.tree);

        o.handle_key(Key::BackTab, &mut f.tree);
        assert_eq!(f.tree.active_element(), Some(f.links[2]));
        o.handle_key(Key::Tab, &mut f.tree);
        assert_eq!(f.tree.active_element(), Some(f.links[0]));
    }

    #[test]
    fn test_escape_closes_and_restores_focus() {
        let mut f = fixture();
        let mut o = overlay(&f);
        o.open(&f.tree, Some(f.trigger));
        o.settle(&mut f.tree);

        assert!(o.handle_key(Key::Escape, &mut f.tree));
        assert_eq!(o.phase(), OverlayPhase::Closing);
        o.settle(&mut f.tree);
        assert_eq!(o.phase(), OverlayPhase::Closed);
        assert_eq!(f.tree.active_element(), Some(f.trigger));
        assert!(!f.resources.is_scroll_locked());
        assert_eq!(f.resources.trap.holder(), None);
    }

    #[test]
    fn test_close_during_opening_is_deferred() {
        let mut f = fixture();
        let mut o = overlay(&f);
        o.open(&f.tree, None);
        assert!(o.close());
        assert_eq!(o.phase(), OverlayPhase::Opening);

        // Focus assignment still happens before closing begins
        o.settle(&mut f.tree);
        assert_eq!(o.phase(), OverlayPhase::Closing);
        o.settle(&mut f.tree);
        assert_eq!(f.tree.active_element(), Some(f.trigger));
    }

    #[test]
    fn test_escape_while_opening_closes_after_focus() {
        let mut f = fixture();
        let mut o = overlay(&f);
        o.open(&f.tree, Some(f.trigger));

        assert!(o.handle_key(Key::Escape, &mut f.tree));
        assert!(!o.handle_key(Key::Tab, &mut f.tree));
        assert_eq!(o.settle(&mut f.tree), OverlayPhase::Closing);
        assert_eq!(o.settle(&mut f.tree), OverlayPhase::Closed);
        assert_eq!(f.tree.active_element(), Some(f.trigger));
    }

    #[test]
    fn test_escape_while_opening_respects_config() {
        let mut f = fixture();
        let config = OverlayConfig {
            close_on_escape: false,
            ..Default::default()
        };
        let mut o = FocusTrapOverlay::new(f.dialog, "Menu", config, f.resources.clone());
        o.open(&f.tree, None);

        assert!(!o.handle_key(Key::Escape, &mut f.tree));
        assert_eq!(o.settle(&mut f.tree), OverlayPhase::Open);
    }

    #[test]
    fn test_close_without_prior_focus_clears_focus() {
        let mut f = fixture();
        f.tree.blur();
        let mut o = overlay(&f);
        o.open(&f.tree, None);
        o.settle(&mut f.tree);
        assert_eq!(f.tree.active_element(), Some(f.links[0]));

        o.close();
        o.settle(&mut f.tree);
        assert_eq!(f.tree.active_element(), None);
    }

    #[test]
    fn test_focus_round_trip() {
        let mut f = fixture();
        let before = [None, Some(f.trigger), Some(f.links[1])];
        for prior in before {
            match prior {
                Some(id) => f.tree.focus(id),
                None => f.tree.blur(),
            }
            let mut o = overlay(&f);
            o.open(&f.tree, None);
            o.settle(&mut f.tree);
            o.close();
            o.settle(&mut f.tree);
            assert_eq!(f.tree.active_element(), prior, "prior focus {prior:?}");
        }
    }

    #[test]
    fn test_mixed_tab_sequence_stays_trapped() {
        let mut f = fixture();
        let mut o = overlay(&f);
        o.open(&f.tree, Some(f.trigger));
        o.settle(&mut f.tree);

        let presses = [
            Key::Tab, Key::Tab, Key::BackTab, Key::Tab, Key::Tab, Key::Tab,
            Key::BackTab, Key::BackTab, Key::BackTab, Key::BackTab, Key::Tab,
        ];
        let mut expected = 0usize;
        for key in presses {
            assert!(o.handle_key(key, &mut f.tree));
            expected = match key {
                Key::Tab => (expected + 1) % f.links.len(),
                _ => (expected + f.links.len() - 1) % f.links.len(),
            };
            let active = f.tree.active_element();
            assert!(active.is_some_and(|a| o.focusables().contains(&a)));
            assert_eq!(active, Some(f.links[expected]));
        }
    }

    #[test]
    fn test_empty_overlay_focuses_root() {
        let mut tree = ElementTree::new();
        let dialog = tree.append(None, "empty", false);
        let resources = SharedResources::new();
        let mut o = FocusTrapOverlay::new(dialog, "Empty", OverlayConfig::default(), resources);
        o.open(&tree, None);
        o.settle(&mut tree);
        assert_eq!(tree.active_element(), Some(dialog));

        o.handle_key(Key::Tab, &mut tree);
        assert_eq!(tree.active_element(), Some(dialog));
    }

    #[test]
    fn test_second_overlay_rejected() {
        let mut f = fixture();
        let mut first = overlay(&f);
        let mut second = overlay(&f);
        first.open(&f.tree, None);
        first.settle(&mut f.tree);

        assert_eq!(second.open(&f.tree, None), OpenOutcome::Rejected { holder: first.id() });
        assert!(!second.is_open());
        assert_eq!(f.tree.active_element(), Some(f.links[0]));
    }

    #[test]
    fn test_restore_falls_back_to_trigger() {
        let mut f = fixture();
        let other = f.tree.append(None, "search", true);
        f.tree.focus(other);
        let mut o = overlay(&f);
        o.open(&f.tree, Some(f.trigger));
        o.settle(&mut f.tree);

        f.tree.remove(other);
        o.close();
        o.settle(&mut f.tree);
        assert_eq!(f.tree.active_element(), Some(f.trigger));
    }

    #[test]
    fn test_scrim_click_respects_config() {
        let mut f = fixture();
        let config = OverlayConfig {
            close_on_scrim: false,
            ..Default::default()
        };
        let mut o = FocusTrapOverlay::new(f.dialog, "Menu", config, f.resources.clone());
        o.open(&f.tree, None);
        o.settle(&mut f.tree);
        assert!(!o.click_scrim());
        assert!(o.is_open());
    }

    #[test]
    fn test_focus_escape_is_pulled_back() {
        let mut f = fixture();
        let mut o = overlay(&f);
        o.open(&f.tree, None);
        o.settle(&mut f.tree);

        f.tree.focus(f.trigger);
        o.focus_changed(&mut f.tree);
        assert_eq!(f.tree.active_element(), Some(f.links[0]));
    }

    #[test]
    fn test_drop_mid_transition_releases_everything() {
        let f = fixture();
        let mut o = overlay(&f);
        o.open(&f.tree, None);
        assert_eq!(f.resources.escape_listener.count(), 1);

        drop(o);
        assert_eq!(f.resources.escape_listener.count(), 0);
        assert!(!f.resources.is_scroll_locked());
        assert_eq!(f.resources.trap.holder(), None);
    }

    #[test]
    fn test_aria_contract() {
        let f = fixture();
        let o = overlay(&f);
        let aria = o.aria();
        assert_eq!(aria.role, "dialog");
        assert!(aria.modal);
        assert_eq!(aria.label, "Main menu");
    }
}
