//! End-to-end behaviour of the interaction layer against the in-memory host

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use vitrine_core::config::{OverlayConfig, ReducedMotionMode};
use vitrine_core::motion::{
    AnimationDescriptor, EasingType, IntersectionEntry, ReducedMotionGate, RegionGeometry,
    RevealController, RevealOptions, ScrollLink, ScrollLinkOptions, StyleValues,
};
use vitrine_core::template::{self, Work};
use vitrine_core::ui::{
    Carousel, DisclosureGroup, DisclosureMode, FilterView, FilterableCollection, FocusTrapOverlay,
    OpenOutcome, OverlayPhase,
};
use vitrine_core::{ElementId, ElementTree, FocusHost, Key, SharedResources};

fn fade_up() -> RevealOptions {
    RevealOptions::new(AnimationDescriptor::fade_up(
        24.0,
        Duration::from_millis(600),
        EasingType::Cubic,
    ))
}

fn hidden(_: ElementId) -> Option<f64> {
    Some(0.0)
}

fn half_visible(_: ElementId) -> Option<f64> {
    Some(0.5)
}

struct Page {
    tree: ElementTree,
    menu_button: ElementId,
    drawer: ElementId,
    drawer_links: Vec<ElementId>,
    lightbox: ElementId,
}

fn page() -> Page {
    let mut tree = ElementTree::new();
    let header = tree.append(None, "header", false);
    let menu_button = tree.append(Some(header), "menu", true);
    let drawer = tree.append(None, "drawer", false);
    let drawer_links = ["Menu", "Story", "Gallery", "Reservations"]
        .into_iter()
        .map(|label| tree.append(Some(drawer), label, true))
        .collect();
    let lightbox = tree.append(None, "lightbox", false);
    tree.append(Some(lightbox), "previous", true);
    tree.append(Some(lightbox), "next", true);
    tree.append(Some(lightbox), "close", true);
    tree.focus(menu_button);
    Page {
        tree,
        menu_button,
        drawer,
        drawer_links,
        lightbox,
    }
}

#[test]
fn reveal_fires_once_for_non_repeatable() {
    let controller = RevealController::new(ReducedMotionGate::default());
    let card = ElementId(1);
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    let now = Instant::now();

    let _handle = controller.subscribe(
        card,
        fade_up().threshold(0.2).on_reveal(move |_| seen.set(seen.get() + 1)),
        &hidden,
        now,
    );

    controller.on_intersections(&[IntersectionEntry::new(card, 0.3)], now);
    let style = controller.style_at(card, now).unwrap();
    assert!((style.opacity - 0.0).abs() < 1e-9);
    assert!((style.translate_y - 24.0).abs() < 1e-9);

    let later = now + Duration::from_millis(600);
    assert_eq!(controller.style_at(card, later), Some(StyleValues::VISIBLE));

    controller.on_intersections(&[IntersectionEntry::new(card, 0.0)], later);
    controller.on_intersections(&[IntersectionEntry::new(card, 0.5)], later);
    assert_eq!(count.get(), 1);
    assert_eq!(controller.style_at(card, later), Some(StyleValues::VISIBLE));
}

#[test]
fn reduced_motion_reveals_without_transition() {
    let gate = ReducedMotionGate::new(ReducedMotionMode::Auto);
    gate.set_platform_preference(Some(true));
    let controller = RevealController::new(gate);
    let now = Instant::now();
    let cards: Vec<_> = (0..10).map(ElementId).collect();
    let handles: Vec<_> = cards
        .iter()
        .map(|c| controller.subscribe(*c, fade_up(), &hidden, now))
        .collect();

    for card in &cards {
        assert_eq!(controller.style_at(*card, now), Some(StyleValues::VISIBLE));
    }
    assert!(!controller.needs_frames(now));
    drop(handles);
}

#[test]
fn dropped_handle_ignores_late_signals() {
    let controller = RevealController::new(ReducedMotionGate::default());
    let card = ElementId(7);
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let now = Instant::now();

    let handle = controller.subscribe(card, fade_up().on_reveal(move |_| flag.set(true)), &hidden, now);
    drop(handle);

    controller.on_intersections(&[IntersectionEntry::new(card, 1.0)], now);
    assert!(!fired.get());
    assert_eq!(controller.style_at(card, now), None);
    assert_eq!(controller.observed_count(), 0);
}

#[test]
fn initially_visible_element_reveals_on_subscribe() {
    let controller = RevealController::new(ReducedMotionGate::default());
    let now = Instant::now();
    let _handle = controller.subscribe(ElementId(3), fade_up(), &half_visible, now);
    assert!(controller.is_revealed(ElementId(3)));
}

#[test]
fn drawer_focus_round_trip() {
    let mut p = page();
    let resources = SharedResources::new();
    let mut drawer = FocusTrapOverlay::new(p.drawer, "Main menu", OverlayConfig::default(), resources.clone());

    assert_eq!(drawer.open(&p.tree, Some(p.menu_button)), OpenOutcome::Opening);
    drawer.settle(&mut p.tree);
    assert_eq!(p.tree.active_element(), Some(p.drawer_links[0]));
    assert!(resources.is_scroll_locked());

    // Tab through every link and wrap back to the first
    for expected in p.drawer_links.iter().skip(1).chain(p.drawer_links.first()) {
        drawer.handle_key(Key::Tab, &mut p.tree);
        assert_eq!(p.tree.active_element(), Some(*expected));
    }

    drawer.handle_key(Key::Escape, &mut p.tree);
    assert_eq!(drawer.settle(&mut p.tree), OverlayPhase::Closed);
    assert_eq!(p.tree.active_element(), Some(p.menu_button));
    assert!(!resources.is_scroll_locked());
    assert_eq!(resources.escape_listener.count(), 0);
}

#[test]
fn drawer_mixed_tab_directions_stay_trapped() {
    let mut p = page();
    let mut drawer = FocusTrapOverlay::new(p.drawer, "Main menu", OverlayConfig::default(), SharedResources::new());
    drawer.open(&p.tree, Some(p.menu_button));
    drawer.settle(&mut p.tree);

    // Bits of the pattern pick the direction of each press
    let pattern: u64 = 0b1011_0010_1110_0110_1001_1100_0101_1011;
    for bit in 0..32 {
        let key = if pattern >> bit & 1 == 1 { Key::Tab } else { Key::BackTab };
        let before = p.tree.active_element();
        assert!(drawer.handle_key(key, &mut p.tree));

        let after = p.tree.active_element().expect("focus stays assigned");
        assert!(drawer.focusables().contains(&after), "press {bit} left the drawer");
        assert_ne!(before, Some(after));
    }

    drawer.close();
    drawer.settle(&mut p.tree);
    assert_eq!(p.tree.active_element(), Some(p.menu_button));
}

#[test]
fn escape_before_first_frame_still_closes() {
    let mut p = page();
    let resources = SharedResources::new();
    let mut drawer = FocusTrapOverlay::new(p.drawer, "Main menu", OverlayConfig::default(), resources.clone());

    drawer.open(&p.tree, Some(p.menu_button));
    assert!(drawer.handle_key(Key::Escape, &mut p.tree));
    assert_eq!(drawer.settle(&mut p.tree), OverlayPhase::Closing);
    assert_eq!(drawer.settle(&mut p.tree), OverlayPhase::Closed);
    assert_eq!(p.tree.active_element(), Some(p.menu_button));
    assert_eq!(resources.trap.holder(), None);
}

#[test]
fn only_one_overlay_traps_focus() {
    let mut p = page();
    let resources = SharedResources::new();
    let mut drawer = FocusTrapOverlay::new(p.drawer, "Main menu", OverlayConfig::default(), resources.clone());
    let lightbox = FocusTrapOverlay::new(p.lightbox, "Gallery", OverlayConfig::default(), resources.clone());
    let mut gallery = Carousel::new(vec!["a", "b"], lightbox);

    drawer.open(&p.tree, Some(p.menu_button));
    drawer.settle(&mut p.tree);

    assert!(matches!(gallery.open(0, &p.tree, None), OpenOutcome::Rejected { .. }));
    assert!(!gallery.is_open());
    assert_eq!(resources.trap.holder(), Some(drawer.id()));

    drawer.close();
    drawer.settle(&mut p.tree);
    assert_eq!(gallery.open(0, &p.tree, None), OpenOutcome::Opening);
}

#[test]
fn gallery_navigation_wraps() {
    let mut p = page();
    let lightbox = FocusTrapOverlay::new(p.lightbox, "Gallery", OverlayConfig::default(), SharedResources::new());
    let mut gallery = Carousel::new(vec!["a", "b", "c"], lightbox);

    gallery.open(1, &p.tree, None);
    gallery.settle(&mut p.tree);
    gallery.handle_key(Key::ArrowRight, &mut p.tree);
    gallery.handle_key(Key::ArrowRight, &mut p.tree);
    assert_eq!(gallery.current_index(), Some(0));
    gallery.handle_key(Key::ArrowLeft, &mut p.tree);
    assert_eq!(gallery.current_index(), Some(2));
    assert_eq!(gallery.position_label().as_deref(), Some("image 3 of 3"));
}

#[test]
fn faq_single_mode_scenario() {
    let mut faq = DisclosureGroup::new((1..=5).collect::<Vec<u32>>(), DisclosureMode::Single, [3]);
    faq.toggle(&1);
    assert_eq!(faq.open_ids(), vec![&1]);
    faq.toggle(&1);
    assert!(faq.open_ids().is_empty());
}

#[test]
fn template_works_filter_by_category() {
    let page = template::load("agency").unwrap();
    let mut works = FilterableCollection::new(page.works.clone());

    for category in works.categories().to_vec() {
        works.set_active_category(&category);
        let expected: Vec<&Work> = page.works.iter().filter(|w| w.category == category).collect();
        match works.visible() {
            FilterView::Items(items) => assert_eq!(items, expected),
            FilterView::Empty { .. } => panic!("category {category} should have items"),
        }
    }

    works.set_active_category("All");
    assert_eq!(works.visible().len(), page.works.len());
}

#[test]
fn parallax_is_monotonic_and_clamped() {
    let mut link = ScrollLink::new(ScrollLinkOptions::new((0.0, -60.0)), ReducedMotionGate::default());
    link.measure(RegionGeometry::new(1000.0, 400.0, 800.0));

    let mut last = f64::MAX;
    for y in (0..=2400).step_by(100) {
        link.on_scroll(y as f64);
        let value = link.update();
        assert!(value <= last + 1e-9);
        assert!((-60.0..=0.0).contains(&value));
        last = value;
    }
}

#[test]
fn scroll_bursts_coalesce_to_one_update() {
    let mut link = ScrollLink::new(ScrollLinkOptions::new((0.0, 1.0)), ReducedMotionGate::default());
    link.measure(RegionGeometry::new(1000.0, 400.0, 800.0));

    let before = link.recomputations();
    for y in [300.0, 500.0, 700.0, 900.0] {
        link.on_scroll(y);
    }
    link.update();
    assert_eq!(link.recomputations(), before + 1);
}
