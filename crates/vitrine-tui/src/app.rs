use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEventKind};
use tracing::{debug, info};
use vitrine_core::dom::{ElementId, ElementTree, FocusHost, Key, Rect};
use vitrine_core::lifecycle::{FrameScheduler, Liveness};
use vitrine_core::motion::{
    AnimationDescriptor, CountUp, EasingType, IntersectionEntry, Magnetic, ReducedMotionGate,
    RegionGeometry, RevealController, RevealHandle, RevealOptions, ScrollLink, ScrollLinkOptions,
    StaticPreference, StyleValues,
};
use vitrine_core::template::{Media, Page, Work};
use vitrine_core::ui::{
    Carousel, DisclosureGroup, FilterableCollection, FocusTrapOverlay, OpenOutcome, OverlayPhase,
    Stepper,
};
use vitrine_core::{AppConfig, SharedResources};

use crate::input::Action;
use crate::theme::Theme;
use crate::widgets::overlay::{drawer_area, lightbox_area};

/// Host pixels per terminal cell; motion values are in pixels
pub const PX_PER_CELL: f64 = 8.0;

pub const HERO_HEIGHT: u16 = 9;
pub const MENU_ROW: u16 = 4;
pub const CTA_ROW: u16 = 6;
pub const CTA_COL: u16 = 4;
pub const CARD_HEIGHT: u16 = 4;
pub const CARDS_PER_ROW: usize = 3;
const STATS_HEIGHT: u16 = 5;
const ENQUIRY_HEIGHT: u16 = 7;
const ENQUIRY_BUTTON_ROW: u16 = 5;
const FOOTER_HEIGHT: u16 = 3;
const COUNT_UP_DURATION: Duration = Duration::from_millis(1200);

/// Page sections in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Stats,
    Works,
    Faq,
    Gallery,
    Enquiry,
    Footer,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Hero,
        Section::Stats,
        Section::Works,
        Section::Faq,
        Section::Gallery,
        Section::Enquiry,
        Section::Footer,
    ];

    /// Where each navigation drawer link scrolls to
    const NAV_TARGETS: [Section; 4] = [Section::Works, Section::Faq, Section::Gallery, Section::Enquiry];

    fn label(&self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::Stats => "stats",
            Section::Works => "works",
            Section::Faq => "faq",
            Section::Gallery => "gallery",
            Section::Enquiry => "enquiry",
            Section::Footer => "footer",
        }
    }
}

/// Position of a section in document rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBox {
    pub section: Section,
    pub top: u16,
    pub height: u16,
}

/// Interactive element kinds on the page and in overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Menu,
    Cta,
    FilterTab(usize),
    FaqTrigger(usize),
    Thumbnail(usize),
    StepBack,
    StepNext,
    DrawerLink(usize),
    DrawerClose,
    LightboxPrev,
    LightboxNext,
    LightboxClose,
}

/// Host elements backing the page
#[derive(Debug, Clone)]
pub struct PageElements {
    pub page_root: ElementId,
    pub sections: Vec<(Section, ElementId)>,
    pub menu_button: ElementId,
    pub cta: ElementId,
    pub tabs: Vec<ElementId>,
    pub works: Vec<ElementId>,
    pub faqs: Vec<ElementId>,
    pub thumbnails: Vec<ElementId>,
    pub step_back: ElementId,
    pub step_next: ElementId,
    pub drawer_root: ElementId,
    pub drawer_links: Vec<ElementId>,
    pub drawer_close: ElementId,
    pub lightbox_root: ElementId,
    pub lightbox_prev: ElementId,
    pub lightbox_next: ElementId,
    pub lightbox_close: ElementId,
}

impl PageElements {
    pub fn section(&self, section: Section) -> ElementId {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, id)| *id)
            .unwrap_or(self.page_root)
    }
}

/// Command-line toggles for the preview
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewOptions {
    /// Report a reduced-motion platform preference
    pub reduced_motion: bool,
    /// Simulate a touch device (no magnetic effect)
    pub coarse_pointer: bool,
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub page: Page,
    pub theme: Theme,
    pub gate: ReducedMotionGate,
    pub resources: SharedResources,
    pub tree: ElementTree,
    pub elements: PageElements,
    controls: HashMap<ElementId, Control>,
    /// Filter tab labels, "All" first
    pub tabs: Vec<String>,
    pub reveals: RevealController,
    section_reveals: Vec<RevealHandle>,
    pub works: FilterableCollection<Work>,
    pub faq: DisclosureGroup<usize>,
    pub gallery: Carousel<Media>,
    pub drawer: FocusTrapOverlay,
    pub hero: ScrollLink,
    pub cta: Magnetic,
    pub stats: Vec<CountUp>,
    pub stepper: Stepper<&'static str>,
    /// First document row shown in the content area
    pub scroll_y: u16,
    /// Terminal size (columns, rows)
    pub screen: (u16, u16),
    pub status_message: Option<String>,
    pub should_quit: bool,
    revealed_sections: Rc<Cell<usize>>,
    pending_jump: Rc<Cell<Option<Section>>>,
    frames: FrameScheduler,
    liveness: Liveness,
    last_frame: Option<Instant>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, page: Page, options: PreviewOptions) -> Self {
        // Terminals expose no motion preference; the flag stands in for one
        let source = StaticPreference(options.reduced_motion.then_some(true));
        let gate = ReducedMotionGate::from_source(config.motion.reduced_motion, &source);
        let resources = SharedResources::new();

        let works = FilterableCollection::new(page.works.clone());
        let tabs: Vec<String> = works.tabs().into_iter().map(String::from).collect();
        let (tree, elements, controls) = build_tree(&page, &tabs);

        let drawer = FocusTrapOverlay::new(
            elements.drawer_root,
            "Site navigation",
            config.overlay.clone(),
            resources.clone(),
        );
        let lightbox = FocusTrapOverlay::new(
            elements.lightbox_root,
            format!("{} gallery", page.info.title),
            config.overlay.clone(),
            resources.clone(),
        );
        let gallery = Carousel::new(page.gallery.clone(), lightbox);
        let faq = DisclosureGroup::new((0..page.faqs.len()).collect(), config.ui.faq_mode, [0]);

        let hero = ScrollLink::new(ScrollLinkOptions::parallax(&config.scroll), gate.clone());
        let mut cta = Magnetic::new(config.magnetic.clone(), gate.clone());
        cta.set_coarse_pointer(options.coarse_pointer || config.motion.coarse_pointer);

        let stats = page
            .stats
            .iter()
            .map(|s| CountUp::new(s.value, COUNT_UP_DURATION, EasingType::EaseOut, gate.clone()))
            .collect();
        let stepper = Stepper::new(page.steps.clone());
        let theme = Theme::for_template(page.info.name, config.ui.accent.as_deref());
        let reveals = RevealController::with_root(gate.clone(), elements.page_root);

        let mut app = Self {
            config,
            page,
            theme,
            gate,
            resources,
            tree,
            elements,
            controls,
            tabs,
            reveals,
            section_reveals: Vec::new(),
            works,
            faq,
            gallery,
            drawer,
            hero,
            cta,
            stats,
            stepper,
            scroll_y: 0,
            screen: (80, 24),
            status_message: None,
            should_quit: false,
            revealed_sections: Rc::new(Cell::new(0)),
            pending_jump: Rc::new(Cell::new(None)),
            frames: FrameScheduler::new(),
            liveness: Liveness::new(),
            last_frame: None,
        };
        app.set_screen(80, 24);
        app
    }

    /// Subscribe every section and the visible grid for reveal
    pub fn mount(&mut self, now: Instant) {
        let probe = self.probe();
        let reveal = &self.config.reveal;
        let mut handles = Vec::with_capacity(Section::ALL.len());
        for (section, element) in &self.elements.sections {
            let animation = match section {
                Section::Gallery | Section::Stats => AnimationDescriptor::zoom_in(
                    0.95,
                    Duration::from_millis(reveal.duration_ms),
                    reveal.easing,
                ),
                _ => AnimationDescriptor::from_config(reveal),
            };
            let counter = Rc::clone(&self.revealed_sections);
            let options = RevealOptions::from_config(reveal)
                .animation(animation)
                .on_reveal(move |_| counter.set(counter.get() + 1));
            handles.push(self.reveals.subscribe(*element, options, &probe, now));
        }
        self.section_reveals = handles;
        self.mount_work_reveals(now);
        info!(
            template = self.page.info.name,
            sections = self.section_reveals.len(),
            observed = self.reveals.observed_count(),
            "Mounted template preview"
        );
    }

    fn mount_work_reveals(&mut self, now: Instant) {
        let probe = self.probe();
        let reveal = self.config.reveal.clone();
        let stagger = Duration::from_millis(reveal.stagger_ms);
        let work_ids = &self.elements.works;
        self.works.mount_reveals(
            &self.reveals,
            &probe,
            now,
            |index, _| work_ids[index],
            |position| {
                RevealOptions::from_config(&reveal)
                    .animation(AnimationDescriptor::from_config(&reveal).staggered(position, stagger))
            },
        );
    }

    /// Number of sections that have fired their reveal
    pub fn revealed_sections(&self) -> usize {
        self.revealed_sections.get()
    }

    pub fn set_screen(&mut self, width: u16, height: u16) {
        self.screen = (width, height);
        let viewport = f64::from(self.content_height());
        self.hero.measure(RegionGeometry::new(0.0, f64::from(HERO_HEIGHT), viewport));
        let max = self.max_scroll();
        if self.scroll_y > max {
            self.set_scroll(max);
        } else {
            self.hero.on_scroll(f64::from(self.scroll_y));
        }
    }

    /// Rows available to the page (status bar excluded)
    pub fn content_height(&self) -> u16 {
        self.screen.1.saturating_sub(1).max(1)
    }

    // ---------------------------------------------------------------
    // Layout (host geometry)
    // ---------------------------------------------------------------

    pub fn layout(&self) -> Vec<SectionBox> {
        let mut top = 0u16;
        Section::ALL
            .iter()
            .map(|section| {
                let height = self.section_height(*section);
                let boxed = SectionBox {
                    section: *section,
                    top,
                    height,
                };
                top = top.saturating_add(height);
                boxed
            })
            .collect()
    }

    pub fn section_box(&self, section: Section) -> SectionBox {
        self.layout()
            .into_iter()
            .find(|b| b.section == section)
            .unwrap_or(SectionBox {
                section,
                top: 0,
                height: 0,
            })
    }

    fn section_height(&self, section: Section) -> u16 {
        match section {
            Section::Hero => HERO_HEIGHT,
            Section::Stats => STATS_HEIGHT,
            Section::Works => {
                let visible = self.works.visible_indices().len();
                let rows = if visible == 0 {
                    2
                } else {
                    visible.div_ceil(CARDS_PER_ROW) as u16 * CARD_HEIGHT
                };
                // Heading, tabs, blank, grid, separator
                4 + rows
            }
            Section::Faq => {
                let open = self.faq.open_ids().len() as u16;
                3 + self.page.faqs.len() as u16 + open * 2
            }
            Section::Gallery => 3 + self.page.gallery.len() as u16,
            Section::Enquiry => ENQUIRY_HEIGHT,
            Section::Footer => FOOTER_HEIGHT,
        }
    }

    pub fn document_height(&self) -> u16 {
        self.layout().iter().map(|b| b.height).sum()
    }

    pub fn max_scroll(&self) -> u16 {
        self.document_height().saturating_sub(self.content_height())
    }

    /// Document rows of every observable element
    fn geometry(&self) -> HashMap<ElementId, (u16, u16)> {
        let mut out = HashMap::new();
        for b in self.layout() {
            out.insert(self.elements.section(b.section), (b.top, b.height));
            if b.section == Section::Works {
                for (position, index) in self.works.visible_indices().into_iter().enumerate() {
                    let row = (position / CARDS_PER_ROW) as u16;
                    out.insert(self.elements.works[index], (b.top + 3 + row * CARD_HEIGHT, CARD_HEIGHT));
                }
            }
        }
        out
    }

    /// Visibility probe over the current layout and scroll offset
    fn probe(&self) -> impl Fn(ElementId) -> Option<f64> {
        let geometry = self.geometry();
        let scroll = self.scroll_y;
        let viewport = self.content_height();
        move |id: ElementId| {
            geometry
                .get(&id)
                .map(|(top, height)| visible_ratio(*top, *height, scroll, viewport))
        }
    }

    /// Document row of a page control
    fn control_row(&self, control: Control) -> Option<u16> {
        let row = match control {
            Control::Menu => self.section_box(Section::Hero).top + MENU_ROW,
            Control::Cta => self.section_box(Section::Hero).top + CTA_ROW,
            Control::FilterTab(_) => self.section_box(Section::Works).top + 1,
            Control::FaqTrigger(i) => {
                let before: u16 = (0..i).map(|j| if self.faq.is_open(&j) { 3 } else { 1 }).sum();
                self.section_box(Section::Faq).top + 2 + before
            }
            Control::Thumbnail(i) => self.section_box(Section::Gallery).top + 2 + i as u16,
            Control::StepBack | Control::StepNext => {
                self.section_box(Section::Enquiry).top + ENQUIRY_BUTTON_ROW
            }
            _ => return None,
        };
        Some(row)
    }

    /// Pointer-space bounds of the magnetic call to action
    pub fn cta_bounds(&self) -> Rect {
        let row = f64::from(self.section_box(Section::Hero).top + CTA_ROW) - f64::from(self.scroll_y);
        let width = self.page.cta.chars().count() as f64 + 4.0;
        Rect::new(
            f64::from(CTA_COL) * PX_PER_CELL,
            row * PX_PER_CELL,
            width * PX_PER_CELL,
            PX_PER_CELL,
        )
    }

    // ---------------------------------------------------------------
    // Presentation queries
    // ---------------------------------------------------------------

    pub fn section_style(&self, section: Section, now: Instant) -> StyleValues {
        self.reveals
            .style_at(self.elements.section(section), now)
            .unwrap_or(StyleValues::VISIBLE)
    }

    pub fn work_style(&self, index: usize, now: Instant) -> StyleValues {
        self.elements
            .works
            .get(index)
            .and_then(|id| self.reveals.style_at(*id, now))
            .unwrap_or(StyleValues::VISIBLE)
    }

    pub fn focused_control(&self) -> Option<Control> {
        self.tree
            .active_element()
            .and_then(|id| self.controls.get(&id).copied())
    }

    pub fn is_focused(&self, id: ElementId) -> bool {
        self.tree.active_element() == Some(id)
    }

    pub fn focus_label(&self) -> Option<&str> {
        self.tree.active_element().and_then(|id| self.tree.label(id))
    }

    pub fn overlay_active(&self) -> bool {
        self.drawer.is_visible() || self.gallery.is_visible()
    }

    pub fn motion_label(&self) -> &'static str {
        if self.gate.is_reduced() {
            "reduced"
        } else {
            "full"
        }
    }

    // ---------------------------------------------------------------
    // Frame loop
    // ---------------------------------------------------------------

    /// Advance every motion primitive; returns whether another frame is needed soon
    pub fn on_frame(&mut self, now: Instant) -> bool {
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);

        self.drawer.settle(&mut self.tree);
        self.gallery.settle(&mut self.tree);
        self.frames.run(now);
        if let Some(section) = self.pending_jump.take() {
            self.jump_to(section);
        }

        self.hero.update();
        self.cta.set_bounds(self.cta_bounds());
        self.cta.step(dt);

        let probe = self.probe();
        let entries: Vec<IntersectionEntry> = self
            .reveals
            .observed()
            .into_iter()
            .filter_map(|id| probe(id).map(|ratio| IntersectionEntry::new(id, ratio)))
            .collect();
        self.reveals.on_intersections(&entries, now);

        let stats_revealed = self.reveals.is_revealed(self.elements.section(Section::Stats));
        for counter in &mut self.stats {
            counter.sync(stats_revealed, now);
        }

        self.reveals.needs_frames(now)
            || !self.cta.is_settled()
            || self.hero.needs_update()
            || self.frames.has_pending()
            || is_transitioning(self.drawer.phase())
            || is_transitioning(self.gallery.overlay().phase())
            || self.stats.iter().any(|c| c.is_running(now))
    }

    // ---------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        let lines = i32::from(self.config.scroll.scroll_lines);
        let page = i32::from(self.content_height() / 2);
        // Messages last until the next key
        self.status_message = None;
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_by(lines),
            Action::ScrollUp => self.scroll_by(-lines),
            Action::PageDown => self.scroll_by(page),
            Action::PageUp => self.scroll_by(-page),
            Action::FocusNext => self.cycle_page_focus(true),
            Action::FocusPrev => self.cycle_page_focus(false),
            Action::Activate => {
                if let Some(control) = self.focused_control() {
                    self.activate_control(control, now);
                }
            }
            Action::OpenMenu => self.open_drawer(),
            Action::NextFilter => self.cycle_filter(true, now),
            Action::PrevFilter => self.cycle_filter(false, now),
            Action::ToggleMotion => self.toggle_motion(),
            Action::Overlay(key) => self.handle_overlay_key(key, now),
            Action::None => {}
        }
    }

    pub fn handle_mouse(&mut self, kind: MouseEventKind, column: u16, row: u16, now: Instant) {
        match kind {
            MouseEventKind::Moved => {
                let x = (f64::from(column) + 0.5) * PX_PER_CELL;
                let y = (f64::from(row) + 0.5) * PX_PER_CELL;
                self.cta.pointer_move(x, y);
            }
            MouseEventKind::ScrollDown => self.scroll_by(i32::from(self.config.scroll.scroll_lines)),
            MouseEventKind::ScrollUp => self.scroll_by(-i32::from(self.config.scroll.scroll_lines)),
            MouseEventKind::Down(MouseButton::Left) => {
                let area = ratatui::layout::Rect::new(0, 0, self.screen.0, self.screen.1);
                let overlay = if self.gallery.is_visible() {
                    Some(lightbox_area(area))
                } else if self.drawer.is_visible() {
                    Some(drawer_area(area))
                } else {
                    None
                };
                match overlay {
                    Some(inner) if !cell_in(inner, column, row) => {
                        if self.gallery.is_visible() {
                            self.gallery.click_scrim();
                        } else {
                            self.drawer.click_scrim();
                        }
                    }
                    Some(_) => {}
                    None => {
                        let (x, y) = (
                            (f64::from(column) + 0.5) * PX_PER_CELL,
                            (f64::from(row) + 0.5) * PX_PER_CELL,
                        );
                        if self.cta_bounds().contains(x, y) {
                            self.activate_control(Control::Cta, now);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        if self.resources.is_scroll_locked() {
            debug!(delta, "Scroll ignored while the page is locked");
            return;
        }
        let max = i32::from(self.max_scroll());
        let next = (i32::from(self.scroll_y) + delta).clamp(0, max);
        self.set_scroll(next as u16);
    }

    fn set_scroll(&mut self, y: u16) {
        self.scroll_y = y;
        self.hero.on_scroll(f64::from(y));
    }

    fn jump_to(&mut self, section: Section) {
        let top = self.section_box(section).top.min(self.max_scroll());
        self.set_scroll(top);
    }

    fn scroll_into_view(&mut self, control: Control) {
        let Some(row) = self.control_row(control) else {
            return;
        };
        let viewport = self.content_height();
        if row < self.scroll_y {
            self.set_scroll(row.saturating_sub(1));
        } else if row >= self.scroll_y + viewport {
            self.set_scroll((row + 2).saturating_sub(viewport).min(self.max_scroll()));
        }
    }

    fn cycle_page_focus(&mut self, forward: bool) {
        let list = self.tree.focusable_within(self.elements.page_root);
        if list.is_empty() {
            return;
        }
        let len = list.len();
        let next = match self.tree.active_element().and_then(|a| list.iter().position(|e| *e == a)) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.tree.focus(list[next]);
        if let Some(control) = self.controls.get(&list[next]).copied() {
            self.scroll_into_view(control);
        }
    }

    fn activate_control(&mut self, control: Control, now: Instant) {
        match control {
            Control::Menu => self.open_drawer(),
            Control::Cta => {
                self.status(format!("{} → {}", self.page.cta, self.stepper.position_label()));
                self.jump_to(Section::Enquiry);
            }
            Control::FilterTab(i) => {
                if let Some(name) = self.tabs.get(i).cloned() {
                    if self.works.set_active_category(&name) {
                        self.mount_work_reveals(now);
                    }
                }
            }
            Control::FaqTrigger(i) => {
                self.faq.toggle(&i);
            }
            Control::Thumbnail(i) => {
                let trigger = self.elements.thumbnails.get(i).copied();
                let outcome = self.gallery.open(i, &self.tree, trigger);
                self.report_open(outcome);
            }
            Control::StepBack => {
                self.stepper.back();
            }
            Control::StepNext => {
                if !self.stepper.next() && self.stepper.is_finished() {
                    self.status("Enquiry sent".to_string());
                }
            }
            Control::DrawerLink(i) => {
                self.drawer.close();
                let target = Section::NAV_TARGETS.get(i).copied().unwrap_or(Section::Hero);
                let pending = Rc::clone(&self.pending_jump);
                // Scroll once the drawer has released the page
                self.frames
                    .request(self.liveness.token(), move |_| pending.set(Some(target)));
            }
            Control::DrawerClose => {
                self.drawer.close();
            }
            Control::LightboxPrev => self.gallery.previous(),
            Control::LightboxNext => self.gallery.next(),
            Control::LightboxClose => {
                self.gallery.close();
            }
        }
    }

    fn handle_overlay_key(&mut self, key: Key, now: Instant) {
        let activates = matches!(key, Key::Enter | Key::Space);
        if self.gallery.is_visible() {
            if activates {
                if let Some(control) = self.focused_control() {
                    self.activate_control(control, now);
                }
            } else {
                self.gallery.handle_key(key, &mut self.tree);
            }
        } else if self.drawer.is_visible() {
            if activates {
                if let Some(control) = self.focused_control() {
                    self.activate_control(control, now);
                }
            } else {
                self.drawer.handle_key(key, &mut self.tree);
            }
        }
    }

    fn open_drawer(&mut self) {
        let outcome = self.drawer.open(&self.tree, Some(self.elements.menu_button));
        self.report_open(outcome);
    }

    fn report_open(&mut self, outcome: OpenOutcome) {
        match outcome {
            OpenOutcome::Rejected { holder } => {
                self.status(format!("Overlay #{holder} already has focus"));
            }
            OpenOutcome::Empty => self.status("Nothing to show".to_string()),
            OpenOutcome::Opening | OpenOutcome::AlreadyOpen => {}
        }
    }

    fn cycle_filter(&mut self, forward: bool, now: Instant) {
        if self.works.cycle(forward) {
            self.mount_work_reveals(now);
            self.status(format!("Showing {}", self.works.active_category()));
        }
    }

    fn toggle_motion(&mut self) {
        let wanted = !self.gate.is_reduced();
        self.gate.set_platform_preference(Some(wanted));
        if self.gate.is_reduced() == wanted {
            self.status(format!("Motion: {}", self.motion_label()));
        } else {
            self.status(format!(
                "Motion fixed by config ({:?})",
                self.config.motion.reduced_motion
            ));
        }
    }

    fn status(&mut self, message: String) {
        debug!(%message, "Status");
        self.status_message = Some(message);
    }
}

fn is_transitioning(phase: OverlayPhase) -> bool {
    matches!(phase, OverlayPhase::Opening | OverlayPhase::Closing)
}

fn cell_in(area: ratatui::layout::Rect, column: u16, row: u16) -> bool {
    area.contains(ratatui::layout::Position::new(column, row))
}

/// Fraction of `[top, top + height)` inside the viewport
pub fn visible_ratio(top: u16, height: u16, scroll: u16, viewport: u16) -> f64 {
    if height == 0 {
        return 0.0;
    }
    let start = top.max(scroll);
    let end = top.saturating_add(height).min(scroll.saturating_add(viewport));
    f64::from(end.saturating_sub(start)) / f64::from(height)
}

fn build_tree(page: &Page, tabs: &[String]) -> (ElementTree, PageElements, HashMap<ElementId, Control>) {
    let mut tree = ElementTree::new();
    let mut controls = HashMap::new();

    let page_root = tree.append(None, page.info.title, false);
    let mut sections = Vec::with_capacity(Section::ALL.len());
    for section in Section::ALL {
        sections.push((section, tree.append(Some(page_root), section.label(), false)));
    }
    let section = |s: Section| {
        sections
            .iter()
            .find(|(k, _)| *k == s)
            .map(|(_, id)| *id)
            .unwrap_or(page_root)
    };
    let (hero, works_section, faq_section, gallery_section, enquiry) = (
        section(Section::Hero),
        section(Section::Works),
        section(Section::Faq),
        section(Section::Gallery),
        section(Section::Enquiry),
    );

    let mut add = |tree: &mut ElementTree, parent: ElementId, label: String, control: Control| {
        let id = tree.append(Some(parent), label, true);
        controls.insert(id, control);
        id
    };

    let menu_button = add(&mut tree, hero, "Menu".to_string(), Control::Menu);
    let cta = add(&mut tree, hero, page.cta.to_string(), Control::Cta);
    let tabs = tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| add(&mut tree, works_section, format!("Filter: {tab}"), Control::FilterTab(i)))
        .collect();
    let works = page
        .works
        .iter()
        .map(|w| tree.append(Some(works_section), w.title, false))
        .collect();
    let faqs = page
        .faqs
        .iter()
        .enumerate()
        .map(|(i, f)| add(&mut tree, faq_section, f.question.to_string(), Control::FaqTrigger(i)))
        .collect();
    let thumbnails = page
        .gallery
        .iter()
        .enumerate()
        .map(|(i, m)| add(&mut tree, gallery_section, m.caption.to_string(), Control::Thumbnail(i)))
        .collect();
    let step_back = add(&mut tree, enquiry, "Back".to_string(), Control::StepBack);
    let step_next = add(&mut tree, enquiry, "Next".to_string(), Control::StepNext);

    let drawer_root = tree.append(None, "Navigation drawer", false);
    let drawer_links = page
        .nav
        .iter()
        .enumerate()
        .map(|(i, label)| add(&mut tree, drawer_root, label.to_string(), Control::DrawerLink(i)))
        .collect();
    let drawer_close = add(&mut tree, drawer_root, "Close menu".to_string(), Control::DrawerClose);

    let lightbox_root = tree.append(None, "Lightbox", false);
    let lightbox_prev = add(&mut tree, lightbox_root, "Previous image".to_string(), Control::LightboxPrev);
    let lightbox_next = add(&mut tree, lightbox_root, "Next image".to_string(), Control::LightboxNext);
    let lightbox_close = add(&mut tree, lightbox_root, "Close gallery".to_string(), Control::LightboxClose);

    let elements = PageElements {
        page_root,
        sections,
        menu_button,
        cta,
        tabs,
        works,
        faqs,
        thumbnails,
        step_back,
        step_next,
        drawer_root,
        drawer_links,
        drawer_close,
        lightbox_root,
        lightbox_prev,
        lightbox_next,
        lightbox_close,
    };
    (tree, elements, controls)
}
