use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use vitrine_core::motion::StyleValues;

use crate::app::{App, Section, CARDS_PER_ROW, CARD_HEIGHT, CTA_COL, PX_PER_CELL};
use crate::theme::Theme;

/// Below this opacity an element is not drawn at all
const HIDDEN_OPACITY: f64 = 0.05;
/// Below this opacity an element is drawn dimmed
const DIM_OPACITY: f64 = 0.6;

pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let width = area.width as usize;
        let mut lines: Vec<Line<'static>> = Vec::with_capacity(app.document_height() as usize);

        for b in app.layout() {
            let content = match b.section {
                Section::Hero => hero(app, width),
                Section::Stats => stats(app, width, now),
                Section::Works => works(app, width, now),
                Section::Faq => faq(app, width),
                Section::Gallery => gallery(app, width),
                Section::Enquiry => enquiry(app, width),
                Section::Footer => footer(app),
            };
            let styled = apply_reveal(content, app.section_style(b.section, now));
            lines.extend(fit(styled, b.height));
        }

        let paragraph = Paragraph::new(lines)
            .style(Style::default().fg(app.theme.fg0).bg(app.theme.bg0))
            .scroll((app.scroll_y, 0));
        frame.render_widget(paragraph, area);
    }
}

fn hero(app: &App, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let info = app.page.info;
    // Parallax drifts the title sideways as the hero scrolls away
    let drift = (-app.hero.current() / PX_PER_CELL).round().max(0.0) as usize;
    let offset = app.cta.displacement();
    let cta_col = (f64::from(CTA_COL) + offset.x / PX_PER_CELL).round().max(0.0) as usize;

    vec![
        Line::default(),
        Line::from(vec![
            Span::raw(" ".repeat(2 + drift)),
            Span::styled(
                info.title.to_uppercase(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {}", info.tagline),
            Style::default().fg(theme.grey1),
        )),
        Line::default(),
        Line::from(vec![
            Span::raw("  "),
            button("≡ Menu", app.is_focused(app.elements.menu_button), theme),
        ]),
        Line::default(),
        Line::from(vec![
            Span::raw(" ".repeat(cta_col)),
            button(app.page.cta, app.is_focused(app.elements.cta), theme),
        ]),
        Line::default(),
        separator(width, theme),
    ]
}

fn stats(app: &App, width: usize, now: Instant) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let column = (width.saturating_sub(4) / app.page.stats.len().max(1)).max(8);
    let mut values = vec![Span::raw("  ")];
    let mut labels = vec![Span::raw("  ")];
    for (stat, counter) in app.page.stats.iter().zip(&app.stats) {
        values.push(Span::styled(
            pad(&format!("{}{}", counter.display_at(now), stat.suffix), column),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
        labels.push(Span::styled(pad(stat.label, column), Style::default().fg(theme.grey1)));
    }

    vec![
        heading("By the numbers", theme),
        Line::default(),
        Line::from(values),
        Line::from(labels),
        Line::default(),
    ]
}

fn works(app: &App, width: usize, now: Instant) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut tabs = vec![Span::raw("  ")];
    for (i, tab) in app.tabs.iter().enumerate() {
        let focused = app.elements.tabs.get(i).is_some_and(|id| app.is_focused(*id));
        let style = if focused {
            focus_style(theme)
        } else if tab == app.works.active_category() {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.grey1)
        };
        tabs.push(Span::styled(format!(" {tab} "), style));
        tabs.push(Span::raw(" "));
    }

    let mut lines = vec![heading(app.page.works_heading, theme), Line::from(tabs), Line::default()];
    let visible = app.works.visible_indices();
    if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  Nothing in {} yet.", app.works.active_category()),
            Style::default().fg(theme.grey0),
        )));
        lines.push(Line::default());
    } else {
        let card_width = (width.saturating_sub(4) / CARDS_PER_ROW).max(12);
        for row in visible.chunks(CARDS_PER_ROW) {
            lines.extend(card_row(app, row, card_width, now));
        }
    }
    lines.push(separator(width, theme));
    lines
}

/// One grid row; each card carries its own staggered reveal
fn card_row(app: &App, indices: &[usize], width: usize, now: Instant) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut rows: Vec<Vec<Span<'static>>> = (0..CARD_HEIGHT).map(|_| vec![Span::raw("  ")]).collect();

    for index in indices {
        let work = &app.page.works[*index];
        let style = app.work_style(*index, now);
        let shift = (style.translate_y / PX_PER_CELL).round().max(0.0) as usize;
        let dim = if style.opacity < DIM_OPACITY {
            Modifier::DIM
        } else {
            Modifier::empty()
        };
        let content = [
            Span::styled(
                pad(&format!("▍{}", work.title), width),
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD | dim),
            ),
            Span::styled(
                pad(&format!("▍{}", work.category), width),
                Style::default().fg(theme.accent).add_modifier(dim),
            ),
            Span::styled(
                pad(&format!("▍{}", work.blurb), width),
                Style::default().fg(theme.grey1).add_modifier(dim),
            ),
        ];
        for (r, row) in rows.iter_mut().enumerate() {
            let span = r
                .checked_sub(shift)
                .and_then(|i| content.get(i))
                .filter(|_| style.opacity >= HIDDEN_OPACITY)
                .cloned()
                .unwrap_or_else(|| Span::raw(" ".repeat(width)));
            row.push(span);
        }
    }
    rows.into_iter().map(Line::from).collect()
}

fn faq(app: &App, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = vec![heading("Questions", theme), Line::default()];
    for (i, item) in app.page.faqs.iter().enumerate() {
        let open = app.faq.is_open(&i);
        let focused = app.elements.faqs.get(i).is_some_and(|id| app.is_focused(*id));
        let marker = if open { "▾" } else { "▸" };
        let style = if focused {
            focus_style(theme)
        } else {
            Style::default().fg(theme.fg0)
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{marker} {}", item.question), style),
        ]));
        if open {
            lines.push(Line::from(Span::styled(
                format!("    {}", item.answer),
                Style::default().fg(theme.grey1),
            )));
            lines.push(Line::default());
        }
    }
    lines.push(separator(width, theme));
    lines
}

fn gallery(app: &App, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = vec![heading("Gallery", theme), Line::default()];
    for (i, media) in app.page.gallery.iter().enumerate() {
        let focused = app.elements.thumbnails.get(i).is_some_and(|id| app.is_focused(*id));
        let style = if focused {
            focus_style(theme)
        } else {
            Style::default().fg(theme.fg0)
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("▣ {}", media.caption), style),
            Span::styled(format!("  {}", media.alt), Style::default().fg(theme.grey0)),
        ]));
    }
    lines.push(separator(width, theme));
    lines
}

fn enquiry(app: &App, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let stepper = &app.stepper;

    let mut track = vec![Span::raw("  ")];
    for (i, step) in stepper.steps().iter().enumerate() {
        let (marker, style) = if stepper.is_completed(i) {
            ("✓", Style::default().fg(theme.success))
        } else if i == stepper.current_index() {
            ("●", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        } else {
            ("○", Style::default().fg(theme.grey0))
        };
        track.push(Span::styled(format!("{marker} {step}"), style));
        if i + 1 < stepper.len() {
            track.push(Span::styled(" ─ ", Style::default().fg(theme.grey0)));
        }
    }

    let status = if stepper.is_finished() {
        "Thanks, we'll be in touch.".to_string()
    } else {
        format!(
            "{} · {}",
            stepper.position_label(),
            stepper.current().copied().unwrap_or_default()
        )
    };

    let bar_width = 30usize;
    let filled = ((stepper.progress() * bar_width as f64).round() as usize).min(bar_width);
    let next_label = if stepper.is_last() { "Send" } else { "Next" };

    vec![
        heading("Enquire", theme),
        Line::default(),
        Line::from(track),
        Line::from(Span::styled(format!("  {status}"), Style::default().fg(theme.fg1))),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("█".repeat(filled), Style::default().fg(theme.accent)),
            Span::styled("░".repeat(bar_width - filled), Style::default().fg(theme.grey0)),
        ]),
        Line::from(vec![
            Span::raw("  "),
            button("Back", app.is_focused(app.elements.step_back), theme),
            Span::raw(" "),
            button(next_label, app.is_focused(app.elements.step_next), theme),
        ]),
        separator(width, theme),
    ]
}

fn footer(app: &App) -> Vec<Line<'static>> {
    let grey = Style::default().fg(app.theme.grey0);
    vec![
        Line::default(),
        Line::from(Span::styled(
            format!("  {} · {}", app.page.info.title, app.page.info.tagline),
            grey,
        )),
        Line::from(Span::styled(
            format!("  motion: {} · built with vitrine", app.motion_label()),
            grey,
        )),
    ]
}

/// Map reveal style values onto terminal cells
fn apply_reveal(lines: Vec<Line<'static>>, style: StyleValues) -> Vec<Line<'static>> {
    if style.opacity < HIDDEN_OPACITY {
        return vec![Line::default(); lines.len()];
    }
    let shift = (style.translate_y / PX_PER_CELL).round().max(0.0) as usize;
    let indent = ((1.0 - style.scale).max(0.0) * 40.0).round() as usize;
    let dim = style.opacity < DIM_OPACITY;

    let mut out = vec![Line::default(); shift];
    out.extend(lines.into_iter().map(|line| {
        let line = if indent > 0 {
            let mut spans = vec![Span::raw(" ".repeat(indent))];
            spans.extend(line.spans);
            Line::from(spans)
        } else {
            line
        };
        if dim {
            line.patch_style(Style::default().add_modifier(Modifier::DIM))
        } else {
            line
        }
    }));
    out
}

/// Pad or truncate to the laid-out height
fn fit(mut lines: Vec<Line<'static>>, height: u16) -> Vec<Line<'static>> {
    lines.truncate(height as usize);
    lines.resize(height as usize, Line::default());
    lines
}

fn heading(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text.to_uppercase()),
        Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
    ))
}

fn separator(width: usize, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled("─".repeat(width), Style::default().fg(theme.bg2)))
}

pub(crate) fn focus_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.bg0)
        .bg(theme.focus)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn button(label: &str, focused: bool, theme: &Theme) -> Span<'static> {
    let text = format!("[ {label} ]");
    if focused {
        Span::styled(text, focus_style(theme))
    } else {
        Span::styled(text, Style::default().fg(theme.accent))
    }
}

/// Truncate to `width - 1` characters and pad to `width`
fn pad(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}
