use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use vitrine_core::ui::OverlayPhase;

use crate::app::App;
use crate::theme::Theme;
use crate::widgets::page::{button, focus_style};

/// Navigation drawer panel, docked on the right
pub fn drawer_area(area: Rect) -> Rect {
    let width = 34u16.min(area.width);
    Rect::new(
        area.x + area.width - width,
        area.y,
        width,
        area.height.saturating_sub(1),
    )
}

/// Lightbox dialog, centered over the page
pub fn lightbox_area(area: Rect) -> Rect {
    let width = 64u16.min(area.width.saturating_sub(4));
    let height = 12u16.min(area.height.saturating_sub(3));
    centered_rect(width, height, area)
}

pub struct DrawerWidget;

impl DrawerWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        if !app.drawer.is_visible() {
            return;
        }
        let theme = &app.theme;
        let screen = frame.area();
        scrim(frame, screen, theme);

        let area = drawer_area(screen);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", app.drawer.aria().label))
            .borders(Borders::ALL)
            .border_style(border_style(app.drawer.phase(), theme))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::default()];
        for (id, label) in app.elements.drawer_links.iter().zip(&app.page.nav) {
            lines.push(link(label, app.is_focused(*id), theme));
            lines.push(Line::default());
        }
        lines.push(link("✕ Close menu", app.is_focused(app.elements.drawer_close), theme));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            " Tab cycles · Esc closes",
            Style::default().fg(theme.grey0),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

pub struct LightboxWidget;

impl LightboxWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        if !app.gallery.is_visible() {
            return;
        }
        let Some(media) = app.gallery.current() else {
            return;
        };
        let theme = &app.theme;
        let screen = frame.area();
        scrim(frame, screen, theme);

        let area = lightbox_area(screen);
        frame.render_widget(Clear, area);

        let title = format!(
            " {} · {} ",
            app.gallery.aria().label,
            app.gallery.position_label().unwrap_or_default()
        );
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(border_style(app.gallery.overlay().phase(), theme))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let art = "░".repeat(inner.width.saturating_sub(8) as usize);
        let art_style = Style::default().fg(theme.bg2);
        let lines = vec![
            Line::default(),
            Line::from(Span::styled(art.clone(), art_style)),
            Line::from(Span::styled(art.clone(), art_style)),
            Line::from(Span::styled(art, art_style)),
            Line::default(),
            Line::from(Span::styled(
                media.caption,
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(media.alt, Style::default().fg(theme.grey1))),
            Line::default(),
            Line::from(vec![
                button("◀ Previous", app.is_focused(app.elements.lightbox_prev), theme),
                Span::raw("  "),
                button("Next ▶", app.is_focused(app.elements.lightbox_next), theme),
                Span::raw("  "),
                button("✕ Close", app.is_focused(app.elements.lightbox_close), theme),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }
}

/// Dim the page behind a modal (status bar excluded)
fn scrim(frame: &mut Frame, screen: Rect, theme: &Theme) {
    let content = Rect::new(screen.x, screen.y, screen.width, screen.height.saturating_sub(1));
    frame.buffer_mut().set_style(
        content,
        Style::default().bg(theme.scrim).add_modifier(Modifier::DIM),
    );
}

/// Muted border while the overlay is still settling
fn border_style(phase: OverlayPhase, theme: &Theme) -> Style {
    match phase {
        OverlayPhase::Open => Style::default().fg(theme.accent),
        _ => Style::default().fg(theme.grey0),
    }
}

fn link(label: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let style = if focused {
        focus_style(theme)
    } else {
        Style::default().fg(theme.fg0)
    };
    Line::from(vec![Span::raw("  "), Span::styled(label.to_string(), style)])
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
