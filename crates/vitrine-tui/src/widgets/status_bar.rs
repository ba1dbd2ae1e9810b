use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = if app.gallery.is_visible() {
            "GALLERY"
        } else if app.drawer.is_visible() {
            "MENU"
        } else {
            "PAGE"
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            format!(
                " {} | {} | {} | motion: {} | {}/{}",
                mode_str,
                app.page.info.title,
                app.focus_label().unwrap_or("-"),
                app.motion_label(),
                app.scroll_y,
                app.max_scroll()
            )
        };

        let help_hint = if app.overlay_active() {
            " Tab:cycle h/l:prev/next Enter:select Esc:close "
        } else {
            " q:quit j/k:scroll Tab:focus Enter:open m:menu [/]:filter r:motion "
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.chars().count());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
