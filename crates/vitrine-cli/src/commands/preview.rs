use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use vitrine_core::{template, AppConfig};
use vitrine_tui::{
    app::{App, PreviewOptions},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    widgets::{DrawerWidget, LightboxWidget, PageWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, template_name: &str, options: PreviewOptions) -> Result<()> {
    let page = template::load(template_name)?;
    let keymap = Keymap::from_config(&config.keymap);
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    let mut app = App::new(config.clone(), page, options);

    // Log preference flips pushed through the gate
    let mut gate_changes = app.gate.subscribe();
    let watcher = tokio::spawn(async move {
        while gate_changes.changed().await.is_ok() {
            let reduced = *gate_changes.borrow();
            info!(reduced, "Reduced-motion preference changed");
        }
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(format!("Vitrine · {}", app.page.info.title))
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.set_screen(size.width, size.height);
    app.mount(Instant::now());

    let result = run_loop(&mut terminal, &mut app, &keymap, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    watcher.abort();

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    events: &EventHandler,
) -> Result<()> {
    loop {
        let now = Instant::now();
        // Frame-rate polling only while something is still moving
        let animating = app.on_frame(now);

        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: page + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            PageWidget::render(frame, main_layout[0], app, now);
            StatusBarWidget::render(frame, main_layout[1], app);

            // Overlays draw on top of the page
            DrawerWidget::render(frame, app);
            LightboxWidget::render(frame, app);
        })?;

        let event = if animating {
            events.next_frame()?
        } else {
            events.next()?
        };
        if let Some(event) = event {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.handle_action(action, now);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse.kind, mouse.column, mouse.row, now),
                AppEvent::Resize(width, height) => app.set_screen(width, height),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
