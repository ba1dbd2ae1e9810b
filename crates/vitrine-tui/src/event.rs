use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Terminal input, polled at an idle or an animation cadence
pub struct EventHandler {
    idle: Duration,
    frame: Duration,
}

impl EventHandler {
    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        Self {
            idle: Duration::from_millis(tick_rate_ms),
            frame: Duration::from_millis(1000 / u64::from(fps.max(1))),
        }
    }

    /// Wait up to the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.wait(self.idle)
    }

    /// Wait up to one animation frame
    pub fn next_frame(&self) -> Result<Option<AppEvent>> {
        self.wait(self.frame)
    }

    fn wait(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if !event::poll(timeout)? {
            return Ok(Some(AppEvent::Tick));
        }
        Ok(translate(event::read()?))
    }
}

/// Events the preview loop reacts to
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Pointer moved, clicked or scrolled
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Poll timed out; drives frames and overlay settling
    Tick,
}

/// Key releases and repeats are dropped (some terminals report them)
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_only_key_presses_pass() {
        assert!(matches!(translate(key(KeyEventKind::Press)), Some(AppEvent::Key(_))));
        assert!(translate(key(KeyEventKind::Release)).is_none());
        assert!(translate(Event::FocusGained).is_none());
        assert!(matches!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize(80, 24))));
    }

    #[test]
    fn test_frame_interval_from_fps() {
        let handler = EventHandler::with_animation_fps(250, 50);
        assert_eq!(handler.frame, Duration::from_millis(20));
        assert_eq!(handler.idle, Duration::from_millis(250));
        // Zero fps is treated as one
        assert_eq!(EventHandler::with_animation_fps(250, 0).frame, Duration::from_secs(1));
    }
}
