use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vitrine_core::Key;

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    FocusNext,
    FocusPrev,
    /// Click the focused control
    Activate,
    OpenMenu,
    NextFilter,
    PrevFilter,
    /// Flip the platform reduced-motion preference
    ToggleMotion,
    /// Raw key routed to the open overlay
    Overlay(Key),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Ctrl+C quits even while an overlay traps the keyboard
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if app.overlay_active() {
        return to_platform_key(key).map(Action::Overlay).unwrap_or(Action::None);
    }

    let binding = KeyBinding::new(key.code, key.modifiers);
    keymap.get(&binding).copied().unwrap_or(Action::None)
}

/// Map a terminal key to the layer's platform key
pub fn to_platform_key(key: KeyEvent) -> Option<Key> {
    let mapped = match key.code {
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        // Vim-style aliases for the lightbox
        KeyCode::Char('h') => Key::ArrowLeft,
        KeyCode::Char('l') => Key::ArrowRight,
        KeyCode::Char('q') => Key::Escape,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_platform_key_mapping() {
        assert_eq!(to_platform_key(press(KeyCode::BackTab, KeyModifiers::SHIFT)), Some(Key::BackTab));
        assert_eq!(to_platform_key(press(KeyCode::Tab, KeyModifiers::SHIFT)), Some(Key::BackTab));
        assert_eq!(to_platform_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Key::Escape));
        assert_eq!(to_platform_key(press(KeyCode::Char('l'), KeyModifiers::NONE)), Some(Key::ArrowRight));
        assert_eq!(to_platform_key(press(KeyCode::F(1), KeyModifiers::NONE)), None);
    }
}
