use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;
use vitrine_core::config::KeymapConfig;
use vitrine_core::{Error, Result};

use crate::input::Action;

/// Key code plus modifiers, as reported by crossterm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Page-level bindings; overlays receive raw keys instead
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Build from config; invalid or conflicting entries are skipped with a warning
    pub fn from_config(config: &KeymapConfig) -> Self {
        let configured = [
            (&config.quit, Action::Quit),
            (&config.scroll_down, Action::ScrollDown),
            (&config.scroll_up, Action::ScrollUp),
            (&config.page_down, Action::PageDown),
            (&config.page_up, Action::PageUp),
            (&config.focus_next, Action::FocusNext),
            (&config.focus_prev, Action::FocusPrev),
            (&config.activate, Action::Activate),
            (&config.open_menu, Action::OpenMenu),
            (&config.next_filter, Action::NextFilter),
            (&config.prev_filter, Action::PrevFilter),
            (&config.toggle_motion, Action::ToggleMotion),
        ];

        let mut bindings: HashMap<KeyBinding, Action> = HashMap::new();
        for (notation, action) in configured {
            let binding = match parse_key_binding(notation) {
                Ok(binding) => binding,
                Err(e) => {
                    warn!(action = ?action, "{e}, ignoring");
                    continue;
                }
            };
            match bindings.get(&binding) {
                Some(existing) => warn!(
                    key = %notation,
                    bound = ?existing,
                    ignored = ?action,
                    "Key already bound"
                ),
                None => {
                    bindings.insert(binding, action);
                }
            }
        }

        // Fixed fallbacks never displace a configured key
        let fallbacks = [
            (KeyBinding::plain(KeyCode::Down), Action::ScrollDown),
            (KeyBinding::plain(KeyCode::Up), Action::ScrollUp),
            (KeyBinding::plain(KeyCode::PageDown), Action::PageDown),
            (KeyBinding::plain(KeyCode::PageUp), Action::PageUp),
            (KeyBinding::plain(KeyCode::Char(' ')), Action::Activate),
        ];
        for (binding, action) in fallbacks {
            bindings.entry(binding).or_insert(action);
        }
        bindings.insert(KeyBinding::ctrl('c'), Action::Quit);

        // Terminals report Shift+Tab as BackTab, with or without SHIFT set
        if let Some(action) = bindings.get(&KeyBinding::new(KeyCode::Tab, KeyModifiers::SHIFT)).copied() {
            bindings.insert(KeyBinding::plain(KeyCode::BackTab), action);
            bindings.insert(KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT), action);
        }

        Self { bindings }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }
}

/// Parse Vim-style key notation
///
/// A bare character binds that character, uppercase letters imply Shift.
/// Angle brackets hold any number of `C-`, `S-` or `A-` modifiers followed
/// by a character or a key name: `<C-d>`, `<S-Tab>`, `<C-S-Left>`, `<CR>`.
pub fn parse_key_binding(notation: &str) -> Result<KeyBinding> {
    let trimmed = notation.trim();
    let invalid = || Error::InvalidKeyBinding(notation.to_string());

    let Some(inner) = trimmed
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .filter(|inner| !inner.is_empty())
    else {
        let c = single_char(trimmed).ok_or_else(invalid)?;
        let modifiers = if c.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        return Ok(KeyBinding::new(KeyCode::Char(c), modifiers));
    };

    let mut modifiers = KeyModifiers::NONE;
    let mut rest = inner;
    while let Some((prefix, tail)) = rest.split_once('-').filter(|(_, tail)| !tail.is_empty()) {
        modifiers |= match prefix {
            "C" | "c" => KeyModifiers::CONTROL,
            "S" | "s" => KeyModifiers::SHIFT,
            "A" | "a" | "M" | "m" => KeyModifiers::ALT,
            _ => return Err(invalid()),
        };
        rest = tail;
    }

    let code = key_code(rest).ok_or_else(invalid)?;
    Ok(KeyBinding::new(code, modifiers))
}

const NAMED_KEYS: &[(&[&str], KeyCode)] = &[
    (&["cr", "enter", "return"], KeyCode::Enter),
    (&["esc", "escape"], KeyCode::Esc),
    (&["tab"], KeyCode::Tab),
    (&["backtab"], KeyCode::BackTab),
    (&["space", "spc"], KeyCode::Char(' ')),
    (&["bs", "backspace"], KeyCode::Backspace),
    (&["left"], KeyCode::Left),
    (&["right"], KeyCode::Right),
    (&["up"], KeyCode::Up),
    (&["down"], KeyCode::Down),
    (&["home"], KeyCode::Home),
    (&["end"], KeyCode::End),
    (&["pageup", "pgup"], KeyCode::PageUp),
    (&["pagedown", "pgdn"], KeyCode::PageDown),
    (&["lt"], KeyCode::Char('<')),
];

fn key_code(name: &str) -> Option<KeyCode> {
    if let Some(c) = single_char(name) {
        // Modified letters are reported lowercase by crossterm
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }
    let lower = name.to_ascii_lowercase();
    NAMED_KEYS
        .iter()
        .find(|(names, _)| names.contains(&lower.as_str()))
        .map(|(_, code)| *code)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}
