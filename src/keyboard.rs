use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A key with its modifiers, usable as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyboardShortcut {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyboardShortcut {
    pub fn new(key: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::NONE)
    }

    /// Human-readable form for help text.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let key = match self.key {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            other => format!("{:?}", other),
        };
        parts.push(key);
        parts.join("+")
    }
}

/// Everything a key can do while browsing the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    Quit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,
    /// The on-screen back-to-top control. Only honored while it is shown.
    ScrollTopButton,
    ToggleMenu,
    NextLink,
    PrevLink,
    ActivateLink,
    /// Jump straight to the n-th navigation link (0-based).
    QuickLink(usize),
    OpenContactForm,
}

/// Fixed keymap for browse mode. Form mode reads keys directly because
/// most of them are text input.
#[derive(Debug)]
pub struct KeyboardManager {
    bindings: HashMap<KeyboardShortcut, KeyboardAction>,
}

impl KeyboardManager {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |key: KeyCode, action: KeyboardAction| {
            bindings.insert(KeyboardShortcut::plain(key), action);
        };

        bind(KeyCode::Char('q'), KeyboardAction::Quit);
        bind(KeyCode::Esc, KeyboardAction::Quit);

        bind(KeyCode::Char('j'), KeyboardAction::ScrollDown);
        bind(KeyCode::Down, KeyboardAction::ScrollDown);
        bind(KeyCode::Char('k'), KeyboardAction::ScrollUp);
        bind(KeyCode::Up, KeyboardAction::ScrollUp);
        bind(KeyCode::PageDown, KeyboardAction::PageDown);
        bind(KeyCode::Char(' '), KeyboardAction::PageDown);
        bind(KeyCode::PageUp, KeyboardAction::PageUp);
        bind(KeyCode::Char('g'), KeyboardAction::JumpTop);
        bind(KeyCode::Char('G'), KeyboardAction::JumpBottom);
        bind(KeyCode::Home, KeyboardAction::JumpTop);
        bind(KeyCode::End, KeyboardAction::JumpBottom);

        bind(KeyCode::Char('t'), KeyboardAction::ScrollTopButton);
        bind(KeyCode::Char('m'), KeyboardAction::ToggleMenu);
        bind(KeyCode::Char('l'), KeyboardAction::NextLink);
        bind(KeyCode::Right, KeyboardAction::NextLink);
        bind(KeyCode::Char('h'), KeyboardAction::PrevLink);
        bind(KeyCode::Left, KeyboardAction::PrevLink);
        bind(KeyCode::Enter, KeyboardAction::ActivateLink);
        bind(KeyCode::Char('c'), KeyboardAction::OpenContactForm);

        for n in 1..=9usize {
            let digit = char::from_digit(n as u32, 10).unwrap_or('1');
            bind(KeyCode::Char(digit), KeyboardAction::QuickLink(n - 1));
        }

        Self { bindings }
    }

    /// Resolve a key event. Uppercase characters arrive with SHIFT set on
    /// some terminals, so a failed exact lookup retries without it.
    pub fn action_for(&self, event: &KeyEvent) -> Option<KeyboardAction> {
        let exact = KeyboardShortcut::new(event.code, event.modifiers);
        if let Some(action) = self.bindings.get(&exact) {
            return Some(*action);
        }
        if matches!(event.code, KeyCode::Char(_))
            && event.modifiers.contains(KeyModifiers::SHIFT)
        {
            let stripped =
                KeyboardShortcut::new(event.code, event.modifiers - KeyModifiers::SHIFT);
            return self.bindings.get(&stripped).copied();
        }
        None
    }

    /// One-line key summary for the footer.
    pub fn help_line(&self) -> String {
        let entries = [
            (KeyboardAction::ScrollDown, "scroll"),
            (KeyboardAction::ActivateLink, "open link"),
            (KeyboardAction::ToggleMenu, "menu"),
            (KeyboardAction::OpenContactForm, "contact"),
            (KeyboardAction::ScrollTopButton, "top"),
            (KeyboardAction::Quit, "quit"),
        ];
        let mut parts = Vec::new();
        for (action, label) in entries {
            if let Some(shortcut) = self.shortcut_for(action) {
                parts.push(format!("{} {}", shortcut.describe(), label));
            }
        }
        parts.join("  ")
    }

    /// First shortcut bound to `action`, for help text.
    pub fn shortcut_for(&self, action: KeyboardAction) -> Option<KeyboardShortcut> {
        let mut found: Vec<&KeyboardShortcut> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(s, _)| s)
            .collect();
        // HashMap order is arbitrary; prefer letter keys for stable help text.
        found.sort_by_key(|s| match s.key {
            KeyCode::Char(c) => (0, c as u32),
            _ => (1, 0),
        });
        found.first().map(|s| **s)
    }
}

impl Default for KeyboardManager {
    fn default() -> Self {
        Self::new()
    }
}
