use crossterm::event::KeyEvent;

use crate::keyboard::{KeyboardAction, KeyboardManager};
use crate::ui::{FormAction, UIMode, UI};

/// What the application loop must do after a key event. Everything that
/// only moves UI state is already done by the time this comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    ScrollDown(i64),
    ScrollUp(i64),
    PageDown,
    PageUp,
    JumpTop,
    JumpBottom,
    /// The back-to-top control was triggered.
    ScrollTopButton,
    /// A nav link fired; scroll to this section.
    Anchor(String),
    OpenContactForm,
    SubmitContact,
}

pub struct EventHandler {
    keyboard_manager: KeyboardManager,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            keyboard_manager: KeyboardManager::default(),
        }
    }

    pub fn keyboard_manager(&self) -> &KeyboardManager {
        &self.keyboard_manager
    }

    /// Handle one key event. Form mode consumes keys as text input; browse
    /// mode goes through the keymap.
    pub fn handle_key_event(&mut self, key: KeyEvent, ui: &mut UI) -> EventResult {
        if ui.mode() == UIMode::ContactForm {
            return match ui.contact_form_mut().handle_key(key) {
                Some(FormAction::Submit) => EventResult::SubmitContact,
                Some(FormAction::Cancel) => {
                    ui.close_contact_form();
                    EventResult::Continue
                }
                None => EventResult::Continue,
            };
        }

        let Some(action) = self.keyboard_manager.action_for(&key) else {
            return EventResult::Continue;
        };

        match action {
            KeyboardAction::Quit => EventResult::Quit,
            KeyboardAction::ScrollDown => EventResult::ScrollDown(1),
            KeyboardAction::ScrollUp => EventResult::ScrollUp(1),
            KeyboardAction::PageDown => EventResult::PageDown,
            KeyboardAction::PageUp => EventResult::PageUp,
            KeyboardAction::JumpTop => EventResult::JumpTop,
            KeyboardAction::JumpBottom => EventResult::JumpBottom,
            KeyboardAction::ScrollTopButton => EventResult::ScrollTopButton,
            KeyboardAction::ToggleMenu => {
                ui.toggle_menu();
                EventResult::Continue
            }
            KeyboardAction::NextLink => {
                ui.select_next_link();
                EventResult::Continue
            }
            KeyboardAction::PrevLink => {
                ui.select_prev_link();
                EventResult::Continue
            }
            KeyboardAction::ActivateLink => match ui.activate_selected_link() {
                Some(target) => EventResult::Anchor(target),
                None => EventResult::Continue,
            },
            KeyboardAction::QuickLink(index) => match ui.activate_link(index) {
                Some(target) => EventResult::Anchor(target),
                None => EventResult::Continue,
            },
            KeyboardAction::OpenContactForm => EventResult::OpenContactForm,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavLink;
    use crate::theme::Theme;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn ui() -> UI {
        UI::new(
            Theme::default(),
            "brand",
            vec![
                NavLink {
                    label: "Home".to_string(),
                    target: "home".to_string(),
                },
                NavLink {
                    label: "About".to_string(),
                    target: "about".to_string(),
                },
            ],
            String::new(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut handler = EventHandler::new();
        let mut ui = ui();
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('q')), &mut ui),
            EventResult::Quit
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Esc), &mut ui),
            EventResult::Quit
        );
    }

    #[test]
    fn test_link_activation_returns_anchor_and_closes_menu() {
        let mut handler = EventHandler::new();
        let mut ui = ui();
        handler.handle_key_event(key(KeyCode::Char('m')), &mut ui);
        assert!(ui.is_menu_open());

        handler.handle_key_event(key(KeyCode::Char('l')), &mut ui);
        let result = handler.handle_key_event(key(KeyCode::Enter), &mut ui);
        assert_eq!(result, EventResult::Anchor("about".to_string()));
        assert!(!ui.is_menu_open());
    }

    #[test]
    fn test_quick_link_out_of_range_is_inert() {
        let mut handler = EventHandler::new();
        let mut ui = ui();
        let result = handler.handle_key_event(key(KeyCode::Char('9')), &mut ui);
        assert_eq!(result, EventResult::Continue);
    }

    #[test]
    fn test_form_mode_swallows_browse_keys() {
        let mut handler = EventHandler::new();
        let mut ui = ui();
        ui.open_contact_form();

        // 'q' is text now, not quit.
        let result = handler.handle_key_event(key(KeyCode::Char('q')), &mut ui);
        assert_eq!(result, EventResult::Continue);
        assert_eq!(ui.contact_form().name(), "q");

        // Esc leaves the form instead of quitting.
        let result = handler.handle_key_event(key(KeyCode::Esc), &mut ui);
        assert_eq!(result, EventResult::Continue);
        assert_eq!(ui.mode(), UIMode::Browse);
    }

    #[test]
    fn test_form_submit_bubbles_up() {
        let mut handler = EventHandler::new();
        let mut ui = ui();
        ui.open_contact_form();
        let result = handler.handle_key_event(key(KeyCode::Enter), &mut ui);
        assert_eq!(result, EventResult::SubmitContact);
    }
}
