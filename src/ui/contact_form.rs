//! The contact form, shown in place of the page viewport.
//!
//! Field handling mirrors an ordinary form: Tab cycles fields, Enter in a
//! single-line field submits, Enter in the message inserts a newline, and
//! the send button submits. Validation and the mailto handoff live with
//! the app; this module owns the fields, the focus, and the inline status.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

use crate::contact::{FormStatus, StatusKind};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
    Send,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::Send,
            Self::Send => Self::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Name => Self::Send,
            Self::Email => Self::Name,
            Self::Message => Self::Email,
            Self::Send => Self::Message,
        }
    }
}

/// Form outcomes the app must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Cancel,
}

#[derive(Debug)]
pub struct ContactFormState {
    name: String,
    email: String,
    message: String,
    focus: FormField,
    status: Option<FormStatus>,
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            focus: FormField::Name,
            status: None,
        }
    }
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn status(&self) -> Option<&FormStatus> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: FormStatus) {
        self.status = Some(status);
    }

    /// Drop the status once its display time is up. The clock keeps
    /// running while the user is elsewhere on the page.
    pub fn expire_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }

    /// Empty the fields after a successful submission. The status stays;
    /// it has its own clock.
    pub fn reset_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.focus = FormField::Name;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormAction> {
        match key.code {
            KeyCode::Esc => return Some(FormAction::Cancel),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.focus {
                FormField::Message => self.message.push('\n'),
                _ => return Some(FormAction::Submit),
            },
            KeyCode::Backspace => {
                if let Some(field) = self.field_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                let plain = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();
                if plain {
                    if let Some(field) = self.field_mut() {
                        field.push(c);
                    }
                }
            }
            _ => {}
        }
        None
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Message => Some(&mut self.message),
            FormField::Send => None,
        }
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    form: &ContactFormState,
    recipient: &str,
) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Get In Touch ")
        .style(theme.get_component_style("form_border", false));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // recipient line
            Constraint::Length(3), // name
            Constraint::Length(3), // email
            Constraint::Min(4),    // message
            Constraint::Length(1), // send
            Constraint::Length(1), // status
            Constraint::Length(1), // hint
        ])
        .split(inner);

    let recipient_line = Paragraph::new(Line::from(vec![
        Span::styled("To: ", theme.get_component_style("form_label", false)),
        Span::styled(
            recipient.to_string(),
            theme.get_component_style("body", false),
        ),
    ]));
    frame.render_widget(recipient_line, chunks[0]);

    render_input(
        frame,
        chunks[1],
        theme,
        "Name",
        form.name(),
        form.focus() == FormField::Name,
    );
    render_input(
        frame,
        chunks[2],
        theme,
        "Email",
        form.email(),
        form.focus() == FormField::Email,
    );
    render_input(
        frame,
        chunks[3],
        theme,
        "Message",
        form.message(),
        form.focus() == FormField::Message,
    );

    let send_focused = form.focus() == FormField::Send;
    let send = Paragraph::new(Line::from(Span::styled(
        " [ Send Message ] ",
        theme.get_component_style("form_button", send_focused),
    )));
    frame.render_widget(send, chunks[4]);

    if let Some(status) = form.status() {
        let style_name = match status.kind {
            StatusKind::Success => "status_success",
            StatusKind::Error => "status_error",
        };
        let line = Paragraph::new(Line::from(Span::styled(
            status.message.clone(),
            theme.get_component_style(style_name, false),
        )));
        frame.render_widget(line, chunks[5]);
    }

    let hint = Paragraph::new(Line::from(Span::styled(
        "Tab fields · Enter send · Esc back",
        theme.get_component_style("help_line", false),
    )));
    frame.render_widget(hint, chunks[6]);
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    label: &str,
    value: &str,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", label))
        .border_style(theme.get_component_style("form_border", focused))
        .title_style(theme.get_component_style("form_label", false));

    let shown = if focused {
        format!("{}▌", value)
    } else {
        value.to_string()
    };
    let input = Paragraph::new(shown)
        .style(theme.get_component_style("form_field", focused))
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(input, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut ContactFormState, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_focus_cycle() {
        let mut form = ContactFormState::new();
        assert_eq!(form.focus(), FormField::Name);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), FormField::Email);
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), FormField::Send);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), FormField::Name);
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus(), FormField::Send);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = ContactFormState::new();
        type_str(&mut form, "Ada");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "ada@example.com");
        assert_eq!(form.name(), "Ada");
        assert_eq!(form.email(), "ada@example.com");

        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.email(), "ada@example.co");
    }

    #[test]
    fn test_enter_in_message_inserts_newline() {
        let mut form = ContactFormState::new();
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), FormField::Message);
        type_str(&mut form, "line one");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), None);
        type_str(&mut form, "line two");
        assert_eq!(form.message(), "line one\nline two");
    }

    #[test]
    fn test_enter_elsewhere_submits() {
        let mut form = ContactFormState::new();
        assert_eq!(
            form.handle_key(key(KeyCode::Enter)),
            Some(FormAction::Submit)
        );
    }

    #[test]
    fn test_esc_cancels() {
        let mut form = ContactFormState::new();
        assert_eq!(
            form.handle_key(key(KeyCode::Esc)),
            Some(FormAction::Cancel)
        );
    }

    #[test]
    fn test_reset_keeps_status() {
        let now = Instant::now();
        let mut form = ContactFormState::new();
        type_str(&mut form, "Ada");
        form.set_status(FormStatus::success("sent", now));
        form.reset_fields();
        assert_eq!(form.name(), "");
        assert!(form.status().is_some());
    }

    #[test]
    fn test_status_expires_on_its_own_clock() {
        let now = Instant::now();
        let mut form = ContactFormState::new();
        form.set_status(FormStatus::error("nope", now));

        form.expire_status(now + Duration::from_millis(4999));
        assert!(form.status().is_some());
        form.expire_status(now + Duration::from_millis(5000));
        assert!(form.status().is_none());
    }

    #[test]
    fn test_control_chars_are_ignored() {
        let mut form = ContactFormState::new();
        form.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(form.name(), "");
    }
}
