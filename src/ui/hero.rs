//! Hero banner lines: greeting, name, tagline, and the typing line.

use ratatui::{
    layout::Alignment,
    text::{Line, Span},
};

use crate::page::HeroBlock;
use crate::theme::Theme;

/// Cursor glyph appended to the typing line.
pub const TYPING_CURSOR: char = '▌';

pub fn greeting_line(hero: &HeroBlock, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        hero.greeting.clone(),
        theme.get_component_style("body", false),
    ))
    .alignment(Alignment::Center)
}

pub fn name_line(hero: &HeroBlock, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        hero.name.clone(),
        theme.get_component_style("hero_name", false),
    ))
    .alignment(Alignment::Center)
}

pub fn tagline_line(hero: &HeroBlock, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        hero.tagline.clone(),
        theme.get_component_style("body", false),
    ))
    .alignment(Alignment::Center)
}

/// The animated profession line. `typed` is whatever prefix of the current
/// phrase the animator is showing right now; an empty string still gets
/// the prefix and cursor.
pub fn typed_line(hero: &HeroBlock, typed: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(hero.prefix.clone(), theme.get_component_style("body", false)),
        Span::styled(
            format!("{}{}", typed, TYPING_CURSOR),
            theme.get_component_style("hero_typed", false),
        ),
    ])
    .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> HeroBlock {
        HeroBlock {
            greeting: "Hi, I'm".to_string(),
            name: "Jordan Reyes".to_string(),
            tagline: "Software engineer".to_string(),
            prefix: "I'm a ".to_string(),
        }
    }

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_typed_line_composition() {
        let theme = Theme::default();
        let line = typed_line(&hero(), "Progr", &theme);
        assert_eq!(text_of(&line), format!("I'm a Progr{}", TYPING_CURSOR));
    }

    #[test]
    fn test_typed_line_empty_prefix_still_shows_cursor() {
        let theme = Theme::default();
        let line = typed_line(&hero(), "", &theme);
        assert_eq!(text_of(&line), format!("I'm a {}", TYPING_CURSOR));
    }

    #[test]
    fn test_name_line_carries_profile_name() {
        let theme = Theme::default();
        assert_eq!(text_of(&name_line(&hero(), &theme)), "Jordan Reyes");
    }
}
