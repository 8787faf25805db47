//! Theme support for the portfolio page.
//!
//! A theme is a named color palette plus per-component styling. Components
//! ask for styles by name through `get_component_style`, so the render code
//! never hard-codes colors.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Base color palette shared by every component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorPalette {
    // Base colors
    pub background: Color,
    pub surface: Color,
    pub overlay: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_inverse: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,

    // Status colors
    pub success: Color,
    pub error: Color,

    // Special purpose colors
    pub accent: Color,
    pub highlight: Color,
}

/// Component-specific colors layered over the palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeColors {
    pub palette: ColorPalette,
    pub navbar: NavbarColors,
    pub page: PageColors,
    pub form: FormColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavbarColors {
    pub background: Color,
    pub background_scrolled: Color,
    pub brand: Color,
    pub link: Color,
    pub link_active: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageColors {
    pub section_title: Color,
    pub body: Color,
    pub card_border: Color,
    pub card_title: Color,
    pub image_frame: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormColors {
    pub label: Color,
    pub field: Color,
    pub field_focused: Color,
    pub button: Color,
}

impl ThemeColors {
    /// Dark portfolio colors, the default.
    pub fn portfolio_dark() -> Self {
        let palette = ColorPalette {
            background: Color::Rgb(16, 16, 20),
            surface: Color::Rgb(24, 24, 28),
            overlay: Color::Rgb(32, 32, 36),

            text_primary: Color::Rgb(224, 224, 230),
            text_secondary: Color::Rgb(160, 160, 168),
            text_muted: Color::Rgb(112, 112, 120),
            text_inverse: Color::Rgb(16, 16, 20),

            border: Color::Rgb(64, 64, 72),
            border_focused: Color::Rgb(88, 166, 255),
            selection: Color::Rgb(88, 166, 255),

            success: Color::Rgb(76, 175, 80),
            error: Color::Rgb(244, 67, 54),

            accent: Color::Rgb(88, 166, 255),
            highlight: Color::Rgb(255, 193, 7),
        };

        Self {
            navbar: NavbarColors {
                background: palette.background,
                background_scrolled: palette.overlay,
                brand: palette.accent,
                link: palette.text_secondary,
                link_active: palette.accent,
            },
            page: PageColors {
                section_title: palette.accent,
                body: palette.text_primary,
                card_border: palette.border,
                card_title: palette.text_primary,
                image_frame: palette.text_muted,
            },
            form: FormColors {
                label: palette.text_secondary,
                field: palette.text_primary,
                field_focused: palette.accent,
                button: palette.accent,
            },
            palette,
        }
    }

    /// Light portfolio colors.
    pub fn portfolio_light() -> Self {
        let palette = ColorPalette {
            background: Color::Rgb(250, 250, 252),
            surface: Color::Rgb(240, 240, 244),
            overlay: Color::Rgb(228, 228, 234),

            text_primary: Color::Rgb(32, 32, 40),
            text_secondary: Color::Rgb(96, 96, 108),
            text_muted: Color::Rgb(144, 144, 156),
            text_inverse: Color::Rgb(250, 250, 252),

            border: Color::Rgb(200, 200, 210),
            border_focused: Color::Rgb(25, 103, 210),
            selection: Color::Rgb(25, 103, 210),

            success: Color::Rgb(46, 125, 50),
            error: Color::Rgb(198, 40, 40),

            accent: Color::Rgb(25, 103, 210),
            highlight: Color::Rgb(245, 124, 0),
        };

        Self {
            navbar: NavbarColors {
                background: palette.background,
                background_scrolled: palette.overlay,
                brand: palette.accent,
                link: palette.text_secondary,
                link_active: palette.accent,
            },
            page: PageColors {
                section_title: palette.accent,
                body: palette.text_primary,
                card_border: palette.border,
                card_title: palette.text_primary,
                image_frame: palette.text_muted,
            },
            form: FormColors {
                label: palette.text_secondary,
                field: palette.text_primary,
                field_focused: palette.accent,
                button: palette.accent,
            },
            palette,
        }
    }

    /// High contrast colors for accessibility.
    pub fn high_contrast() -> Self {
        let palette = ColorPalette {
            background: Color::Black,
            surface: Color::Black,
            overlay: Color::Black,

            text_primary: Color::White,
            text_secondary: Color::White,
            text_muted: Color::Gray,
            text_inverse: Color::Black,

            border: Color::White,
            border_focused: Color::Yellow,
            selection: Color::Yellow,

            success: Color::Green,
            error: Color::Red,

            accent: Color::Cyan,
            highlight: Color::Yellow,
        };

        Self {
            navbar: NavbarColors {
                background: palette.background,
                background_scrolled: palette.background,
                brand: palette.accent,
                link: palette.text_primary,
                link_active: palette.accent,
            },
            page: PageColors {
                section_title: palette.accent,
                body: palette.text_primary,
                card_border: palette.border,
                card_title: palette.text_primary,
                image_frame: palette.text_primary,
            },
            form: FormColors {
                label: palette.text_primary,
                field: palette.text_primary,
                field_focused: palette.accent,
                button: palette.accent,
            },
            palette,
        }
    }
}

/// Main theme structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

impl Theme {
    /// Dark theme, the default.
    pub fn portfolio_dark() -> Self {
        Self {
            name: "Portfolio Dark".to_string(),
            description: "Dark theme with a blue accent".to_string(),
            colors: ThemeColors::portfolio_dark(),
        }
    }

    /// Light theme.
    pub fn portfolio_light() -> Self {
        Self {
            name: "Portfolio Light".to_string(),
            description: "Light theme with a blue accent".to_string(),
            colors: ThemeColors::portfolio_light(),
        }
    }

    /// High contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            name: "High Contrast".to_string(),
            description: "High contrast theme for better accessibility".to_string(),
            colors: ThemeColors::high_contrast(),
        }
    }

    /// Look up a theme by CLI name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" | "portfolio-dark" => Some(Self::portfolio_dark()),
            "light" | "portfolio-light" => Some(Self::portfolio_light()),
            "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// Names accepted by `by_name`, for CLI error messages.
    pub fn available_names() -> &'static [&'static str] {
        &["dark", "light", "high-contrast"]
    }

    /// Get style for a specific UI component.
    pub fn get_component_style(&self, component: &str, focused: bool) -> Style {
        let colors = &self.colors;
        match component {
            "navbar" => Style::default()
                .fg(colors.navbar.link)
                .bg(colors.navbar.background),
            "navbar_scrolled" => Style::default()
                .fg(colors.navbar.link)
                .bg(colors.navbar.background_scrolled)
                .add_modifier(Modifier::BOLD),
            "navbar_brand" => Style::default()
                .fg(colors.navbar.brand)
                .add_modifier(Modifier::BOLD),
            "nav_link" => {
                if focused {
                    Style::default()
                        .fg(colors.palette.text_inverse)
                        .bg(colors.palette.selection)
                } else {
                    Style::default().fg(colors.navbar.link)
                }
            }
            "nav_link_active" => Style::default()
                .fg(colors.navbar.link_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            "hero_name" => Style::default()
                .fg(colors.palette.text_primary)
                .add_modifier(Modifier::BOLD),
            "hero_typed" => Style::default()
                .fg(colors.palette.accent)
                .add_modifier(Modifier::BOLD),
            "section_title" => Style::default()
                .fg(colors.page.section_title)
                .add_modifier(Modifier::BOLD),
            "body" => Style::default().fg(colors.page.body),
            "card_border" => {
                if focused {
                    Style::default().fg(colors.palette.border_focused)
                } else {
                    Style::default().fg(colors.page.card_border)
                }
            }
            "card_title" => Style::default()
                .fg(colors.page.card_title)
                .add_modifier(Modifier::BOLD),
            "card_hidden" => Style::default()
                .fg(colors.palette.text_muted)
                .add_modifier(Modifier::DIM),
            "image_frame" => Style::default().fg(colors.page.image_frame),
            "scroll_top" => Style::default()
                .fg(colors.palette.text_inverse)
                .bg(colors.palette.accent)
                .add_modifier(Modifier::BOLD),
            "form_label" => Style::default().fg(colors.form.label),
            "form_field" => {
                if focused {
                    Style::default()
                        .fg(colors.form.field)
                        .bg(colors.palette.overlay)
                } else {
                    Style::default().fg(colors.form.field)
                }
            }
            "form_border" => {
                if focused {
                    Style::default().fg(colors.form.field_focused)
                } else {
                    Style::default().fg(colors.palette.border)
                }
            }
            "form_button" => {
                if focused {
                    Style::default()
                        .fg(colors.palette.text_inverse)
                        .bg(colors.form.button)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.form.button)
                }
            }
            "status_success" => Style::default()
                .fg(colors.palette.success)
                .add_modifier(Modifier::BOLD),
            "status_error" => Style::default()
                .fg(colors.palette.error)
                .add_modifier(Modifier::BOLD),
            "footer" => Style::default()
                .fg(colors.palette.text_muted)
                .bg(colors.palette.surface),
            "help_line" => Style::default().fg(colors.palette.text_muted),
            _ => Style::default().fg(colors.palette.text_primary),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::portfolio_dark()
    }
}
