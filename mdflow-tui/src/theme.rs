//! Theme system for dark/light modes

use mdflow_core::config::ThemeVariant;
use ratatui::style::{Color, Modifier, Style};

/// Theme definition
#[derive(Clone, Debug)]
pub struct Theme {
    pub base: Style,
    pub heading: [Style; 6],
    pub code: Style,
    pub code_block: Style,
    pub link: Style,
    pub quote: Style,
    pub quote_marker: Style,
    pub list_marker: Style,
    pub rule: Style,
    pub table_header: Style,
    pub table_border: Style,
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
}

impl Theme {
    /// Create a theme for the given variant
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            base: Style::default().fg(Color::White),
            heading: [
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            ],
            code: Style::default().fg(Color::Yellow),
            code_block: Style::default().fg(Color::Yellow),
            link: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
            quote: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            quote_marker: Style::default().fg(Color::DarkGray),
            list_marker: Style::default().fg(Color::LightRed),
            rule: Style::default().fg(Color::DarkGray),
            table_header: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            status_bar_fg: Color::Black,
            status_bar_bg: Color::LightBlue,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            base: Style::default().fg(Color::Black),
            heading: [
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::Rgb(150, 100, 0))
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            ],
            code: Style::default().fg(Color::Rgb(150, 75, 0)),
            code_block: Style::default().fg(Color::Rgb(150, 75, 0)),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            quote: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            quote_marker: Style::default().fg(Color::Gray),
            list_marker: Style::default().fg(Color::Red),
            rule: Style::default().fg(Color::Gray),
            table_header: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
        }
    }
}
