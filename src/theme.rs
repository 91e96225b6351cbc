use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub focus_border: Color,
    pub blurred_border: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub selection_fg: Color,

    // Specific components
    pub title: Style,
    pub nav_active: Style,
    pub nav_inactive: Style,
    pub spinner: Style,
    pub status: Style,
    pub status_time: Style,
    pub article_title: Style,
    pub article_topic: Style,
    pub placeholder: Style,
    pub disabled: Style,
    pub footer: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus_border: Color::Cyan,
            blurred_border: Color::DarkGray,
            text: Color::White,
            text_secondary: Color::Gray,
            selection_fg: Color::Yellow,

            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            nav_active: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            nav_inactive: Style::default().fg(Color::Gray),
            spinner: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            status: Style::default().fg(Color::Green),
            status_time: Style::default().fg(Color::DarkGray),
            article_title: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            article_topic: Style::default().fg(Color::Magenta),
            placeholder: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            disabled: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        }
    }
}
