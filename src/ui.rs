use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    symbols,
};

use crate::form::{FormField, LoginField};
use crate::models::Screen;
use crate::state::{AppState, ArticlesFocus};
use crate::theme::Theme;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Renders the whole application. `tick` drives the spinner animation.
pub fn render(f: &mut Frame, state: &AppState, theme: &Theme, tick: usize) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // navigation
            Constraint::Length(1), // status line
            Constraint::Min(5),    // content
            Constraint::Length(3), // footer
        ])
        .split(area);

    render_header(f, state, theme, tick, chunks[0]);
    render_status(f, state, theme, chunks[1]);

    match state.screen {
        Screen::Login => render_login(f, state, theme, chunks[2]),
        Screen::Articles => render_articles_screen(f, state, theme, chunks[2]),
    }

    // Dim the content while a request is outstanding.
    if state.busy {
        f.buffer_mut().set_style(chunks[2], Style::default().add_modifier(Modifier::DIM));
    }

    let footer = Paragraph::new(footer_text(state))
        .block(Block::default().borders(Borders::ALL))
        .style(theme.footer);
    f.render_widget(footer, chunks[3]);
}

fn render_header(f: &mut Frame, state: &AppState, theme: &Theme, tick: usize, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(24)])
        .split(area);

    let selected = match state.screen {
        Screen::Login => 0,
        Screen::Articles => 1,
    };
    let tabs = Tabs::new(["Login [F1]", "Articles [F2]"])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Advanced Web Applications ", theme.title)),
        )
        .style(theme.nav_inactive)
        .highlight_style(theme.nav_active)
        .select(selected)
        .divider(symbols::DOT)
        .padding(" ", " ");
    f.render_widget(tabs, columns[0]);

    let session = if state.is_logged_in() { "logged in" } else { "logged out" };
    let mut spans = vec![Span::styled(state.screen.route(), Style::default().fg(theme.text_secondary))];
    spans.push(Span::raw("  "));
    if state.busy {
        spans.push(Span::styled(SPINNER_FRAMES[tick % SPINNER_FRAMES.len()], theme.spinner));
        spans.push(Span::styled(" loading", theme.spinner));
    } else {
        spans.push(Span::styled(session, Style::default().fg(theme.text_secondary)));
    }
    let info = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.blurred_border)));
    f.render_widget(info, columns[1]);
}

fn render_status(f: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let mut spans = Vec::new();
    if let Some(at) = state.message_at {
        spans.push(Span::styled(at.format("%H:%M:%S ").to_string(), theme.status_time));
    }
    spans.push(Span::styled(state.message.clone(), theme.status));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_login(f: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let login_area = centered_rect(50, 60, area);
    let form = &state.login;

    let field = |label: &str, value: String, focused: bool| -> Line<'static> {
        let marker = if focused { "→ " } else { "  " };
        let style = if focused {
            Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        Line::from(vec![
            Span::styled(format!("{}{:<10}", marker, label), style),
            Span::styled(value, Style::default().fg(theme.text)),
        ])
    };

    let masked = "•".repeat(form.password.chars().count());
    let submit_style = if form.can_submit() { theme.title } else { theme.disabled };
    let lines = vec![
        Line::from(""),
        field("Username", form.username.clone(), form.focus == LoginField::Username),
        Line::from(""),
        field("Password", masked, form.focus == LoginField::Password),
        Line::from(""),
        Line::from(Span::styled("  [ Submit credentials ]", submit_style)),
    ];
    let para = Paragraph::new(lines).block(
        Block::default()
            .title("Login")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.focus_border)),
    );
    f.render_widget(para, login_area);
}

fn render_articles_screen(f: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    render_article_form(f, state, theme, columns[0]);
    render_article_list(f, state, theme, columns[1]);
}

fn border_style(theme: &Theme, focused: bool) -> Style {
    if focused {
        Style::default().fg(theme.focus_border).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.blurred_border)
    }
}

fn render_article_form(f: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let form = &state.form;
    let form_focused = state.focus == ArticlesFocus::Form;
    let title = if form.is_editing() { "Edit Article" } else { "Create Article" };

    let label = |name: &str, field: FormField| -> Span<'static> {
        let focused = form_focused && form.focus == field;
        let marker = if focused { "→ " } else { "  " };
        let style = if focused {
            Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_secondary)
        };
        Span::styled(format!("{}{}", marker, name), style)
    };
    let value = |text: &str, placeholder: &'static str| -> Span<'static> {
        if text.is_empty() {
            Span::styled(placeholder, theme.placeholder)
        } else {
            Span::styled(text.to_string(), Style::default().fg(theme.text))
        }
    };

    let topic = form.draft.topic.map(|t| t.as_str()).unwrap_or("");
    let submit_style = if form.can_submit() { theme.title } else { theme.disabled };
    let lines = vec![
        Line::from(label("Title", FormField::Title)),
        Line::from(vec![Span::raw("    "), value(&form.draft.title, "Enter title")]),
        Line::from(""),
        Line::from(label("Text", FormField::Text)),
        Line::from(vec![Span::raw("    "), value(&form.draft.text, "Enter text")]),
        Line::from(""),
        Line::from(label("Topic (←/→)", FormField::Topic)),
        Line::from(vec![Span::raw("    "), value(topic, "-- Select topic --")]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [ Submit ]", submit_style),
            Span::raw("  "),
            Span::styled("[ Cancel: Esc ]", Style::default().fg(theme.text_secondary)),
        ]),
    ];
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL).border_style(border_style(theme, form_focused)));
    f.render_widget(para, area);
}

fn render_article_list(f: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let focused = state.focus == ArticlesFocus::List;
    let block = Block::default()
        .title(format!("Articles ({})", state.articles.len()))
        .borders(Borders::ALL)
        .border_style(border_style(theme, focused));

    if state.articles.is_empty() {
        let placeholder = Paragraph::new("No articles yet")
            .block(block)
            .alignment(Alignment::Center)
            .style(theme.placeholder);
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = state
        .articles
        .iter()
        .map(|article| {
            ListItem::new(vec![
                Line::from(Span::styled(article.title.clone(), theme.article_title)),
                Line::from(Span::styled(article.text.clone(), Style::default().fg(theme.text))),
                Line::from(vec![
                    Span::styled("Topic: ", Style::default().fg(theme.text_secondary)),
                    Span::styled(article.topic.as_str(), theme.article_topic),
                ]),
                Line::from(""),
            ])
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_symbol("→ ")
        .highlight_style(Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD));
    let mut list_state = ListState::default();
    list_state.select(state.selected);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn footer_text(state: &AppState) -> &'static str {
    match (state.screen, state.focus) {
        (Screen::Login, _) => "Tab Switch field | Enter Login | F2 Articles | Ctrl+O Logout | Esc/Ctrl+C Quit",
        (Screen::Articles, ArticlesFocus::List) => {
            "↑/↓ or j/k Select | e Edit | d Delete | n New | r Refresh | F1 Login | Ctrl+O Logout | q Quit"
        }
        (Screen::Articles, ArticlesFocus::Form) => {
            "Tab/↑/↓ Field | ←/→ Topic | Enter Submit | Esc Cancel | Ctrl+O Logout | Ctrl+C Quit"
        }
    }
}

/// Centers a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Percentage((100-percent_y)/2), Constraint::Percentage(percent_y), Constraint::Percentage((100-percent_y)/2)]).split(r)[1];
    Layout::default().direction(Direction::Horizontal)
        .constraints([Constraint::Percentage((100-percent_x)/2), Constraint::Percentage(percent_x), Constraint::Percentage((100-percent_x)/2)]).split(vertical)[1]
}
