//! Rendering functions for the three screens.
//!
//! Each screen is drawn from [`App`] state alone; no rendering code
//! mutates state. Layouts are vertical stacks of fixed-height bars with
//! the content area filling the rest.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{App, MenuState, OnboardField, ProfileField, Screen};

/// Accent colors, loosely after the restaurant branding.
const ACCENT: Color = Color::Yellow;
const PRIMARY: Color = Color::Green;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Draw the entire frame for the active screen.
pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Onboarding => draw_onboarding(frame, app),
        Screen::Menu => draw_menu(frame, app),
        Screen::Profile => draw_profile(frame, app),
    }
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn draw_header(frame: &mut Frame, area: Rect, hint: &str) {
    let header = Line::from(vec![
        Span::styled(
            " LIMONE ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        Span::styled(hint, Style::default().fg(Color::Gray)),
    ]);
    let widget = Paragraph::new(header).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(widget, area);
}

fn draw_hero(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Limone",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Chicago", Style::default().fg(Color::White))),
        Line::from(Span::raw(
            "A family owned Mediterranean restaurant, focused on traditional \
             recipes served with a modern twist.",
        )),
    ];
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(widget, area);
}

/// A one-line bordered text input. Returns the inner cursor x position.
fn draw_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(if focused {
            Style::default().fg(PRIMARY)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    let widget = Paragraph::new(value)
        .block(block)
        .style(Style::default().fg(Color::White));
    frame.render_widget(widget, area);

    if focused {
        let cursor_x = area.x + 1 + value.chars().count() as u16;
        frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn centered_message(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(lines.len() as u16),
            Constraint::Min(1),
        ])
        .split(area);
    let widget = Paragraph::new(lines).centered();
    frame.render_widget(widget, vertical[1]);
}

// ---------------------------------------------------------------------------
// Onboarding
// ---------------------------------------------------------------------------

fn draw_onboarding(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(5), // hero
            Constraint::Length(3), // name input
            Constraint::Length(3), // email input
            Constraint::Length(1), // error / status
            Constraint::Min(0),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], "Tab switch field | Enter continue | Esc quit ");
    draw_hero(frame, chunks[1]);

    let form = &app.onboarding;
    draw_input(
        frame,
        chunks[2],
        "Name *",
        &form.name,
        form.focus == OnboardField::Name,
    );
    draw_input(
        frame,
        chunks[3],
        "Email *",
        &form.email,
        form.focus == OnboardField::Email,
    );

    let status = if form.submitting {
        Line::from(Span::styled("Saving...", Style::default().fg(ACCENT)))
    } else if let Some(error) = &form.error {
        Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(status), chunks[4]);
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

fn draw_menu(frame: &mut Frame, app: &App) {
    match &app.menu.state {
        MenuState::Loading => {
            centered_message(
                frame,
                frame.area(),
                vec![Line::from(Span::styled(
                    "Loading menu...",
                    Style::default().fg(PRIMARY),
                ))],
            );
        }
        MenuState::Failed(message) => {
            centered_message(
                frame,
                frame.area(),
                vec![
                    Line::from(Span::styled(
                        message.as_str(),
                        Style::default().fg(Color::Red),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press r to retry, Esc to quit",
                        Style::default().fg(Color::Gray),
                    )),
                ],
            );
        }
        MenuState::Ready => draw_menu_ready(frame, app),
    }
}

fn draw_menu_ready(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // search
            Constraint::Length(1), // category tabs / result count
            Constraint::Min(1),    // item list
        ])
        .split(frame.area());

    draw_header(
        frame,
        chunks[0],
        "Type to search | \u{2190}\u{2192} category | Ctrl+P profile | Esc quit ",
    );
    draw_input(frame, chunks[1], "Search", &app.menu.search, true);

    let visible = app.menu.visible_items();

    // While searching the category tabs give way to a result count.
    if app.menu.is_searching() {
        let count_line = Line::from(Span::styled(
            format!(
                " {} results for \"{}\"",
                visible.len(),
                app.menu.search.trim()
            ),
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(count_line), chunks[2]);
    } else {
        draw_category_tabs(frame, chunks[2], app);
    }

    let mut lines: Vec<Line<'_>> = Vec::new();
    for item in &visible {
        lines.push(Line::from(vec![
            Span::styled(
                item.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("${:.2}", item.price), Style::default().fg(ACCENT)),
            Span::raw("  "),
            Span::styled(
                item.category.clone(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            item.description.clone(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }
    if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            "No dishes match.",
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        )));
    }

    let list_block = Block::default()
        .borders(Borders::ALL)
        .title(" Menu ")
        .border_style(Style::default().fg(Color::DarkGray));
    let widget = Paragraph::new(lines)
        .block(list_block)
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, chunks[3]);
}

fn draw_category_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span<'_>> = vec![Span::raw(" ")];
    for category in &app.menu.categories {
        let style = if *category == app.menu.selected_category {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {category} "), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

fn draw_profile(frame: &mut Frame, app: &App) {
    if app.profile.loading {
        centered_message(
            frame,
            frame.area(),
            vec![Line::from(Span::styled(
                "Loading profile...",
                Style::default().fg(PRIMARY),
            ))],
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // form
            Constraint::Length(1), // status
        ])
        .split(frame.area());

    draw_header(
        frame,
        chunks[0],
        "Ctrl+S save | Ctrl+D discard | Ctrl+L log out | Esc back ",
    );

    let view = &app.profile;
    let profile = &view.profile;

    let mut lines: Vec<Line<'_>> = Vec::new();

    // Avatar row: URL if set, otherwise the initial placeholder.
    let avatar = if profile.avatar_url.is_empty() {
        format!("({})", profile.avatar_initial())
    } else {
        profile.avatar_url.clone()
    };
    lines.push(Line::from(vec![
        Span::styled("Avatar  ", Style::default().fg(Color::Gray)),
        Span::styled(avatar, Style::default().fg(ACCENT)),
    ]));
    lines.push(Line::from(""));

    let text_fields = [
        (ProfileField::FirstName, &profile.first_name),
        (ProfileField::LastName, &profile.last_name),
        (ProfileField::Email, &profile.email),
        (ProfileField::Phone, &profile.phone),
        (ProfileField::AvatarUrl, &profile.avatar_url),
    ];
    for (field, value) in text_fields {
        lines.push(field_line(field, value, view.focus == field));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Email notifications",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));

    let prefs = profile.notifications;
    let checkboxes = [
        (ProfileField::OrderStatuses, prefs.order_statuses),
        (ProfileField::PasswordChanges, prefs.password_changes),
        (ProfileField::SpecialOffers, prefs.special_offers),
        (ProfileField::Newsletter, prefs.newsletter),
    ];
    for (field, checked) in checkboxes {
        let mark = if checked { "[x]" } else { "[ ]" };
        lines.push(field_line(field, mark, view.focus == field));
    }

    let form_block = Block::default()
        .borders(Borders::ALL)
        .title(" Personal information ")
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(lines)
            .block(form_block)
            .wrap(Wrap { trim: false }),
        chunks[1],
    );

    let status = view
        .status
        .as_deref()
        .map(|s| {
            let color = if s == "Changes saved" { PRIMARY } else { Color::Red };
            Line::from(Span::styled(s.to_string(), Style::default().fg(color)))
        })
        .unwrap_or_else(|| Line::from(""));
    frame.render_widget(Paragraph::new(status), chunks[2]);
}

fn field_line<'a>(field: ProfileField, value: &str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if focused { "> " } else { "  " };
    Line::from(vec![
        Span::styled(format!("{marker}{:<18}", field.label()), label_style),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}
