//! The login card: two inputs with their error lines, the submit button and
//! the sign-up link.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::form::Field;
use crate::theme::Theme;

pub const CARD_WIDTH: u16 = 44;
pub const CARD_HEIGHT: u16 = 17;

pub fn draw(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let block = Block::default()
        .title(Span::styled(
            " Log in ",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.inactive));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(3), // Username
            Constraint::Length(1), // Username error
            Constraint::Length(3), // Password
            Constraint::Length(1), // Password error
            Constraint::Length(3), // Submit button
            Constraint::Length(1),
            Constraint::Length(1), // Sign-up link
        ])
        .split(inner);

    draw_input(f, app, Field::Username, rows[0], theme);
    draw_error(f, app, Field::Username, rows[1], theme);
    draw_input(f, app, Field::Password, rows[2], theme);
    draw_error(f, app, Field::Password, rows[3], theme);
    draw_submit(f, app, rows[4], theme);
    draw_sign_up(f, app, rows[6], theme);
}

fn draw_input(f: &mut Frame, app: &App, field: Field, area: Rect, theme: &Theme) {
    let focused = app.focus.field() == Some(field);
    let has_error = app.form.error(field).is_some();
    let border = if has_error {
        theme.danger
    } else if focused {
        theme.accent
    } else {
        theme.inactive
    };

    let value = app.form.value(field);
    let cursor = if focused { "_" } else { "" };
    let content = if value.is_empty() && !focused {
        Line::from(Span::styled(field.to_string(), Style::default().fg(theme.text_dim)))
    } else {
        let shown = match field {
            Field::Username => value.to_string(),
            Field::Password => "•".repeat(value.chars().count()),
        };
        Line::from(vec![
            Span::styled(shown, Style::default().fg(theme.text)),
            Span::styled(cursor, Style::default().fg(theme.accent)),
        ])
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(input, area);
}

fn draw_error(f: &mut Frame, app: &App, field: Field, area: Rect, theme: &Theme) {
    if let Some(err) = app.form.error(field) {
        let line = Paragraph::new(Span::styled(err.to_string(), Style::default().fg(theme.danger)));
        f.render_widget(line, area);
    }
}

fn draw_submit(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let submitting = app.form.is_submitting();
    let focused = app.focus == Focus::Submit;

    let style = if submitting {
        Style::default().fg(theme.inactive)
    } else if focused {
        Style::default()
            .fg(theme.background)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    };
    let border = if focused && !submitting { theme.accent } else { theme.inactive };

    let button = Paragraph::new(Span::styled(app.form.submit_label(), style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(button, area);
}

fn draw_sign_up(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let mut link = Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED);
    if app.focus == Focus::SignUp {
        link = link.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }

    let line = Paragraph::new(Line::from(vec![
        Span::styled("or, ", Style::default().fg(theme.text_dim)),
        Span::styled("sign up", link),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(line, area);
}
