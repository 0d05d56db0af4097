mod layout;
mod login_card;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::form::Notice;
use crate::theme::Theme;

// Load theme colors from system (Omarchy/Hyprland) once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

pub fn draw(f: &mut Frame, app: &App) {
    let theme = theme();
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0], theme);

    let page_style = Style::default().bg(theme.background);
    let card = layout::render_centered(
        f,
        chunks[1],
        login_card::CARD_WIDTH,
        login_card::CARD_HEIGHT,
        page_style,
    );
    login_card::draw(f, app, card, theme);

    draw_footer(f, chunks[2], theme);

    // Draw popups on top
    match &app.popup {
        Popup::None => {}
        Popup::Notice(notice) => draw_notice(f, notice, theme),
        Popup::Help => draw_help_popup(f, theme),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(theme.danger)))
    } else if app.form.is_submitting() {
        Line::from(Span::styled("󰔟 Contacting server...", Style::default().fg(theme.accent)))
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(theme.text_dim)))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_footer(f: &mut Frame, area: Rect, theme: &Theme) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));
    let label = |l: &'static str| Span::styled(l, Style::default().fg(theme.text_dim));

    let footer = Paragraph::new(Line::from(vec![
        key("Tab"),
        label(" next  "),
        key("Enter"),
        label(" submit  "),
        key("F1"),
        label(" help  "),
        key("Esc"),
        label(" quit"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_notice(f: &mut Frame, notice: &Notice, theme: &Theme) {
    let popup_area = centered_rect(50, 7, f.area());
    f.render_widget(Clear, popup_area);

    let body = vec![
        Line::from(""),
        Line::from(Span::styled(notice.body.as_str(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled("Enter to dismiss", Style::default().fg(theme.text_dim))),
    ];

    let popup = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", notice.title),
                    Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        );
    f.render_widget(popup, popup_area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme) {
    let popup_area = centered_rect(50, 12, f.area());
    f.render_widget(Clear, popup_area);

    let row = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(theme.accent)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        row("  Tab/↓       ", "Next field"),
        row("  Shift-Tab/↑ ", "Previous field"),
        row("  Enter       ", "Log in (or follow the sign-up link)"),
        row("  Backspace   ", "Delete a character"),
        row("  Esc         ", "Close popup / quit"),
        row("  Ctrl-C      ", "Quit"),
        Line::from(""),
        Line::from(Span::styled("  Esc to close", Style::default().fg(theme.text_dim))),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .title(Span::styled(" 󰋖 Help ", Style::default().fg(theme.accent)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );
    f.render_widget(help, popup_area);
}

/// Fixed-height popup, `percent_x` of the screen wide
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let width = (r.width as u32 * percent_x as u32 / 100) as u16;
    layout::centered(r, width.max(30), height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthSuccess, MockAuthenticator};
    use crate::config::AppConfig;
    use crate::form::Field;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        App::new(AppConfig::default(), Arc::new(MockAuthenticator::default()))
    }

    /// Card title plus the button label
    fn log_in_labels(screen: &str) -> usize {
        screen.matches("Log in").count()
    }

    #[test]
    fn test_idle_card() {
        let screen = render(&app());
        assert_eq!(log_in_labels(&screen), 2);
        assert!(!screen.contains("Logging in..."));
        assert!(screen.contains("sign up"));
        assert!(!screen.contains("is required."));
    }

    #[test]
    fn test_field_errors_render() {
        let mut app = app();
        app.form.begin_submit();
        let screen = render(&app);
        assert!(screen.contains("Username is required."));
        assert!(screen.contains("Password is required."));
    }

    #[test]
    fn test_password_is_masked() {
        let mut app = app();
        app.form.update_field(Field::Password, "hunter2");
        let screen = render(&app);
        assert!(!screen.contains("hunter2"));
        assert!(screen.contains("•••••••"));
    }

    #[tokio::test]
    async fn test_submitting_label() {
        let mut app = app();
        app.form.update_field(Field::Username, "alice");
        app.form.update_field(Field::Password, "secret");
        app.submit();

        let screen = render(&app);
        assert!(screen.contains("Logging in..."));
        // Only the card title is left
        assert_eq!(log_in_labels(&screen), 1);
    }

    #[tokio::test]
    async fn test_label_reverts_after_login() {
        let mut app = app();
        app.form.update_field(Field::Username, "alice");
        app.form.update_field(Field::Password, "secret");
        app.submit();
        app.form.finish_submit(Ok(AuthSuccess {
            username: "alice".to_string(),
        }));

        let screen = render(&app);
        assert!(!screen.contains("Logging in..."));
        assert_eq!(log_in_labels(&screen), 2);
    }

    #[test]
    fn test_notice_popup() {
        let mut app = app();
        app.popup = Popup::Notice(app.form.activate_sign_up());
        let screen = render(&app);
        assert!(screen.contains("Navigate to Sign Up page (mock)."));
    }
}
