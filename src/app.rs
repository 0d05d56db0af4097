use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;

use crate::auth::{AuthError, AuthSuccess, Authenticator};
use crate::config::AppConfig;
use crate::form::{Field, LoginForm, Notice, SubmitStart};

/// Seconds before a status message clears itself
const STATUS_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Username,
    Password,
    Submit,
    SignUp,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Username => Focus::Password,
            Focus::Password => Focus::Submit,
            Focus::Submit => Focus::SignUp,
            Focus::SignUp => Focus::Username,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Username => Focus::SignUp,
            Focus::Password => Focus::Username,
            Focus::Submit => Focus::Password,
            Focus::SignUp => Focus::Submit,
        }
    }

    /// The text field this focus edits, if any
    pub fn field(self) -> Option<Field> {
        match self {
            Focus::Username => Some(Field::Username),
            Focus::Password => Some(Field::Password),
            Focus::Submit | Focus::SignUp => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    None,
    Notice(Notice),
    Help,
}

type AuthOutcome = Result<AuthSuccess, AuthError>;

pub struct App {
    pub form: LoginForm,
    pub focus: Focus,
    pub popup: Popup,
    pub config: AppConfig,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    authenticator: Arc<dyn Authenticator>,
    // Result of the in-flight submission, polled from tick()
    pending: Option<oneshot::Receiver<AuthOutcome>>,
}

impl App {
    pub fn new(config: AppConfig, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            form: LoginForm::new(),
            focus: Focus::Username,
            popup: Popup::None,
            config,
            status_message: None,
            status_message_time: None,
            authenticator,
            pending: None,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                self.popup = Popup::None;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(self.focus.prev()),

            KeyCode::Enter => match self.focus {
                Focus::SignUp => self.sign_up(),
                _ => self.submit(),
            },
            // Space activates buttons; in text fields it is just a character
            KeyCode::Char(' ') if self.focus == Focus::Submit => self.submit(),
            KeyCode::Char(' ') if self.focus == Focus::SignUp => self.sign_up(),

            KeyCode::F(1) => self.popup = Popup::Help,

            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = self.editable_field() {
                    self.form.push_char(field, c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.editable_field() {
                    self.form.pop_char(field);
                }
            }

            _ => {}
        }
        Ok(())
    }

    /// Focused text field, unless input is locked by an in-flight submission
    fn editable_field(&self) -> Option<Field> {
        if self.form.is_submitting() {
            None
        } else {
            self.focus.field()
        }
    }

    fn move_focus(&mut self, to: Focus) {
        if self.config.validate_on_blur {
            if let Some(field) = self.editable_field() {
                self.form.validate_field(field);
            }
        }
        self.focus = to;
    }

    /// Validate and, if the form is complete, hand it to the authenticator
    pub fn submit(&mut self) {
        match self.form.begin_submit() {
            SubmitStart::AlreadySubmitting => self.set_status("Already logging in..."),
            SubmitStart::Invalid(errors) => {
                // Jump to the first field that needs attention
                if let Some(field) = errors.keys().next() {
                    self.focus = match field {
                        Field::Username => Focus::Username,
                        Field::Password => Focus::Password,
                    };
                }
            }
            SubmitStart::Started(attempt) => {
                let (tx, rx) = oneshot::channel();
                let auth = Arc::clone(&self.authenticator);
                tokio::spawn(async move {
                    let outcome = auth.authenticate(&attempt).await;
                    let _ = tx.send(outcome);
                });
                self.pending = Some(rx);
            }
        }
    }

    fn sign_up(&mut self) {
        let notice = self.form.activate_sign_up();
        self.show_notice(notice);
    }

    /// Open the notice popup. Desktop notifications are best-effort.
    fn show_notice(&mut self, notice: Notice) {
        if self.config.notifications {
            if let Err(e) = crate::notify(&notice.title, &notice.body) {
                tracing::warn!("Desktop notification failed: {}", e);
                self.set_status("Desktop notification unavailable");
            }
        }
        self.popup = Popup::Notice(notice);
    }

    pub async fn tick(&mut self) -> Result<()> {
        // Settle a finished submission
        if let Some(rx) = self.pending.as_mut() {
            let outcome = match rx.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(oneshot::error::TryRecvError::Empty) => None,
                Err(oneshot::error::TryRecvError::Closed) => Some(Err(AuthError::Unavailable(
                    "login task ended without a result".to_string(),
                ))),
            };

            if let Some(outcome) = outcome {
                self.pending = None;
                let succeeded = outcome.is_ok();
                let notice = self.form.finish_submit(outcome);
                if succeeded {
                    self.focus = Focus::Username;
                }
                self.show_notice(notice);
            }
        }

        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_TIMEOUT_SECS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        Ok(())
    }
}
