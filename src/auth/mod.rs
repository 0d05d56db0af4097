//! Authentication backends.
//!
//! The form only talks to the [`Authenticator`] trait, so the mock below can
//! be swapped for a real backend without touching the submit state machine.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::form::LoginAttempt;

/// Default simulated round-trip for the mock backend
pub const MOCK_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSuccess {
    pub username: String,
}

/// Failures a real backend could report. The mock never produces these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[allow(dead_code)]
    #[error("Login rejected: {0}")]
    Rejected(String),

    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, attempt: &LoginAttempt) -> Result<AuthSuccess, AuthError>;
}

/// Accepts every attempt after a fixed delay
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(MOCK_DELAY)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, attempt: &LoginAttempt) -> Result<AuthSuccess, AuthError> {
        // Never log the password itself
        tracing::info!(
            username = %attempt.username,
            password_len = attempt.password.len(),
            "Login form submitted"
        );

        tokio::time::sleep(self.delay).await;

        Ok(AuthSuccess {
            username: attempt.username.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt() -> LoginAttempt {
        LoginAttempt {
            username: "alice".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_waits_then_succeeds() {
        let auth = MockAuthenticator::default();
        let start = tokio::time::Instant::now();

        let result = auth.authenticate(&attempt()).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= MOCK_DELAY);
        assert!(elapsed < MOCK_DELAY + Duration::from_millis(10));
        assert_eq!(result, Ok(AuthSuccess { username: "alice".to_string() }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_delay() {
        let auth = MockAuthenticator::new(Duration::from_millis(20));
        let start = tokio::time::Instant::now();

        assert!(auth.authenticate(&attempt()).await.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_error_messages() {
        let err = AuthError::Rejected("bad password".to_string());
        assert_eq!(err.to_string(), "Login rejected: bad password");
    }
}
