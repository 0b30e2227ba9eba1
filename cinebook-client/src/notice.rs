//! Transient user notices
//!
//! The booking page shows one message at a time and hides it after a few
//! seconds. Expiry is computed from the instant a notice was shown, so no
//! timer task is needed.

use std::time::{Duration, Instant};

use crate::{BookingError, ClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    /// User-facing text for a failed action; `None` for errors that are
    /// dropped silently
    pub fn from_error(err: &BookingError) -> Option<Self> {
        let text = match err {
            BookingError::StaleResponse => return None,
            BookingError::IncompleteSlot => "Please select movie, date and showtime".to_string(),
            BookingError::NoSeatsSelected => "Please select at least one seat".to_string(),
            BookingError::InvalidSeat(seat) => format!("Seat {seat} is not available"),
            BookingError::MissingCustomerInfo(_) => {
                "Please fill in all customer details".to_string()
            }
            BookingError::SubmitInProgress => "Your booking is already being submitted".to_string(),
            BookingError::Network(ClientError::Server { message, .. }) => message.clone(),
            BookingError::Network(ClientError::Validation(e)) => e.message.clone(),
            BookingError::Network(_) => "Error connecting to server".to_string(),
        };
        Some(Self::error(text))
    }
}

#[derive(Debug, Clone)]
struct Shown {
    notice: Notice,
    at: Instant,
}

/// Holds the notice currently on screen
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    display_for: Duration,
    current: Option<Shown>,
}

impl NoticeBoard {
    pub const DEFAULT_DISPLAY: Duration = Duration::from_secs(5);

    pub fn new(display_for: Duration) -> Self {
        Self {
            display_for,
            current: None,
        }
    }

    /// Replace whatever is shown
    pub fn show(&mut self, notice: Notice, now: Instant) {
        self.current = Some(Shown { notice, at: now });
    }

    /// Show the notice for `err`, if it has one
    pub fn show_error(&mut self, err: &BookingError, now: Instant) {
        let category = err.code().category();
        if let Some(notice) = Notice::from_error(err) {
            tracing::debug!(
                category = category.name(),
                user_error = category.is_user_error(),
                text = %notice.text,
                "error notice shown"
            );
            self.show(notice, now);
        }
    }

    /// The visible notice at `now`
    pub fn current(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|s| now.saturating_duration_since(s.at) < self.display_for)
            .map(|s| &s.notice)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DISPLAY)
    }
}
