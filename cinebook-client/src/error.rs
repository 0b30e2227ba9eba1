//! Client error types

use reqwest::StatusCode;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Transport-level error
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: StatusCode, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request payload rejected before sending
    #[error("Validation error: {0}")]
    Validation(#[from] AppError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Booking flow error
#[derive(Debug, Error)]
pub enum BookingError {
    /// Seat outside the grid or already booked
    #[error("Invalid seat: {0}")]
    InvalidSeat(u32),

    /// Movie, date or showtime not chosen
    #[error("Movie, date and showtime must all be selected")]
    IncompleteSlot,

    /// Nothing selected
    #[error("No seats selected")]
    NoSeatsSelected,

    /// Identity absent or incomplete
    #[error("Missing customer information: {0}")]
    MissingCustomerInfo(String),

    /// A submission for this session is already in flight
    #[error("A booking is already being submitted")]
    SubmitInProgress,

    /// Response for a slot that is no longer active
    #[error("Stale response discarded")]
    StaleResponse,

    /// Network or server failure
    #[error("Network error: {0}")]
    Network(#[from] ClientError),
}

impl BookingError {
    /// Error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidSeat(_) => ErrorCode::InvalidSeat,
            Self::IncompleteSlot => ErrorCode::IncompleteSlot,
            Self::NoSeatsSelected => ErrorCode::NoSeatsSelected,
            Self::MissingCustomerInfo(_) => ErrorCode::MissingCustomerInfo,
            Self::SubmitInProgress => ErrorCode::SubmitInProgress,
            Self::StaleResponse => ErrorCode::StaleResponse,
            Self::Network(ClientError::InvalidResponse(_) | ClientError::Serialization(_)) => {
                ErrorCode::InvalidResponse
            }
            Self::Network(ClientError::Validation(e)) => e.code,
            Self::Network(_) => ErrorCode::NetworkError,
        }
    }

    /// Stale responses are dropped silently instead of shown to the user
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::StaleResponse)
    }

    /// Caused by the user's input rather than the network or the server
    pub fn is_user_error(&self) -> bool {
        self.code().category().is_user_error()
    }
}

/// Result type for booking operations
pub type BookingResult<T> = Result<T, BookingError>;
