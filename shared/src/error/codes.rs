//! Error codes for the booking client
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Seat errors
//! - 2xxx: Slot errors
//! - 3xxx: Booking errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking error code enum
///
/// Represented as u16 values so they serialize compactly and can be shown
/// next to a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Seat ====================
    /// Seat is outside the grid or already booked
    InvalidSeat = 1001,
    /// No seat has been selected
    NoSeatsSelected = 1002,

    // ==================== 2xxx: Slot ====================
    /// Movie, date or showtime not chosen
    IncompleteSlot = 2001,
    /// Response belongs to a slot that is no longer active
    StaleResponse = 2002,
    /// Showtime label not recognised
    InvalidShowtime = 2003,

    // ==================== 3xxx: Booking ====================
    /// Customer identity missing or incomplete
    MissingCustomerInfo = 3001,
    /// A booking submission is already in flight
    SubmitInProgress = 3002,

    // ==================== 9xxx: System ====================
    /// Network error
    NetworkError = 9003,
    /// Server returned a body that does not match the contract
    InvalidResponse = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Seat
            ErrorCode::InvalidSeat => "Seat is not available",
            ErrorCode::NoSeatsSelected => "No seats selected",

            // Slot
            ErrorCode::IncompleteSlot => "Movie, date and showtime must all be selected",
            ErrorCode::StaleResponse => "Response belongs to a previous showtime selection",
            ErrorCode::InvalidShowtime => "Unknown showtime",

            // Booking
            ErrorCode::MissingCustomerInfo => "Customer information is missing",
            ErrorCode::SubmitInProgress => "A booking is already being submitted",

            // System
            ErrorCode::NetworkError => "Network error",
            ErrorCode::InvalidResponse => "Invalid response from server",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Seat
            1001 => Ok(ErrorCode::InvalidSeat),
            1002 => Ok(ErrorCode::NoSeatsSelected),

            // Slot
            2001 => Ok(ErrorCode::IncompleteSlot),
            2002 => Ok(ErrorCode::StaleResponse),
            2003 => Ok(ErrorCode::InvalidShowtime),

            // Booking
            3001 => Ok(ErrorCode::MissingCustomerInfo),
            3002 => Ok(ErrorCode::SubmitInProgress),

            // System
            9003 => Ok(ErrorCode::NetworkError),
            9006 => Ok(ErrorCode::InvalidResponse),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
