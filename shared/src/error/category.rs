//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Seat errors
/// - 2xxx: Slot errors
/// - 3xxx: Booking errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Seat errors (1xxx)
    Seat,
    /// Slot errors (2xxx)
    Slot,
    /// Booking errors (3xxx)
    Booking,
    /// System errors (everything else)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Seat,
            2000..3000 => Self::Slot,
            3000..4000 => Self::Booking,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Seat => "seat",
            Self::Slot => "slot",
            Self::Booking => "booking",
            Self::System => "system",
        }
    }

    /// Whether an error in this category came from the user's input rather
    /// than from the network or the server.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Seat | Self::Slot | Self::Booking)
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
