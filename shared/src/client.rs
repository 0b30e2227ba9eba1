//! Request/response bodies of the booking REST API
//!
//! These types mirror the JSON the backend accepts and returns. Everything
//! received is validated here or in the models before the client uses it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::booking::deserialize_optional_seats;
use crate::models::{Booking, BookingAnalytics, MovieId, SeatNumber, Showtime, ShowtimeSlot};
use crate::validation::{MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};

// =============================================================================
// Customer identity
// =============================================================================

/// Who the booking is for
///
/// Deployments differ: one backend keys bookings by the authenticated user
/// id, another by a name/email/phone contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerIdentity {
    User { user_id: String },
    Contact {
        name: String,
        email: String,
        phone: String,
    },
}

impl CustomerIdentity {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self::User {
            user_id: user_id.into(),
        }
    }

    pub fn contact(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self::Contact {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Every field present and within limits
    pub fn validate(&self) -> AppResult<()> {
        let checked = match self {
            Self::User { user_id } => {
                validate_required_text(user_id, "user_id", MAX_SHORT_TEXT_LEN)
            }
            Self::Contact { name, email, phone } => {
                validate_required_text(name, "name", MAX_NAME_LEN)
                    .and_then(|_| validate_required_text(email, "email", MAX_EMAIL_LEN))
                    .and_then(|_| validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN))
            }
        };
        checked.map_err(|e| AppError {
            code: ErrorCode::MissingCustomerInfo,
            ..e
        })
    }
}

// =============================================================================
// POST /api/book
// =============================================================================

/// Booking creation request
///
/// An empty `seats` list asks the server to pick seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRequest {
    pub movie_id: MovieId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_title: Option<String>,
    pub date: NaiveDate,
    pub time: Showtime,
    pub seats: Vec<SeatNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(flatten)]
    pub identity: Option<CustomerIdentity>,
}

impl BookRequest {
    /// Auto-assignment request for `slot`
    pub fn auto_assign(slot: &ShowtimeSlot) -> Self {
        Self {
            movie_id: slot.movie_id,
            movie_title: None,
            date: slot.date,
            time: slot.time,
            seats: Vec::new(),
            total: None,
            identity: None,
        }
    }

    /// Booking of explicitly chosen seats
    pub fn for_seats(
        slot: &ShowtimeSlot,
        movie_title: impl Into<String>,
        seats: Vec<SeatNumber>,
        total: u64,
        identity: CustomerIdentity,
    ) -> Self {
        Self {
            movie_id: slot.movie_id,
            movie_title: Some(movie_title.into()),
            date: slot.date,
            time: slot.time,
            seats,
            total: Some(total),
            identity: Some(identity),
        }
    }

    pub fn is_auto_assign(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn slot(&self) -> ShowtimeSlot {
        ShowtimeSlot::new(self.movie_id, self.date, self.time)
    }
}

/// Booking creation response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResponse {
    #[serde(default)]
    pub message: String,
    /// Seats assigned by the server (present for auto-assignment)
    #[serde(default, deserialize_with = "deserialize_optional_seats")]
    pub seats: Option<Vec<SeatNumber>>,
}

// =============================================================================
// GET /api/bookings
// =============================================================================

/// Which bookings to list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookingQuery {
    /// Every booking (`?search=`), used to reconstruct seat maps
    #[default]
    All,
    /// Free-text search over email/phone
    Search(String),
    /// Bookings of one authenticated user
    User(String),
}

impl BookingQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::All => vec![("search", String::new())],
            Self::Search(text) => vec![("search", text.trim().to_string())],
            Self::User(id) => vec![("userId", id.clone())],
        }
    }
}

/// `GET /api/bookings` body; both observed shapes are accepted
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BookingsResponse {
    Wrapped {
        bookings: Vec<Booking>,
        #[serde(default)]
        analytics: Option<BookingAnalytics>,
    },
    Bare(Vec<Booking>),
}

impl BookingsResponse {
    pub fn into_parts(self) -> (Vec<Booking>, Option<BookingAnalytics>) {
        match self {
            Self::Wrapped {
                bookings,
                analytics,
            } => (bookings, analytics),
            Self::Bare(bookings) => (bookings, None),
        }
    }
}

// =============================================================================
// Plain message bodies (cancel, admin)
// =============================================================================

/// `{message}` or `{error}` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    /// The message on success, the server's error text otherwise
    pub fn into_result(self, fallback: &str) -> Result<String, String> {
        match (self.error, self.message) {
            (Some(error), _) => Err(error),
            (None, Some(message)) => Ok(message),
            (None, None) => Ok(fallback.to_string()),
        }
    }
}
