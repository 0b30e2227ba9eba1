//! Input validation helpers
//!
//! Text length limits and checks applied to payloads before they are sent
//! and to server payloads after they are received.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::showtime::{SeatNumber, TOTAL_SEATS, is_valid_seat};

// ── Text length limits ──────────────────────────────────────────────

/// Movie titles, customer names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone, duration text, user id
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that a number is strictly positive.
pub fn validate_positive(value: i64, field: &str) -> AppResult<()> {
    if value <= 0 {
        return Err(AppError::out_of_range(field, value));
    }
    Ok(())
}

/// Validate that a seat lies on the grid.
pub fn validate_seat(seat: SeatNumber) -> AppResult<()> {
    if !is_valid_seat(seat) {
        return Err(AppError::with_message(
            ErrorCode::InvalidSeat,
            format!("seat {seat} is outside 1..={TOTAL_SEATS}"),
        )
        .with_detail("seat", seat));
    }
    Ok(())
}
