//! Shared types for the cinebook client
//!
//! Domain models, REST request/response bodies, error codes and validation
//! helpers. Nothing in this crate performs I/O.

pub mod client;
pub mod error;
pub mod models;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{
    BookRequest, BookResponse, BookingQuery, BookingsResponse, CustomerIdentity, MessageResponse,
};
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    Booking, BookingAnalytics, BookingStatus, Movie, MovieCreate, MovieId, MovieQuery, MovieSort,
    SeatNumber, Showtime, ShowtimeSlot, SlotKey, TOTAL_SEATS,
};
