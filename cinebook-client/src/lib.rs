//! Cinebook Client - movie booking client
//!
//! Booking session state, seat-grid reconciliation and the REST client for
//! the booking backend.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod http;
pub mod logger;
pub mod notice;
pub mod session;

pub use api::{BookingApi, BookingList};
pub use config::{ClientConfig, IdentityMode};
pub use controller::{BookingController, SeatLoadOutcome};
pub use error::{BookingError, BookingResult, ClientError, ClientResult};
pub use history::{BookingHistory, HistoryFilter};
pub use http::HttpClient;
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use session::{BookingSession, BookingSummary, SeatMapStatus, SeatState, SlotSelection};

// Re-export shared types for convenience
pub use shared::{
    BookRequest, BookResponse, Booking, BookingQuery, CustomerIdentity, Movie, MovieCreate,
    MovieQuery, MovieSort, Showtime, ShowtimeSlot,
};
