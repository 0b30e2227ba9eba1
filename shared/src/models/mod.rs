//! Domain models for the booking client

pub mod booking;
pub mod movie;
pub mod showtime;

pub use booking::{Booking, BookingAnalytics, BookingStatus};
pub use movie::{Movie, MovieCreate, MovieQuery, MovieSort};
pub use showtime::{MovieId, SeatNumber, Showtime, ShowtimeSlot, SlotKey, TOTAL_SEATS, is_valid_seat};
