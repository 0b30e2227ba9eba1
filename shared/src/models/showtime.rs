//! Showtimes, slots and seat numbering

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};

/// Server-assigned movie identifier
pub type MovieId = i64;

/// Seat number, 1-based
pub type SeatNumber = u32;

/// Number of seats in every auditorium grid
pub const TOTAL_SEATS: SeatNumber = 50;

/// Whether `seat` lies on the grid `[1, TOTAL_SEATS]`
#[inline]
pub fn is_valid_seat(seat: SeatNumber) -> bool {
    (1..=TOTAL_SEATS).contains(&seat)
}

/// One of the five fixed daily showtimes
///
/// The canonical form is the 24-hour label (`"13:00"`); the 12-hour labels
/// (`"01:00 PM"`) are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Showtime {
    TenAm,
    OnePm,
    FourPm,
    SevenPm,
    TenPm,
}

impl Showtime {
    /// All showtimes in daily order
    pub const ALL: [Showtime; 5] = [
        Showtime::TenAm,
        Showtime::OnePm,
        Showtime::FourPm,
        Showtime::SevenPm,
        Showtime::TenPm,
    ];

    /// 24-hour display label
    pub const fn label(&self) -> &'static str {
        match self {
            Showtime::TenAm => "10:00",
            Showtime::OnePm => "13:00",
            Showtime::FourPm => "16:00",
            Showtime::SevenPm => "19:00",
            Showtime::TenPm => "22:00",
        }
    }

    /// 12-hour display label
    pub const fn twelve_hour_label(&self) -> &'static str {
        match self {
            Showtime::TenAm => "10:00 AM",
            Showtime::OnePm => "01:00 PM",
            Showtime::FourPm => "04:00 PM",
            Showtime::SevenPm => "07:00 PM",
            Showtime::TenPm => "10:00 PM",
        }
    }
}

impl fmt::Display for Showtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Showtime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Showtime::ALL
            .into_iter()
            .find(|t| t.label() == s || t.twelve_hour_label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::InvalidShowtime, format!("unknown showtime: {s}"))
                    .with_detail("value", s)
            })
    }
}

impl From<Showtime> for String {
    fn from(time: Showtime) -> Self {
        time.label().to_string()
    }
}

impl TryFrom<String> for Showtime {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single showing: movie, calendar date and showtime
///
/// Also serves as the identity key for seat occupancy; its `Display` form
/// is `movieId|date|time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShowtimeSlot {
    pub movie_id: MovieId,
    pub date: NaiveDate,
    pub time: Showtime,
}

/// Key under which booked seats are tracked
pub type SlotKey = ShowtimeSlot;

impl ShowtimeSlot {
    pub fn new(movie_id: MovieId, date: NaiveDate, time: Showtime) -> Self {
        Self {
            movie_id,
            date,
            time,
        }
    }

    /// Whether the showing can still be booked on `today`
    pub fn is_bookable_on(&self, today: NaiveDate) -> bool {
        self.date >= today
    }

    /// `"2025-06-01 at 13:00"`
    pub fn date_time_label(&self) -> String {
        format!("{} at {}", self.date, self.time)
    }
}

impl fmt::Display for ShowtimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.movie_id, self.date, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_showtime_parses_both_label_forms() {
        assert_eq!("13:00".parse::<Showtime>().unwrap(), Showtime::OnePm);
        assert_eq!("01:00 PM".parse::<Showtime>().unwrap(), Showtime::OnePm);
        assert_eq!(" 10:00 pm ".parse::<Showtime>().unwrap(), Showtime::TenPm);
        assert_eq!("10:00 AM".parse::<Showtime>().unwrap(), Showtime::TenAm);

        let err = "11:30".parse::<Showtime>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidShowtime);
    }

    #[test]
    fn test_showtime_serializes_canonical_label() {
        let json = serde_json::to_string(&Showtime::SevenPm).unwrap();
        assert_eq!(json, "\"19:00\"");
        let time: Showtime = serde_json::from_str("\"04:00 PM\"").unwrap();
        assert_eq!(time, Showtime::FourPm);
        assert!(serde_json::from_str::<Showtime>("\"noon\"").is_err());
    }

    #[test]
    fn test_slot_key_display() {
        let slot = ShowtimeSlot::new(3, date("2025-06-01"), Showtime::OnePm);
        assert_eq!(slot.to_string(), "3|2025-06-01|13:00");
        assert_eq!(slot.date_time_label(), "2025-06-01 at 13:00");
    }

    #[test]
    fn test_bookable_on() {
        let slot = ShowtimeSlot::new(1, date("2025-06-01"), Showtime::TenAm);
        assert!(slot.is_bookable_on(date("2025-06-01")));
        assert!(slot.is_bookable_on(date("2025-05-31")));
        assert!(!slot.is_bookable_on(date("2025-06-02")));
    }

    #[test]
    fn test_seat_range() {
        assert!(!is_valid_seat(0));
        assert!(is_valid_seat(1));
        assert!(is_valid_seat(TOTAL_SEATS));
        assert!(!is_valid_seat(TOTAL_SEATS + 1));
    }
}
