//! Booking Model

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use super::showtime::{MovieId, SeatNumber, Showtime, ShowtimeSlot};

/// Booking status as far as the client cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BookingStatus {
    /// Anything the server did not mark as cancelled ("Active", "Confirmed", ...)
    #[default]
    Active,
    Cancelled,
}

impl BookingStatus {
    pub fn from_server(value: Option<&str>) -> Self {
        match value {
            Some(s) if s.trim().eq_ignore_ascii_case("cancelled") => Self::Cancelled,
            _ => Self::Active,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_server(raw.as_deref()))
    }
}

/// Booking record (server-owned, read only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub movie_id: MovieId,
    #[serde(default)]
    pub movie_title: String,
    /// Calendar date as stored by the server (`YYYY-MM-DD`)
    pub date: String,
    /// Showtime label as stored by the server
    pub time: String,
    #[serde(deserialize_with = "deserialize_seats")]
    pub seats: Vec<SeatNumber>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Booking {
    pub fn show_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn showtime(&self) -> Option<Showtime> {
        self.time.parse().ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Whether this booking occupies seats of `slot`
    pub fn is_for_slot(&self, slot: &ShowtimeSlot) -> bool {
        self.movie_id == slot.movie_id
            && self.show_date() == Some(slot.date)
            && self.showtime() == Some(slot.time)
    }
}

/// Per-movie totals returned next to the booking list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingAnalytics {
    #[serde(default)]
    pub total_bookings_per_movie: HashMap<String, u64>,
    #[serde(default)]
    pub total_revenue_per_movie: HashMap<String, u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeat {
    Number(SeatNumber),
    Text(String),
}

/// Seats arrive as numbers or numeric strings (`"12"`); blanks are skipped.
pub fn deserialize_seats<'de, D>(deserializer: D) -> Result<Vec<SeatNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawSeat>::deserialize(deserializer)?;
    let mut seats = Vec::with_capacity(raw.len());
    for seat in raw {
        match seat {
            RawSeat::Number(n) => seats.push(n),
            RawSeat::Text(s) if s.trim().is_empty() => {}
            RawSeat::Text(s) => {
                let n = s.trim().parse::<SeatNumber>().map_err(|_| {
                    serde::de::Error::custom(format!("invalid seat number: {s:?}"))
                })?;
                seats.push(n);
            }
        }
    }
    Ok(seats)
}

/// Optional variant of [`deserialize_seats`]
pub fn deserialize_optional_seats<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<SeatNumber>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "deserialize_seats")] Vec<SeatNumber>);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}

/// RFC 3339 or `YYYY-MM-DD HH:MM:SS`; anything else is treated as absent.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}
