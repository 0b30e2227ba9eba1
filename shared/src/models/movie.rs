//! Movie Model

use serde::{Deserialize, Serialize};

use super::showtime::MovieId;
use crate::error::AppResult;
use crate::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_positive, validate_required_text};

/// Movie entity as listed by `GET /api/movies`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub genre: String,
    /// Display text, e.g. `"148 min"`
    #[serde(default)]
    pub duration: String,
    /// Price per ticket
    pub price: u32,
}

impl Movie {
    /// Check the invariants the booking flow relies on
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.title, "title", MAX_NAME_LEN)?;
        validate_positive(i64::from(self.price), "price")
    }

    /// Total price for `seat_count` tickets
    pub fn total_for(&self, seat_count: usize) -> u64 {
        seat_count as u64 * u64::from(self.price)
    }
}

/// Sort order understood by the movie listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieSort {
    Price,
    Title,
    Duration,
}

impl MovieSort {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MovieSort::Price => "price",
            MovieSort::Title => "title",
            MovieSort::Duration => "duration",
        }
    }
}

/// Query parameters for `GET /api/movies`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    pub sort_by: Option<MovieSort>,
    pub genre: Option<String>,
}

impl MovieQuery {
    pub fn sorted_by(sort: MovieSort) -> Self {
        Self {
            sort_by: Some(sort),
            genre: None,
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Query string pairs; `sort_by` is always sent, empty meaning unsorted
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(
            "sort_by",
            self.sort_by.map(|s| s.as_str().to_string()).unwrap_or_default(),
        )];
        if let Some(genre) = self.genre.as_deref().filter(|g| !g.trim().is_empty()) {
            pairs.push(("genre", genre.trim().to_string()));
        }
        pairs
    }
}

/// Create movie payload (admin form)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieCreate {
    pub title: String,
    pub genre: String,
    pub duration: String,
    pub price: u32,
}

impl MovieCreate {
    /// The admin form has no genre field; the backend receives `"Unknown"`.
    pub fn new(title: impl Into<String>, duration: impl Into<String>, price: u32) -> Self {
        Self {
            title: title.into().trim().to_string(),
            genre: "Unknown".to_string(),
            duration: duration.into().trim().to_string(),
            price,
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.title, "title", MAX_NAME_LEN)?;
        validate_required_text(&self.duration, "duration", MAX_SHORT_TEXT_LEN)?;
        validate_positive(i64::from(self.price), "price")
    }
}
