//! Booking history ("My bookings")

use std::cmp::Ordering;

use shared::{Booking, BookingAnalytics};

/// Which bookings to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Active,
    Cancelled,
}

impl HistoryFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            Self::All => true,
            Self::Active => !booking.is_cancelled(),
            Self::Cancelled => booking.is_cancelled(),
        }
    }
}

/// Newest first. Undated bookings go last, highest id first.
fn newest_first(a: &Booking, b: &Booking) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| b.id.cmp(&a.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.id.cmp(&a.id),
    }
}

/// A filtered, sorted view of the user's bookings
#[derive(Debug, Clone, Default)]
pub struct BookingHistory {
    bookings: Vec<Booking>,
    analytics: Option<BookingAnalytics>,
}

impl BookingHistory {
    pub fn new(mut bookings: Vec<Booking>, filter: HistoryFilter) -> Self {
        bookings.retain(|b| filter.matches(b));
        bookings.sort_by(newest_first);
        Self {
            bookings,
            analytics: None,
        }
    }

    pub fn with_analytics(mut self, analytics: Option<BookingAnalytics>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Booking> {
        self.bookings.iter()
    }

    pub fn get(&self, id: i64) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Bookings that still offer a cancel action
    pub fn cancellable(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.iter().filter(|b| !b.is_cancelled())
    }

    pub fn analytics(&self) -> Option<&BookingAnalytics> {
        self.analytics.as_ref()
    }
}

impl<'a> IntoIterator for &'a BookingHistory {
    type Item = &'a Booking;
    type IntoIter = std::slice::Iter<'a, Booking>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn booking(id: i64, created_at: Option<&str>, status: &str) -> Booking {
        serde_json::from_value(json!({
            "id": id,
            "movie_id": 1,
            "movie_title": "Inception",
            "date": "2025-06-01",
            "time": "13:00",
            "seats": [id],
            "total": 250,
            "status": status,
            "created_at": created_at,
        }))
        .unwrap()
    }

    fn sample() -> Vec<Booking> {
        vec![
            booking(1, Some("2025-05-01 10:00:00"), "Active"),
            booking(2, None, "Active"),
            booking(3, Some("2025-05-03T09:00:00Z"), "Cancelled"),
            booking(4, Some("2025-05-02 18:30:00"), "Confirmed"),
            booking(5, None, "cancelled"),
        ]
    }

    fn ids(history: &BookingHistory) -> Vec<i64> {
        history.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_sorted_newest_first() {
        let history = BookingHistory::new(sample(), HistoryFilter::All);
        assert_eq!(ids(&history), vec![3, 4, 1, 5, 2]);
    }

    #[test]
    fn test_filters() {
        let active = BookingHistory::new(sample(), HistoryFilter::Active);
        assert_eq!(ids(&active), vec![4, 1, 2]);

        let cancelled = BookingHistory::new(sample(), HistoryFilter::Cancelled);
        assert_eq!(ids(&cancelled), vec![3, 5]);
        assert_eq!(cancelled.cancellable().count(), 0);
    }

    #[test]
    fn test_cancellable_and_lookup() {
        let history = BookingHistory::new(sample(), HistoryFilter::All);
        let cancellable: Vec<i64> = history.cancellable().map(|b| b.id).collect();
        assert_eq!(cancellable, vec![4, 1, 2]);
        assert!(history.get(3).unwrap().is_cancelled());
        assert!(history.get(9).is_none());
    }

    #[test]
    fn test_empty() {
        let history = BookingHistory::new(Vec::new(), HistoryFilter::Active);
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.analytics().is_none());
    }
}
