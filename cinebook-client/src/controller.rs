//! Async driver of the booking page
//!
//! `BookingController` couples a [`BookingSession`] with a [`BookingApi`].
//! The session lock is released before every network call, so slot changes
//! and seat toggles can land while a request is in flight; the session's
//! tickets take care of responses that come back for an inactive slot.

use std::sync::Arc;

use chrono::NaiveDate;
use shared::{BookingQuery, CustomerIdentity, MovieId, MovieQuery, SeatNumber, Showtime};
use tokio::sync::Mutex;

use crate::api::BookingApi;
use crate::config::IdentityMode;
use crate::history::{BookingHistory, HistoryFilter};
use crate::session::{BookingSession, BookingSummary, SeatState};
use crate::{BookingError, BookingResult};

/// What happened to a seat map fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatLoadOutcome {
    /// The seat map of the active slot was replaced
    Applied,
    /// The slot changed while the request was in flight
    Discarded,
    /// Already loaded, nothing fetched
    Cached,
}

pub struct BookingController<A: BookingApi> {
    api: Arc<A>,
    session: Arc<Mutex<BookingSession>>,
    identity_mode: IdentityMode,
}

impl<A: BookingApi> Clone for BookingController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            session: Arc::clone(&self.session),
            identity_mode: self.identity_mode,
        }
    }
}

impl<A: BookingApi> BookingController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            session: Arc::new(Mutex::new(BookingSession::new())),
            identity_mode: IdentityMode::default(),
        }
    }

    pub fn with_identity_mode(mut self, mode: IdentityMode) -> Self {
        self.identity_mode = mode;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Shared handle to the session, for rendering
    pub fn session(&self) -> Arc<Mutex<BookingSession>> {
        Arc::clone(&self.session)
    }

    /// Copy of the current session state
    pub async fn snapshot(&self) -> BookingSession {
        self.session.lock().await.clone()
    }

    // ========== Movies ==========

    /// Fetch the movie list and replace the session's copy
    pub async fn refresh_movies(&self, query: &MovieQuery) -> BookingResult<usize> {
        let movies = self.api.list_movies(query).await.inspect_err(|e| {
            tracing::warn!(error = %e, "failed to load movies");
        })?;
        let count = movies.len();
        self.session.lock().await.replace_movies(movies);
        Ok(count)
    }

    // ========== Slot & seats ==========

    pub async fn set_slot(
        &self,
        movie_id: Option<MovieId>,
        date: Option<NaiveDate>,
        time: Option<Showtime>,
    ) {
        self.session.lock().await.set_slot(movie_id, date, time);
    }

    pub async fn toggle_seat(&self, seat: SeatNumber) -> BookingResult<SeatState> {
        self.session.lock().await.toggle_seat(seat)
    }

    pub async fn summary(&self) -> Option<BookingSummary> {
        self.session.lock().await.summary()
    }

    /// Fetch the booked seats of the active slot
    pub async fn load_seats(&self) -> BookingResult<SeatLoadOutcome> {
        let ticket = self
            .session
            .lock()
            .await
            .begin_seat_load()
            .ok_or(BookingError::IncompleteSlot)?;
        let slot = ticket.key();

        let list = self
            .api
            .list_bookings(&BookingQuery::All)
            .await
            .inspect_err(|e| tracing::warn!(%slot, error = %e, "failed to load booked seats"))?;

        match self
            .session
            .lock()
            .await
            .load_booked_seats(ticket, &list.bookings)
        {
            Ok(()) => Ok(SeatLoadOutcome::Applied),
            Err(BookingError::StaleResponse) => Ok(SeatLoadOutcome::Discarded),
            Err(e) => Err(e),
        }
    }

    /// Fetch the active seat map unless it is already loaded
    pub async fn ensure_seats(&self) -> BookingResult<SeatLoadOutcome> {
        let status = self
            .session
            .lock()
            .await
            .seat_status()
            .ok_or(BookingError::IncompleteSlot)?;
        if status.needs_fetch() {
            self.load_seats().await
        } else {
            Ok(SeatLoadOutcome::Cached)
        }
    }

    /// Let the server pick seats for the active slot
    ///
    /// Returns the seats now selected.
    pub async fn auto_assign(&self) -> BookingResult<Vec<SeatNumber>> {
        let ticket = self.session.lock().await.begin_auto_assign()?;
        let response = self.api.book(ticket.request()).await.inspect_err(|e| {
            tracing::warn!(slot = %ticket.key(), error = %e, "auto-assignment failed");
        })?;

        let seats = response.seats.unwrap_or_default();
        let mut session = self.session.lock().await;
        let selected = session.apply_auto_assign(ticket, seats)?.to_vec();
        Ok(selected)
    }

    // ========== Submission ==========

    /// Book the selected seats; returns the server's confirmation message
    pub async fn submit(&self, identity: Option<&CustomerIdentity>) -> BookingResult<String> {
        if let Some(identity) = identity
            && !self.identity_mode.accepts(identity)
        {
            return Err(BookingError::MissingCustomerInfo(format!(
                "expected {:?} identity",
                self.identity_mode
            )));
        }

        let ticket = self.session.lock().await.begin_submit(identity)?;
        let request = ticket.request().clone();
        let slot = ticket.key();

        let result = self.api.book(&request).await;
        self.session
            .lock()
            .await
            .finish_submit(ticket, result.is_ok());

        match result {
            Ok(response) => {
                tracing::info!(%slot, seats = ?request.seats, total = ?request.total, "booking confirmed");
                Ok(response.message)
            }
            Err(e) => {
                tracing::warn!(%slot, error = %e, "booking failed");
                Err(e.into())
            }
        }
    }

    // ========== History ==========

    pub async fn load_history(
        &self,
        query: &BookingQuery,
        filter: HistoryFilter,
    ) -> BookingResult<BookingHistory> {
        let list = self.api.list_bookings(query).await?;
        Ok(BookingHistory::new(list.bookings, filter).with_analytics(list.analytics))
    }

    /// Cancel a booking; every loaded seat map is marked stale afterwards
    pub async fn cancel_booking(&self, booking_id: i64) -> BookingResult<String> {
        let message = self
            .api
            .cancel_booking(booking_id)
            .await
            .inspect_err(|e| tracing::warn!(booking_id, error = %e, "cancellation failed"))?;
        self.session.lock().await.invalidate_seat_maps();
        tracing::info!(booking_id, "booking cancelled");
        Ok(message)
    }
}
