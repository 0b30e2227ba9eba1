//! Booking session state
//!
//! One `BookingSession` per open booking page. It tracks the showtime being
//! booked, the seats already taken for it and the seats the user is picking,
//! and derives the booking summary from them.
//!
//! Network round trips are split into a `begin_*` call that hands out a
//! ticket tagged with the active slot and an apply/finish call that consumes
//! it. A ticket whose slot is no longer active is rejected with
//! [`BookingError::StaleResponse`], so a slow response can never overwrite
//! the state of a slot selected after it was issued. Seat load tickets also
//! carry the seat map's generation, which a successful booking or a
//! cancellation bumps: a snapshot taken before either is rejected the same
//! way.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use shared::validation::validate_seat;
use shared::{
    BookRequest, Booking, CustomerIdentity, Movie, MovieId, SeatNumber, Showtime, ShowtimeSlot,
    SlotKey, TOTAL_SEATS,
};

use crate::{BookingError, BookingResult};

// ============================================================================
// Slot selection
// ============================================================================

/// Movie, date and showtime as currently chosen in the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotSelection {
    pub movie_id: Option<MovieId>,
    pub date: Option<NaiveDate>,
    pub time: Option<Showtime>,
}

impl SlotSelection {
    pub fn new(movie_id: Option<MovieId>, date: Option<NaiveDate>, time: Option<Showtime>) -> Self {
        Self {
            movie_id,
            date,
            time,
        }
    }

    /// The slot, once all three parts are chosen
    pub fn complete(&self) -> Option<ShowtimeSlot> {
        Some(ShowtimeSlot::new(self.movie_id?, self.date?, self.time?))
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }
}

// ============================================================================
// Seat maps
// ============================================================================

/// Load status of a slot's booked seats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeatMapStatus {
    /// Never fetched, or the slot was (re)selected and needs a fresh fetch
    #[default]
    NotLoaded,
    Loaded,
    /// Loaded, but a booking or cancellation has since changed it
    Stale,
}

impl SeatMapStatus {
    pub fn needs_fetch(&self) -> bool {
        !matches!(self, Self::Loaded)
    }
}

#[derive(Debug, Clone, Default)]
struct SeatMap {
    status: SeatMapStatus,
    /// Bumped whenever bookings change server-side
    generation: u64,
    booked: BTreeSet<SeatNumber>,
}

/// How a seat should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    Available,
    Selected,
    Booked,
}

// ============================================================================
// Tickets
// ============================================================================

/// Token for an in-flight seat map fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatLoadTicket {
    key: SlotKey,
    generation: u64,
}

impl SeatLoadTicket {
    pub fn key(&self) -> SlotKey {
        self.key
    }
}

/// Token for an in-flight auto-assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoAssignTicket {
    key: SlotKey,
    request: BookRequest,
}

impl AutoAssignTicket {
    pub fn key(&self) -> SlotKey {
        self.key
    }

    pub fn request(&self) -> &BookRequest {
        &self.request
    }
}

/// Token for an in-flight booking submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    key: SlotKey,
    request: BookRequest,
}

impl SubmitTicket {
    pub fn key(&self) -> SlotKey {
        self.key
    }

    pub fn request(&self) -> &BookRequest {
        &self.request
    }
}

// ============================================================================
// Summary
// ============================================================================

/// What the user is about to book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub movie_title: String,
    /// `"2025-06-01 at 13:00"`
    pub date_time_label: String,
    /// Ascending
    pub seats: Vec<SeatNumber>,
    pub seat_count: usize,
    pub total_price: u64,
}

// ============================================================================
// Session
// ============================================================================

/// Client-side booking state for one page
#[derive(Debug, Clone, Default)]
pub struct BookingSession {
    movies: Vec<Movie>,
    slot: SlotSelection,
    seat_maps: HashMap<SlotKey, SeatMap>,
    /// Insertion order, disjoint from the active slot's booked seats
    selection: Vec<SeatNumber>,
    submitting: bool,
}

impl BookingSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Movies ==========

    /// Replace the movie list wholesale
    pub fn replace_movies(&mut self, movies: Vec<Movie>) {
        tracing::debug!(count = movies.len(), "movie list replaced");
        self.movies = movies;
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    // ========== Slot ==========

    pub fn slot(&self) -> SlotSelection {
        self.slot
    }

    pub fn active_slot(&self) -> Option<ShowtimeSlot> {
        self.slot.complete()
    }

    /// Change the showing being booked
    ///
    /// Always empties the selection and marks the slot's seat map
    /// `NotLoaded`; the last known booked seats stay in place until the
    /// refetch lands. The date is not checked against today;
    /// callers keep it in range (see [`ShowtimeSlot::is_bookable_on`]).
    pub fn set_slot(
        &mut self,
        movie_id: Option<MovieId>,
        date: Option<NaiveDate>,
        time: Option<Showtime>,
    ) {
        self.slot = SlotSelection::new(movie_id, date, time);
        if !self.selection.is_empty() {
            tracing::debug!(dropped = self.selection.len(), "selection cleared by slot change");
            self.selection.clear();
        }
        if let Some(key) = self.slot.complete() {
            self.seat_maps.entry(key).or_default().status = SeatMapStatus::NotLoaded;
            tracing::debug!(slot = %key, "slot selected");
        }
    }

    pub fn select_movie(&mut self, movie_id: MovieId) {
        self.set_slot(Some(movie_id), self.slot.date, self.slot.time);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.set_slot(self.slot.movie_id, Some(date), self.slot.time);
    }

    pub fn select_time(&mut self, time: Showtime) {
        self.set_slot(self.slot.movie_id, self.slot.date, Some(time));
    }

    // ========== Seat maps ==========

    /// Load status of the active slot's seat map
    pub fn seat_status(&self) -> Option<SeatMapStatus> {
        let key = self.slot.complete()?;
        Some(
            self.seat_maps
                .get(&key)
                .map(|m| m.status)
                .unwrap_or_default(),
        )
    }

    /// Status of any slot's seat map
    pub fn seat_status_of(&self, key: &SlotKey) -> SeatMapStatus {
        self.seat_maps
            .get(key)
            .map(|m| m.status)
            .unwrap_or_default()
    }

    /// Booked seats of the active slot, ascending
    pub fn booked_seats(&self) -> Vec<SeatNumber> {
        self.slot
            .complete()
            .and_then(|key| self.seat_maps.get(&key))
            .map(|m| m.booked.iter().copied().collect())
            .unwrap_or_default()
    }

    fn is_booked(&self, key: &SlotKey, seat: SeatNumber) -> bool {
        self.seat_maps
            .get(key)
            .is_some_and(|m| m.booked.contains(&seat))
    }

    /// Start fetching the active slot's booked seats
    pub fn begin_seat_load(&self) -> Option<SeatLoadTicket> {
        let key = self.slot.complete()?;
        let generation = self.seat_maps.get(&key).map_or(0, |m| m.generation);
        Some(SeatLoadTicket { key, generation })
    }

    fn generation_of(&self, key: &SlotKey) -> u64 {
        self.seat_maps.get(key).map_or(0, |m| m.generation)
    }

    /// Apply a fetched booking list to the slot the ticket was issued for
    ///
    /// Replaces the slot's booked set with the seats of every non-cancelled
    /// booking for that slot, and drops any selected seat that turns out to
    /// be booked. A snapshot older than the last booking or cancellation is
    /// rejected and the map keeps its status.
    pub fn load_booked_seats(
        &mut self,
        ticket: SeatLoadTicket,
        bookings: &[Booking],
    ) -> BookingResult<()> {
        let key = ticket.key;
        if self.slot.complete() != Some(key) {
            tracing::debug!(slot = %key, "discarding seat map for inactive slot");
            return Err(BookingError::StaleResponse);
        }
        if self.generation_of(&key) != ticket.generation {
            tracing::debug!(slot = %key, "discarding seat map older than last booking change");
            return Err(BookingError::StaleResponse);
        }

        let mut booked = BTreeSet::new();
        for booking in bookings
            .iter()
            .filter(|b| !b.is_cancelled() && b.is_for_slot(&key))
        {
            for &seat in &booking.seats {
                if validate_seat(seat).is_ok() {
                    booked.insert(seat);
                } else {
                    tracing::warn!(booking_id = booking.id, seat, "ignoring seat outside the grid");
                }
            }
        }

        let before = self.selection.len();
        self.selection.retain(|s| !booked.contains(s));
        if self.selection.len() != before {
            tracing::warn!(
                slot = %key,
                dropped = before - self.selection.len(),
                "selected seats were booked meanwhile"
            );
        }

        tracing::debug!(slot = %key, booked = booked.len(), "seat map loaded");
        let map = self.seat_maps.entry(key).or_default();
        map.status = SeatMapStatus::Loaded;
        map.booked = booked;
        Ok(())
    }

    /// Mark every loaded seat map as needing a refetch
    ///
    /// Seat loads already in flight are rejected when they resolve.
    pub fn invalidate_seat_maps(&mut self) {
        for map in self.seat_maps.values_mut() {
            map.generation += 1;
            if map.status == SeatMapStatus::Loaded {
                map.status = SeatMapStatus::Stale;
            }
        }
    }

    // ========== Selection ==========

    /// Selected seats in the order they were picked
    pub fn selection(&self) -> &[SeatNumber] {
        &self.selection
    }

    pub fn is_selected(&self, seat: SeatNumber) -> bool {
        self.selection.contains(&seat)
    }

    pub fn seat_state(&self, seat: SeatNumber) -> SeatState {
        match self.slot.complete() {
            Some(key) if self.is_booked(&key, seat) => SeatState::Booked,
            _ if self.is_selected(seat) => SeatState::Selected,
            _ => SeatState::Available,
        }
    }

    /// Every seat of the grid with its state, for rendering
    pub fn seat_grid(&self) -> Vec<(SeatNumber, SeatState)> {
        (1..=TOTAL_SEATS).map(|s| (s, self.seat_state(s))).collect()
    }

    /// Select an available seat, or unselect a selected one
    pub fn toggle_seat(&mut self, seat: SeatNumber) -> BookingResult<SeatState> {
        let key = self.slot.complete().ok_or(BookingError::IncompleteSlot)?;
        if validate_seat(seat).is_err() || self.is_booked(&key, seat) {
            return Err(BookingError::InvalidSeat(seat));
        }

        if let Some(pos) = self.selection.iter().position(|&s| s == seat) {
            self.selection.remove(pos);
            Ok(SeatState::Available)
        } else {
            self.selection.push(seat);
            Ok(SeatState::Selected)
        }
    }

    /// Start a server-side seat assignment for the active slot
    ///
    /// Refused while a submission is in flight, since the answer would
    /// replace the seats being booked.
    pub fn begin_auto_assign(&self) -> BookingResult<AutoAssignTicket> {
        if self.submitting {
            return Err(BookingError::SubmitInProgress);
        }
        let key = self.slot.complete().ok_or(BookingError::IncompleteSlot)?;
        Ok(AutoAssignTicket {
            key,
            request: BookRequest::auto_assign(&key),
        })
    }

    /// Replace the selection with the seats the server picked
    ///
    /// Seats off the grid or already booked are dropped; the booked set is
    /// left untouched.
    pub fn apply_auto_assign(
        &mut self,
        ticket: AutoAssignTicket,
        seats: Vec<SeatNumber>,
    ) -> BookingResult<&[SeatNumber]> {
        let key = ticket.key;
        if self.slot.complete() != Some(key) {
            tracing::debug!(slot = %key, "discarding auto-assignment for inactive slot");
            return Err(BookingError::StaleResponse);
        }

        let mut assigned: Vec<SeatNumber> = Vec::with_capacity(seats.len());
        for seat in seats {
            if let Err(e) = validate_seat(seat) {
                tracing::warn!(slot = %key, error = %e, "ignoring auto-assigned seat off the grid");
            } else if self.is_booked(&key, seat) {
                tracing::warn!(slot = %key, seat, "ignoring booked auto-assigned seat");
            } else if !assigned.contains(&seat) {
                assigned.push(seat);
            }
        }

        tracing::debug!(slot = %key, seats = ?assigned, "auto-assigned seats applied");
        self.selection = assigned;
        Ok(&self.selection)
    }

    // ========== Summary ==========

    /// Derived summary; `None` while nothing is selected or the slot or its
    /// movie is unresolved
    pub fn summary(&self) -> Option<BookingSummary> {
        if self.selection.is_empty() {
            return None;
        }
        let slot = self.slot.complete()?;
        let movie = self.movie(slot.movie_id)?;

        let mut seats = self.selection.clone();
        seats.sort_unstable();
        let seat_count = seats.len();

        Some(BookingSummary {
            movie_title: movie.title.clone(),
            date_time_label: slot.date_time_label(),
            seats,
            seat_count,
            total_price: movie.total_for(seat_count),
        })
    }

    // ========== Submission ==========

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate the booking and mark a submission as in flight
    ///
    /// The session is left untouched on error.
    pub fn begin_submit(
        &mut self,
        identity: Option<&CustomerIdentity>,
    ) -> BookingResult<SubmitTicket> {
        if self.submitting {
            return Err(BookingError::SubmitInProgress);
        }
        let key = self.slot.complete().ok_or(BookingError::IncompleteSlot)?;
        if self.selection.is_empty() {
            return Err(BookingError::NoSeatsSelected);
        }
        let identity = identity
            .ok_or_else(|| BookingError::MissingCustomerInfo("no customer identity".into()))?;
        identity
            .validate()
            .map_err(|e| BookingError::MissingCustomerInfo(e.message))?;
        let movie = self.movie(key.movie_id).ok_or(BookingError::IncompleteSlot)?;

        let mut seats = self.selection.clone();
        seats.sort_unstable();
        let total = movie.total_for(seats.len());
        let request = BookRequest::for_seats(&key, movie.title.clone(), seats, total, identity.clone());

        self.submitting = true;
        tracing::debug!(slot = %key, total, "submission started");
        Ok(SubmitTicket { key, request })
    }

    /// Close a submission started with [`begin_submit`](Self::begin_submit)
    ///
    /// On success the selection is cleared (if its slot is still active) and
    /// the slot's seat map is marked stale so the new booking shows up.
    pub fn finish_submit(&mut self, ticket: SubmitTicket, succeeded: bool) {
        self.submitting = false;
        if !succeeded {
            return;
        }
        if self.slot.complete() == Some(ticket.key) {
            self.selection.clear();
        }
        let map = self.seat_maps.entry(ticket.key).or_default();
        map.generation += 1;
        map.status = SeatMapStatus::Stale;
    }
}
