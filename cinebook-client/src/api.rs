//! REST contract of the booking backend

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::{
    AppError, BookRequest, BookResponse, Booking, BookingAnalytics, BookingQuery,
    BookingsResponse, MessageResponse, Movie, MovieCreate, MovieQuery,
};

use crate::{ClientError, ClientResult, HttpClient};

// ============================================================================
// Booking API Trait
// ============================================================================

/// Bookings as listed by `GET /api/bookings`
#[derive(Debug, Clone, Default)]
pub struct BookingList {
    pub bookings: Vec<Booking>,
    pub analytics: Option<BookingAnalytics>,
}

/// Operations the booking backend exposes
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// `GET /api/movies`
    async fn list_movies(&self, query: &MovieQuery) -> ClientResult<Vec<Movie>>;

    /// `GET /api/bookings`
    async fn list_bookings(&self, query: &BookingQuery) -> ClientResult<BookingList>;

    /// `POST /api/book`
    async fn book(&self, request: &BookRequest) -> ClientResult<BookResponse>;

    /// `DELETE /api/cancel_booking/{id}`, returns the server message
    async fn cancel_booking(&self, booking_id: i64) -> ClientResult<String>;

    /// `POST /api/admin/add_movie`, returns the server message
    async fn add_movie(&self, movie: &MovieCreate) -> ClientResult<String>;
}

// ============================================================================
// HTTP implementation
// ============================================================================

#[async_trait]
impl BookingApi for HttpClient {
    async fn list_movies(&self, query: &MovieQuery) -> ClientResult<Vec<Movie>> {
        let movies: Vec<Movie> = self.get("/api/movies", &query.to_pairs()).await?;
        for movie in &movies {
            movie.validate().map_err(|e| {
                ClientError::InvalidResponse(format!("movie {}: {}", movie.id, e.message))
            })?;
        }
        tracing::debug!(count = movies.len(), "movies fetched");
        Ok(movies)
    }

    async fn list_bookings(&self, query: &BookingQuery) -> ClientResult<BookingList> {
        let body: BookingsResponse = self.get("/api/bookings", &query.to_pairs()).await?;
        let (bookings, analytics) = body.into_parts();
        tracing::debug!(count = bookings.len(), "bookings fetched");
        Ok(BookingList {
            bookings,
            analytics,
        })
    }

    async fn book(&self, request: &BookRequest) -> ClientResult<BookResponse> {
        if let Some(identity) = &request.identity {
            identity.validate()?;
        }
        tracing::debug!(
            slot = %request.slot(),
            seats = request.seats.len(),
            auto_assign = request.is_auto_assign(),
            "submitting booking request"
        );
        let response: BookResponse = self.post("/api/book", request).await?;
        if request.is_auto_assign() && response.seats.is_none() {
            return Err(ClientError::InvalidResponse(
                "auto-assignment response carries no seats".into(),
            ));
        }
        Ok(response)
    }

    async fn cancel_booking(&self, booking_id: i64) -> ClientResult<String> {
        let body: MessageResponse = self
            .delete(&format!("/api/cancel_booking/{booking_id}"))
            .await?;
        body.into_result("Booking cancelled successfully!")
            .map_err(|message| ClientError::Server {
                status: StatusCode::OK,
                message,
            })
    }

    async fn add_movie(&self, movie: &MovieCreate) -> ClientResult<String> {
        movie.validate().map_err(|e: AppError| {
            tracing::debug!(error = %e, "movie rejected before sending");
            ClientError::Validation(e)
        })?;
        let body: MessageResponse = self.post("/api/admin/add_movie", movie).await?;
        body.into_result("Movie added")
            .map_err(|message| ClientError::Server {
                status: StatusCode::OK,
                message,
            })
    }
}
