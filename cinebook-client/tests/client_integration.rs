// cinebook-client/tests/client_integration.rs
// HTTP client against a mock backend

use chrono::NaiveDate;
use cinebook_client::{BookingApi, ClientConfig, ClientError, HttpClient};
use reqwest::StatusCode;
use serde_json::json;
use shared::{
    BookRequest, BookingQuery, BookingStatus, CustomerIdentity, MovieCreate, MovieQuery,
    MovieSort, Showtime, ShowtimeSlot,
};
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpClient {
    ClientConfig::new(server.uri())
        .with_timeout(5)
        .build_http_client()
        .unwrap()
}

fn slot() -> ShowtimeSlot {
    ShowtimeSlot::new(3, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), Showtime::OnePm)
}

#[tokio::test]
async fn test_list_movies_sends_sort_and_genre() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .and(query_param("sort_by", "price"))
        .and(query_param("genre", "Drama"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Whiplash", "genre": "Drama", "duration": "106 min", "price": 180}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let query = MovieQuery::sorted_by(MovieSort::Price).with_genre(" Drama ");
    let movies = client(&server).list_movies(&query).await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Whiplash");
    assert_eq!(movies[0].price, 180);
}

#[tokio::test]
async fn test_list_movies_rejects_invalid_movie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Free", "genre": "Drama", "duration": "90 min", "price": 0}
        ])))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_movies(&MovieQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_list_bookings_wrapped_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(query_param("userId", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookings": [{
                "id": 9, "movie_id": 3, "movie_title": "Interstellar",
                "date": "2025-06-01", "time": "13:00", "seats": [5, 6],
                "total": 400, "status": "Cancelled",
                "created_at": "2025-05-20 18:04:11"
            }],
            "analytics": {
                "total_bookings_per_movie": {"Interstellar": 1},
                "total_revenue_per_movie": {"Interstellar": 400}
            }
        })))
        .mount(&server)
        .await;

    let list = client(&server)
        .list_bookings(&BookingQuery::User("42".into()))
        .await
        .unwrap();
    assert_eq!(list.bookings.len(), 1);
    assert_eq!(list.bookings[0].status, BookingStatus::Cancelled);
    assert!(list.bookings[0].created_at.is_some());
    let analytics = list.analytics.unwrap();
    assert_eq!(analytics.total_revenue_per_movie["Interstellar"], 400);
}

#[tokio::test]
async fn test_list_bookings_bare_shape_with_string_seats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(query_param("search", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 4, "movie_id": 3, "date": "2025-06-01", "time": "01:00 PM",
            "seats": ["7", "8"], "name": "Ana", "email": "ana@example.com",
            "phone": "555-0101", "status": "Confirmed"
        }])))
        .mount(&server)
        .await;

    let list = client(&server)
        .list_bookings(&BookingQuery::All)
        .await
        .unwrap();
    let booking = &list.bookings[0];
    assert_eq!(booking.seats, vec![7, 8]);
    assert!(!booking.is_cancelled());
    assert!(booking.is_for_slot(&slot()));
    assert!(list.analytics.is_none());
}

#[tokio::test]
async fn test_non_numeric_seat_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 4, "movie_id": 3, "date": "2025-06-01", "time": "13:00",
            "seats": ["A1"]
        }])))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_bookings(&BookingQuery::All)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Serialization(_)));
}

#[tokio::test]
async fn test_book_posts_request_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/book"))
        .and(body_json(json!({
            "movie_id": 3,
            "movie_title": "Interstellar",
            "date": "2025-06-01",
            "time": "13:00",
            "seats": [10, 11],
            "total": 400,
            "user_id": "42"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"message": "Booking successful!"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = BookRequest::for_seats(
        &slot(),
        "Interstellar",
        vec![10, 11],
        400,
        CustomerIdentity::user("42"),
    );
    let response = client(&server).book(&request).await.unwrap();
    assert_eq!(response.message, "Booking successful!");
    assert!(response.seats.is_none());
}

#[tokio::test]
async fn test_book_with_contact_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/book"))
        .and(body_partial_json(json!({
            "name": "Ana", "email": "ana@example.com", "phone": "555-0101"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let identity = CustomerIdentity::contact("Ana", "ana@example.com", "555-0101");
    let request = BookRequest::for_seats(&slot(), "Interstellar", vec![1], 200, identity);
    client(&server).book(&request).await.unwrap();
}

#[tokio::test]
async fn test_book_rejects_blank_identity_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = BookRequest::for_seats(&slot(), "Interstellar", vec![1], 200, CustomerIdentity::user(" "));
    let err = client(&server).book(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_auto_assign_returns_seats() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/book"))
        .and(body_partial_json(json!({"seats": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Seats assigned", "seats": ["3", 4]
        })))
        .mount(&server)
        .await;

    let response = client(&server)
        .book(&BookRequest::auto_assign(&slot()))
        .await
        .unwrap();
    assert_eq!(response.seats, Some(vec![3, 4]));
}

#[tokio::test]
async fn test_auto_assign_without_seats_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .book(&BookRequest::auto_assign(&slot()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/book"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"error": "Seats already booked"})),
        )
        .mount(&server)
        .await;

    let request = BookRequest::for_seats(&slot(), "Interstellar", vec![5], 200, CustomerIdentity::user("42"));
    match client(&server).book(&request).await.unwrap_err() {
        ClientError::Server { status, message } => {
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(message, "Seats already booked");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_cancel_booking() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/cancel_booking/9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Booking cancelled"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let message = client(&server).cancel_booking(9).await.unwrap();
    assert_eq!(message, "Booking cancelled");
}

#[tokio::test]
async fn test_add_movie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/add_movie"))
        .and(body_json(json!({
            "title": "Dune", "genre": "Unknown", "duration": "155 min", "price": 300
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Movie added"})))
        .expect(1)
        .mount(&server)
        .await;

    let message = client(&server)
        .add_movie(&MovieCreate::new("Dune", "155 min", 300))
        .await
        .unwrap();
    assert_eq!(message, "Movie added");
}

#[tokio::test]
async fn test_add_movie_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/add_movie"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Title exists"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .add_movie(&MovieCreate::new("Dune", "155 min", 300))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Server { ref message, .. } if message == "Title exists"));

    let invalid = client(&server)
        .add_movie(&MovieCreate::new(" ", "155 min", 300))
        .await
        .unwrap_err();
    assert!(matches!(invalid, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let config = ClientConfig::new("http://127.0.0.1:9").with_timeout(2);
    let err = config
        .build_http_client()
        .unwrap()
        .list_movies(&MovieQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
