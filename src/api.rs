//! API endpoints for the Trip Finder service.
//! Exposes the trip listings, destination ranking, monthly series, search and
//! single-trip lookup as read-only JSON endpoints under `/api/trips`.
//!
//! Every handler owns a cancellation token that fires when the handler future
//! is dropped, so a client disconnect abandons the store read in progress.

use actix_web::{get, web, HttpResponse, Responder, ResponseError};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use crate::error::TripFinderError;
use crate::models::SearchRequest;
use crate::service::TripService;

/// Query string of the latest-trips listing.
#[derive(Debug, Default, Deserialize)]
pub struct LatestQuery {
    /// Number of trips to return; zero or less uses the configured default
    #[serde(default)]
    pub count: i64,
}

/// Query string of the destination ranking.
#[derive(Debug, Default, Deserialize)]
pub struct TopDestinationsQuery {
    #[serde(default)]
    pub top: i64,
}

/// Registers every trip endpoint. `/{id}` goes last so the fixed paths win.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/trips")
            .service(latest)
            .service(top_destinations)
            .service(over_time)
            .service(search)
            .service(trip_by_id),
    )
    .service(health);
}

/// Most recently requested trips, newest first.
///
/// # Returns
/// - 200 OK with an array of trips
/// - 500 Internal Server Error if the store fails
#[get("/latest")]
pub async fn latest(
    query: web::Query<LatestQuery>,
    service: web::Data<TripService>,
) -> impl Responder {
    match service.latest_trips(query.count).await {
        Ok(trips) => HttpResponse::Ok().json(trips),
        Err(e) => e.error_response(),
    }
}

/// Pickup locations ranked by trip count.
#[get("/top-destinations")]
pub async fn top_destinations(
    query: web::Query<TopDestinationsQuery>,
    service: web::Data<TripService>,
) -> impl Responder {
    match service.top_destinations(query.top).await {
        Ok(destinations) => HttpResponse::Ok().json(destinations),
        Err(e) => e.error_response(),
    }
}

/// Monthly trip counts with empty months filled in.
#[get("/over-time")]
pub async fn over_time(service: web::Data<TripService>) -> impl Responder {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match service.trips_over_time(&cancel).await {
        Ok(series) => HttpResponse::Ok().json(series),
        Err(e) => e.error_response(),
    }
}

/// Search endpoint.
///
/// Accepts the search request as query parameters:
/// - q: keyword matched against locations, trip type, driver and car
/// - status: All, Completed or Cancelled (legacy: includeCancelled=true|false)
/// - distance: Short, Medium, Long or VeryLong
/// - duration: Quick, Medium, Long or VeryLong
/// - page, pageSize: 1-based paging, invalid values fall back to defaults
/// - sortBy, sortDescending: distance, duration, fare or requestdate
///
/// Unreadable paging or sort values fall back to their defaults instead of
/// failing the request.
///
/// # Returns
/// - 200 OK with a paginated response
/// - 400 Bad Request if no request could be extracted
/// - 500 Internal Server Error with a generic message if the search failed
#[get("/search")]
pub async fn search(
    request: Option<web::Query<SearchRequest>>,
    service: web::Data<TripService>,
) -> impl Responder {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match service
        .search_trips(request.map(web::Query::into_inner), &cancel)
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}

/// Single trip lookup.
///
/// # Returns
/// - 200 OK with the trip
/// - 404 Not Found if no trip carries this id
#[get("/{id}")]
pub async fn trip_by_id(
    path: web::Path<i64>,
    service: web::Data<TripService>,
) -> impl Responder {
    let id = path.into_inner();
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match service.trip_by_id(id, &cancel).await {
        Ok(Some(trip)) => HttpResponse::Ok().json(trip),
        Ok(None) => TripFinderError::NotFound(format!("Trip with ID {} not found", id)).error_response(),
        Err(e) => e.error_response(),
    }
}

/// Health check endpoint.
///
/// Returns service status, version and the number of trips in the store.
#[get("/health")]
pub async fn health(service: web::Data<TripService>) -> impl Responder {
    HttpResponse::Ok().json(service.get_health_status())
}
