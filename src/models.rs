//! Data models for the Trip Finder service.
//! Defines the trip records read from the store, the search request accepted
//! from clients, and the output shapes handed to the presentation layer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Geographic location represented by latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lng: f64,
}

/// Lifecycle state of a trip as recorded by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStatus {
    Completed,
    Cancelled,
    InProgress,
    Requested,
}

impl TripStatus {
    /// Canonical display name, used for the `status` field of [`TripDto`].
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
            TripStatus::InProgress => "InProgress",
            TripStatus::Requested => "Requested",
        }
    }
}

/// Product tier the trip was booked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripType {
    Basic,
    Lady,
    HavaXL,
}

impl TripType {
    /// Canonical display name. Keyword search matches against this text.
    pub fn display_name(&self) -> &'static str {
        match self {
            TripType::Basic => "Basic",
            TripType::Lady => "Lady",
            TripType::HavaXL => "HavaXL",
        }
    }
}

/// Driver attached to a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub name: Option<String>,
    /// Average rating, 0.0 to 5.0
    pub rating: f64,
    pub picture_url: Option<String>,
}

/// Car attached to a trip. The plate number is unique within a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub number: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: i32,
    pub picture_url: Option<String>,
    /// Owning driver, when the data source records one
    pub driver_id: Option<i64>,
}

/// A single ride as held by the trip store.
///
/// The store owns these records; the core only ever reads and reshapes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub status: TripStatus,
    pub trip_type: TripType,
    /// When the ride was requested. Authoritative for monthly bucketing.
    #[serde(with = "time::serde::rfc3339")]
    pub request_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub pickup_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub dropoff_date: Option<OffsetDateTime>,
    pub pickup_location: Option<String>,
    pub pickup: Location,
    pub dropoff_location: Option<String>,
    pub dropoff: Location,
    /// Distance travelled in kilometers
    pub distance_km: f64,
    /// Ride duration in minutes
    pub duration_minutes: u32,
    /// Fare charged, in whole currency units
    pub fare: i64,
    pub driver: Option<Driver>,
    pub car: Option<Car>,
}

/// Which trip statuses a search should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StatusFilter {
    All,
    #[default]
    Completed,
    Cancelled,
}

impl StatusFilter {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(StatusFilter::All),
            "completed" => Some(StatusFilter::Completed),
            "cancelled" | "canceled" => Some(StatusFilter::Cancelled),
            _ => None,
        }
    }
}

/// Coarse distance category used as a search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DistanceRange {
    /// Up to 5 km
    Short,
    /// Over 5 km, up to 15 km
    Medium,
    /// Over 15 km, up to 30 km
    Long,
    /// Over 30 km
    VeryLong,
}

impl DistanceRange {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "short" => Some(DistanceRange::Short),
            "medium" => Some(DistanceRange::Medium),
            "long" => Some(DistanceRange::Long),
            "verylong" | "very_long" => Some(DistanceRange::VeryLong),
            _ => None,
        }
    }
}

/// Coarse duration category used as a search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurationRange {
    /// Up to 15 minutes
    Quick,
    /// Over 15, up to 30 minutes
    Medium,
    /// Over 30, up to 60 minutes
    Long,
    /// Over 60 minutes
    VeryLong,
}

impl DurationRange {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quick" => Some(DurationRange::Quick),
            "medium" => Some(DurationRange::Medium),
            "long" => Some(DurationRange::Long),
            "verylong" | "very_long" => Some(DurationRange::VeryLong),
            _ => None,
        }
    }
}

/// Search request accepted from clients.
///
/// Every field has a default so a bare `/search` is a valid request. Values
/// that are out of range or unrecognised are accepted here and normalised by
/// the service, never rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text keyword matched against locations, trip type, driver and car
    #[serde(default)]
    pub q: String,
    /// Status filter; unrecognised text leaves it unset
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<StatusFilter>,
    /// Legacy boolean encoding of the status filter
    #[serde(default, deserialize_with = "lenient_include_cancelled")]
    pub include_cancelled: Option<bool>,
    #[serde(default, deserialize_with = "lenient_distance")]
    pub distance: Option<DistanceRange>,
    #[serde(default, deserialize_with = "lenient_duration")]
    pub duration: Option<DurationRange>,
    /// 1-based page number; unreadable text falls back to the default
    #[serde(default = "default_page", deserialize_with = "lenient_page")]
    pub page: i64,
    #[serde(default = "default_page_size", deserialize_with = "lenient_page_size")]
    pub page_size: i64,
    /// One of distance, duration, fare, requestdate (case-insensitive)
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_descending", deserialize_with = "lenient_sort_descending")]
    pub sort_descending: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            q: String::new(),
            status: None,
            include_cancelled: None,
            distance: None,
            duration: None,
            page: default_page(),
            page_size: default_page_size(),
            sort_by: default_sort_by(),
            sort_descending: default_sort_descending(),
        }
    }
}

impl SearchRequest {
    /// Resolves the effective status filter.
    ///
    /// An explicit `status` wins. Otherwise the legacy `includeCancelled`
    /// flag maps `true` to [`StatusFilter::All`] and `false` to completed
    /// only. With neither present only completed trips are returned.
    pub fn status_filter(&self) -> StatusFilter {
        match (self.status, self.include_cancelled) {
            (Some(status), _) => status,
            (None, Some(true)) => StatusFilter::All,
            (None, _) => StatusFilter::Completed,
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

fn default_sort_by() -> String {
    "requestdate".to_string()
}

fn default_sort_descending() -> bool {
    true
}

fn lenient<'de, D, T>(deserializer: D, parse: fn(&str) -> Option<T>) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|value| {
        let parsed = parse(value);
        if parsed.is_none() {
            log::debug!("Ignoring unrecognised filter value {:?}", value);
        }
        parsed
    }))
}

fn lenient_status<'de, D: Deserializer<'de>>(d: D) -> Result<Option<StatusFilter>, D::Error> {
    lenient(d, StatusFilter::parse)
}

fn lenient_distance<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DistanceRange>, D::Error> {
    lenient(d, DistanceRange::parse)
}

fn lenient_duration<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DurationRange>, D::Error> {
    lenient(d, DurationRange::parse)
}

// Query strings carry every value as text, JSON bodies as typed values
fn read_i64(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn read_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn lenient_or<'de, D, T>(deserializer: D, read: fn(&Value) -> Option<T>, default: T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(read(&raw).unwrap_or_else(|| {
        log::debug!("Ignoring unreadable paging value {}", raw);
        default
    }))
}

fn lenient_page<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    lenient_or(d, read_i64, default_page())
}

fn lenient_page_size<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    lenient_or(d, read_i64, default_page_size())
}

fn lenient_sort_descending<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    lenient_or(d, read_bool, default_sort_descending())
}

fn lenient_include_cancelled<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    let raw = Value::deserialize(d)?;
    Ok(read_bool(&raw))
}

/// Trip as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDto {
    pub id: i64,
    pub pickup: String,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub dropoff: String,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
    /// Display name of the trip type
    #[serde(rename = "type")]
    pub trip_type: String,
    pub driver_name: String,
    pub driver_rating: f64,
    pub driver_picture: String,
    pub car_make: String,
    pub car_model: String,
    pub car_number: String,
    pub car_picture_url: String,
    pub year: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub request_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub pickup_time: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub dropoff_time: Option<OffsetDateTime>,
    /// Display name of the trip status
    pub status: String,
    pub distance: f64,
    pub duration: u32,
    pub fare: i64,
}

impl From<&Trip> for TripDto {
    fn from(trip: &Trip) -> Self {
        let driver = trip.driver.as_ref();
        let car = trip.car.as_ref();
        Self {
            id: trip.id,
            pickup: trip.pickup_location.clone().unwrap_or_default(),
            pickup_lat: trip.pickup.lat,
            pickup_lng: trip.pickup.lng,
            dropoff: trip.dropoff_location.clone().unwrap_or_default(),
            dropoff_lat: trip.dropoff.lat,
            dropoff_lng: trip.dropoff.lng,
            trip_type: trip.trip_type.display_name().to_string(),
            driver_name: driver.and_then(|d| d.name.clone()).unwrap_or_default(),
            driver_rating: driver.map(|d| d.rating).unwrap_or_default(),
            driver_picture: driver.and_then(|d| d.picture_url.clone()).unwrap_or_default(),
            car_make: car.and_then(|c| c.make.clone()).unwrap_or_default(),
            car_model: car.and_then(|c| c.model.clone()).unwrap_or_default(),
            car_number: car.and_then(|c| c.number.clone()).unwrap_or_default(),
            car_picture_url: car.and_then(|c| c.picture_url.clone()).unwrap_or_default(),
            year: car.map(|c| c.year).unwrap_or_default(),
            request_date: trip.request_date,
            pickup_time: trip.pickup_date,
            dropoff_time: trip.dropoff_date,
            status: trip.status.as_str().to_string(),
            distance: trip.distance_km,
            duration: trip.duration_minutes,
            fare: trip.fare,
        }
    }
}

/// Generic paged-response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub page: usize,
    pub page_size: usize,
    /// Items matching the filters, before pagination
    pub total_count: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub items: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Converts the items while keeping the paging metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PaginatedResponse<U> {
        PaginatedResponse {
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Trip count for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTripCount {
    /// Midnight UTC on the first day of the month
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub value: usize,
}

/// Number of trips starting at a pickup location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationCount {
    pub destination: String,
    pub count: usize,
}

/// Health status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub trip_count: usize,
}
