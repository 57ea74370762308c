//! Loads trip records from the flat JSON export used to populate a store.
//!
//! Each row of the export repeats its driver and car columns. Rows are turned
//! into [`Trip`]s with the driver and car embedded. Drivers are identified by
//! id and cars by plate number; both keep the attributes of the first row
//! that names them.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use serde::Deserialize;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use crate::models::{Car, Driver, Location, Trip, TripStatus, TripType};
use crate::store::types::StoreError;

#[derive(Debug, Deserialize)]
struct SeedDocument {
    #[serde(default)]
    trips: Vec<SeedRow>,
}

#[derive(Debug, Deserialize)]
struct SeedRow {
    id: i64,
    status: String,
    #[serde(rename = "type")]
    trip_type: String,
    request_date: String,
    pickup_date: String,
    #[serde(default)]
    dropoff_date: Option<String>,
    pickup_lat: f64,
    pickup_lng: f64,
    pickup_location: Option<String>,
    dropoff_lat: f64,
    dropoff_lng: f64,
    dropoff_location: Option<String>,
    duration: u32,
    distance: f64,
    cost: i64,
    driver_id: i64,
    driver_name: Option<String>,
    driver_rating: f64,
    #[serde(default)]
    driver_pic: Option<String>,
    car_make: Option<String>,
    car_model: Option<String>,
    car_number: Option<String>,
    car_year: i32,
    #[serde(default)]
    car_pic: Option<String>,
}

/// Reads and parses a seed file.
pub fn load_trips_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Trip>, StoreError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        StoreError::Corrupt(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;
    let trips = parse_trips(&raw)?;
    log::info!("Loaded {} trips from {}", trips.len(), path.display());
    Ok(trips)
}

/// Parses a seed document of the form `{ "trips": [ ... ] }`.
///
/// Rows repeating the request date, pickup and dropoff of an earlier row are
/// skipped.
pub fn parse_trips(raw: &str) -> Result<Vec<Trip>, StoreError> {
    let document: SeedDocument = serde_json::from_str(raw)
        .map_err(|e| StoreError::Corrupt(format!("Failed to parse seed JSON: {}", e)))?;

    let mut drivers: HashMap<i64, Driver> = HashMap::new();
    let mut cars: HashMap<String, Car> = HashMap::new();
    let mut seen: HashSet<(OffsetDateTime, Option<String>, Option<String>)> = HashSet::new();
    let mut trips = Vec::with_capacity(document.trips.len());

    for row in document.trips {
        let request_date = parse_utc(&row.request_date)?;
        let key = (request_date, row.pickup_location.clone(), row.dropoff_location.clone());
        if !seen.insert(key) {
            log::debug!("Skipping duplicate seed row {}", row.id);
            continue;
        }

        let driver = drivers
            .entry(row.driver_id)
            .or_insert_with(|| Driver {
                id: row.driver_id,
                name: row.driver_name.clone(),
                rating: row.driver_rating,
                picture_url: row.driver_pic.clone(),
            })
            .clone();

        let car = row.car_number.as_ref().map(|number| {
            let next_id = cars.len() as i64 + 1;
            cars.entry(number.to_lowercase())
                .or_insert_with(|| Car {
                    id: next_id,
                    number: Some(number.clone()),
                    make: row.car_make.clone(),
                    model: row.car_model.clone(),
                    year: row.car_year,
                    picture_url: row.car_pic.clone(),
                    driver_id: Some(row.driver_id),
                })
                .clone()
        });

        let dropoff_date = match row.dropoff_date.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_utc(value)?),
            _ => None,
        };

        trips.push(Trip {
            id: row.id,
            status: parse_status(&row.status),
            trip_type: parse_type(&row.trip_type),
            request_date,
            pickup_date: parse_utc(&row.pickup_date)?,
            dropoff_date,
            pickup_location: row.pickup_location,
            pickup: Location { lat: row.pickup_lat, lng: row.pickup_lng },
            dropoff_location: row.dropoff_location,
            dropoff: Location { lat: row.dropoff_lat, lng: row.dropoff_lng },
            distance_km: (row.distance * 100.0).round() / 100.0,
            duration_minutes: row.duration,
            fare: row.cost,
            driver: Some(driver),
            car,
        });
    }

    Ok(trips)
}

// Every status other than the recognised ones is treated as cancelled
fn parse_status(value: &str) -> TripStatus {
    match value.trim().to_ascii_uppercase().as_str() {
        "COMPLETED" => TripStatus::Completed,
        "IN_PROGRESS" | "INPROGRESS" => TripStatus::InProgress,
        "REQUESTED" => TripStatus::Requested,
        _ => TripStatus::Cancelled,
    }
}

fn parse_type(value: &str) -> TripType {
    match value.trim().to_ascii_uppercase().as_str() {
        "LADY" => TripType::Lady,
        "HAVAXL" => TripType::HavaXL,
        _ => TripType::Basic,
    }
}

fn parse_utc(value: &str) -> Result<OffsetDateTime, StoreError> {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    PrimitiveDateTime::parse(value.trim(), format)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| StoreError::Corrupt(format!("Invalid timestamp {:?}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use time::macros::datetime;

    fn row(id: i64, status: &str, request_date: &str, pickup: &str, plate: &str) -> String {
        format!(
            r#"{{
                "id": {id}, "status": "{status}", "type": "HAVAXL",
                "request_date": "{request_date}", "pickup_date": "{request_date}", "dropoff_date": "",
                "pickup_lat": -1.28, "pickup_lng": 36.82, "pickup_location": "{pickup}",
                "dropoff_lat": -1.3, "dropoff_lng": 36.9, "dropoff_location": "Karen",
                "duration": 25, "distance": 12.3456, "cost": 900,
                "driver_id": 3, "driver_name": "Wanjiru", "driver_rating": 4.7, "driver_pic": null,
                "car_make": "Toyota", "car_model": "Axio", "car_number": "{plate}", "car_year": 2016
            }}"#
        )
    }

    #[test]
    fn test_parse_rows_into_trips() {
        let raw = format!(
            r#"{{"trips": [{}, {}]}}"#,
            row(1, "COMPLETED", "2025-01-05 09:30:00", "Westlands", "KDA 123A"),
            row(2, "CANCELED", "2025-02-10 18:00:00", "CBD", "kda 123a"),
        );
        let trips = parse_trips(&raw).unwrap();

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].status, TripStatus::Completed);
        assert_eq!(trips[1].status, TripStatus::Cancelled);
        assert_eq!(trips[0].trip_type, TripType::HavaXL);
        assert_eq!(trips[0].request_date, datetime!(2025-01-05 09:30 UTC));
        assert_eq!(trips[0].dropoff_date, None);
        assert_eq!(trips[0].distance_km, 12.35);

        // Plates match case-insensitively and keep the first row's spelling
        let first_car = trips[0].car.as_ref().unwrap();
        let second_car = trips[1].car.as_ref().unwrap();
        assert_eq!(first_car.id, second_car.id);
        assert_eq!(second_car.number.as_deref(), Some("KDA 123A"));
    }

    #[test]
    fn test_drivers_keep_first_row_attributes() {
        let second = row(2, "COMPLETED", "2025-03-01 07:00:00", "Karen", "KCB 555Z")
            .replace(r#""driver_name": "Wanjiru""#, r#""driver_name": "W. Kamau""#)
            .replace(r#""driver_rating": 4.7"#, r#""driver_rating": 3.1"#);
        let raw = format!(
            r#"{{"trips": [{}, {}]}}"#,
            row(1, "COMPLETED", "2025-01-05 09:30:00", "Westlands", "KDA 123A"),
            second,
        );
        let trips = parse_trips(&raw).unwrap();

        let first_driver = trips[0].driver.as_ref().unwrap();
        let second_driver = trips[1].driver.as_ref().unwrap();
        assert_eq!(first_driver, second_driver);
        assert_eq!(second_driver.name.as_deref(), Some("Wanjiru"));
        assert_eq!(second_driver.rating, 4.7);
    }

    #[test]
    fn test_duplicate_rows_are_skipped() {
        let raw = format!(
            r#"{{"trips": [{}, {}]}}"#,
            row(1, "COMPLETED", "2025-01-05 09:30:00", "Westlands", "KDA 123A"),
            row(2, "COMPLETED", "2025-01-05 09:30:00", "Westlands", "KDA 123A"),
        );
        let trips = parse_trips(&raw).unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].id, 1);
    }

    #[test]
    fn test_invalid_timestamp_is_corrupt() {
        let raw = format!(
            r#"{{"trips": [{}]}}"#,
            row(1, "COMPLETED", "05/01/2025", "Westlands", "KDA 123A"),
        );
        assert!(matches!(parse_trips(&raw), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"trips": [{}]}}"#,
            row(9, "COMPLETED", "2025-04-15 12:00:00", "Kilimani", "KBZ 900X")
        )
        .unwrap();

        let trips = load_trips_from_path(file.path()).unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].id, 9);

        assert!(matches!(
            load_trips_from_path("/definitely/not/here.json"),
            Err(StoreError::Corrupt(_))
        ));
    }
}
