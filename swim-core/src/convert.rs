//! Conversion of open-data bacteria results into the map's GeoJSON file.
//!
//! Records come from the data.ca.gov CKAN `datastore_search` action. Each
//! record with a usable latitude/longitude becomes one Point feature whose
//! `status` is derived from the numeric `Result` column.

use crate::site::{Region, Status};
use anyhow::Context;
use chrono::NaiveDate;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use log::debug;
use serde::Deserialize;

/// CKAN datastore search action on the California open data portal.
pub const DATASTORE_SEARCH_URL: &str = "https://data.ca.gov/api/3/action/datastore_search";

/// Surface water indicator bacteria results resource.
pub const DEFAULT_RESOURCE_ID: &str = "9dcf551f-452d-4257-b857-30fbcc883a03";

pub const DEFAULT_LIMIT: u32 = 100;

pub const DEFAULT_OUTPUT: &str = "californiaGeoData.json";

/// Station name written when a record has none.
pub const UNKNOWN_STATION: &str = "Unknown";

/// Results above this are safe.
pub const SAFE_THRESHOLD: f64 = 7.0;
/// Results above this (and not safe) call for caution.
pub const CAUTION_THRESHOLD: f64 = 5.0;

#[derive(Debug, Deserialize)]
pub struct DatastoreResponse {
    pub result: DatastoreResult,
}

#[derive(Debug, Deserialize)]
pub struct DatastoreResult {
    #[serde(default)]
    pub records: Vec<JsonObject>,
}

pub fn datastore_url(resource_id: &str, limit: u32) -> String {
    format!(
        "{}?resource_id={}&limit={}",
        DATASTORE_SEARCH_URL, resource_id, limit
    )
}

/// Pull the record list out of a `datastore_search` response body.
pub fn parse_response(body: &str) -> anyhow::Result<Vec<JsonObject>> {
    let response: DatastoreResponse =
        serde_json::from_str(body).context("unexpected datastore_search response")?;
    Ok(response.result.records)
}

pub fn derive_status(result: Option<f64>) -> Status {
    match result {
        Some(v) if v > SAFE_THRESHOLD => Status::Safe,
        Some(v) if v > CAUTION_THRESHOLD => Status::Caution,
        _ => Status::Unsafe,
    }
}

/// Region from a station name: "Los Angeles" or the word "LA" first, then
/// "Orange" or the word "OC". Case-insensitive.
pub fn derive_region(station_name: &str) -> Option<Region> {
    let lowered = station_name.to_lowercase();
    if lowered.contains("los angeles") || has_word(station_name, "la") {
        Some(Region::La)
    } else if lowered.contains("orange") || has_word(station_name, "oc") {
        Some(Region::Oc)
    } else {
        None
    }
}

/// Whole-word match, where word characters are ASCII alphanumerics and `_`.
fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|token| token.eq_ignore_ascii_case(word))
}

fn text_field(record: &JsonObject, key: &str) -> Option<String> {
    match record.get(key)? {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_field(record: &JsonObject, key: &str) -> Option<f64> {
    let value = match record.get(key)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// One record as a Point feature; `None` when its coordinates are unusable.
pub fn record_to_feature(record: &JsonObject, retrieved: NaiveDate) -> Option<Feature> {
    let latitude = number_field(record, "Latitude")?;
    let longitude = number_field(record, "Longitude")?;

    let station_name = text_field(record, "StationName");
    let result = number_field(record, "Result");

    let mut properties = JsonObject::new();
    properties.insert(
        "name".to_string(),
        JsonValue::from(station_name.as_deref().unwrap_or(UNKNOWN_STATION)),
    );
    properties.insert(
        "status".to_string(),
        JsonValue::from(derive_status(result).as_str()),
    );
    properties.insert("ph".to_string(), result.map_or(JsonValue::Null, JsonValue::from));
    properties.insert(
        "sampleDate".to_string(),
        text_field(record, "SampleDate").map_or(JsonValue::Null, JsonValue::from),
    );
    properties.insert(
        "dataRetrievalDate".to_string(),
        JsonValue::from(retrieved.format("%Y-%m-%d").to_string()),
    );
    if let Some(region) = station_name.as_deref().and_then(derive_region) {
        properties.insert("region".to_string(), JsonValue::from(region.as_str()));
    }

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![longitude, latitude]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

pub fn records_to_collection(records: &[JsonObject], retrieved: NaiveDate) -> FeatureCollection {
    let features: Vec<Feature> = records
        .iter()
        .filter_map(|record| record_to_feature(record, retrieved))
        .collect();
    debug!(
        "Converted {} of {} records ({} without coordinates)",
        features.len(),
        records.len(),
        records.len() - features.len()
    );
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

pub fn to_pretty_json(collection: &FeatureCollection) -> anyhow::Result<String> {
    serde_json::to_string_pretty(collection).context("failed to serialize GeoJSON")
}
